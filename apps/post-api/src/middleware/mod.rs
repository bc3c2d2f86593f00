//! Application middleware - error mapping.

pub mod error;
