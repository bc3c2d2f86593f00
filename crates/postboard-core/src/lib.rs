//! # Postboard Core
//!
//! The domain layer of the post index.
//! This crate contains pure indexing logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::IndexError;
pub use service::{PostFilter, PostIndex};
