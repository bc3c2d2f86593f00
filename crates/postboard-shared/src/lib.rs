//! # Postboard Shared
//!
//! Request/response types shared between the HTTP surface and clients.

pub mod dto;
pub mod response;

pub use response::{Ack, ErrorResponse};
