//! # Postboard Infrastructure
//!
//! Concrete implementations of the `IndexStore` port defined in
//! `postboard-core`.
//!
//! ## Feature Flags
//!
//! - `redis` (default) - Redis-backed list store
//! - `minimal` - in-memory store only, no external dependencies

pub mod store;

pub use store::InMemoryIndexStore;

#[cfg(feature = "redis")]
pub use store::{RedisIndexStore, RedisStoreConfig};
