//! Index store implementations - Redis and in-memory fallback.

mod memory;

pub use memory::InMemoryIndexStore;

#[cfg(feature = "redis")]
mod redis_store;
#[cfg(feature = "redis")]
pub use redis_store::{RedisIndexStore, RedisStoreConfig};
