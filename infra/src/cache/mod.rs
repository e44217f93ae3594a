//! Credential store implementations
//!
//! Verification codes and refresh sessions live here. Redis is the shared,
//! multi-instance backend; the memory store serves development and tests.

pub mod backend;
pub mod memory_store;
pub mod redis_client;
pub mod redis_store;

#[cfg(test)]
mod tests;

pub use backend::CredentialBackend;
pub use memory_store::MemoryCredentialStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisCredentialStore;
