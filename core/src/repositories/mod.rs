//! Repository interfaces for persistent data.

pub mod account;

pub use account::{AccountRepository, InMemoryAccountRepository};
