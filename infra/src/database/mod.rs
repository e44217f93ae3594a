//! Database module - MySQL account persistence using SQLx

pub mod backend;
pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use backend::AccountBackend;
pub use connection::DatabasePool;
pub use mysql::MySqlAccountRepository;
