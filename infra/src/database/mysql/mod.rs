//! MySQL implementations of repository traits using SQLx

pub mod account_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
