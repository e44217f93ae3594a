//! Token codec module
//!
//! Access and refresh tokens are HS256 JWTs signed with independent secrets.
//! The codec only signs and verifies; storing the live refresh token is the
//! session manager's job.

mod codec;
mod config;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenCodecConfig;
