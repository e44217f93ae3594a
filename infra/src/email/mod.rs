//! Verification email delivery

pub mod backend;
pub mod http_sender;
pub mod log_sender;

#[cfg(test)]
mod tests;

pub use backend::EmailBackend;
pub use http_sender::HttpEmailSender;
pub use log_sender::LogEmailSender;
