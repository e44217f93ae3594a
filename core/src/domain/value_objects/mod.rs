//! Value objects returned by the authentication use cases.

pub mod auth_session;

pub use auth_session::{AuthSession, Registration};
