//! Authentication route handlers
//!
//! Registration, email verification, login, token refresh, logout and the
//! current-user profile.

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod resend_verification;
pub mod verify_email;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh;
pub use register::register;
pub use resend_verification::resend_verification;
pub use verify_email::verify_email;
