//! Domain entities representing core business objects.

pub mod account;
pub mod token;
pub mod verification_code;

// Re-export commonly used types
pub use account::{mask_email, normalize_email, Account, AccountProfile, Role};
pub use token::{
    Claims, TokenKind, TokenPair, ACCESS_TOKEN_EXPIRY_SECONDS, REFRESH_TOKEN_EXPIRY_SECONDS,
};
pub use verification_code::{VerificationCode, CODE_MAX, CODE_MIN, DEFAULT_CODE_TTL_SECONDS};
