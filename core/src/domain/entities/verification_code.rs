//! Email verification code.

use rand::Rng;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default lifetime of a stored code (10 minutes)
pub const DEFAULT_CODE_TTL_SECONDS: u64 = 600;

/// A six-digit code emailed to an account during verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Draws a code uniformly from [`CODE_MIN`, `CODE_MAX`]
    pub fn generate() -> Self {
        let value = rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX);
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison with a submitted code; no trimming or normalization
    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

impl From<String> for VerificationCode {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
