//! Configuration for the verification workflow

use crate::domain::entities::DEFAULT_CODE_TTL_SECONDS;

#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Product name used in email subjects and bodies
    pub app_name: String,
    /// Code lifetime shown to the recipient; must match the store TTL
    pub code_ttl_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            app_name: "SkillLink".to_string(),
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
        }
    }
}
