//! Account entity representing a registered marketplace user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marketplace role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Posts tasks and accepts bids
    Client,
    /// Bids on and delivers tasks
    Freelancer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Freelancer => "FREELANCER",
            Role::Admin => "ADMIN",
        }
    }

    /// Roles an account may choose for itself at registration
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Role::Client | Role::Freelancer)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CLIENT" => Ok(Role::Client),
            "FREELANCER" => Ok(Role::Freelancer),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Account entity
///
/// `email_verified_at` stays `None` until the emailed code is confirmed; an
/// account without it can neither log in nor refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,

    /// Unique login email, stored lowercase
    pub email: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    pub name: String,

    pub role: Role,

    pub bio: Option<String>,

    pub skills: Vec<String>,

    pub portfolio_links: Vec<String>,

    /// Activation timestamp, set once by email verification
    pub email_verified_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new, not yet activated account
    pub fn new(email: &str, password_hash: String, name: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            password_hash,
            name,
            role,
            bio: None,
            skills: Vec::new(),
            portfolio_links: Vec::new(),
            email_verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_activated(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// Marks the account as activated at `at`
    pub fn activate(&mut self, at: DateTime<Utc>) {
        self.email_verified_at = Some(at);
        self.updated_at = at;
    }

    /// Public view without credential material
    pub fn profile(&self) -> AccountProfile {
        AccountProfile::from(self)
    }
}

/// Account data safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub portfolio_links: Vec<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
            role: account.role,
            bio: account.bio.clone(),
            skills: account.skills.clone(),
            portfolio_links: account.portfolio_links.clone(),
            email_verified: account.is_activated(),
            created_at: account.created_at,
        }
    }
}

/// Lowercases and trims an email address for lookup and storage
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Masks the local part of an email for logs: `jane@x.io` -> `j***@x.io`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_is_not_activated() {
        let account = Account::new(" Jane@Example.com ", "hash".into(), "Jane".into(), Role::Client);
        assert_eq!(account.email, "jane@example.com");
        assert!(!account.is_activated());
        assert!(!account.profile().email_verified);
    }

    #[test]
    fn test_activate() {
        let mut account = Account::new("a@b.io", "hash".into(), "A".into(), Role::Freelancer);
        let now = Utc::now();
        account.activate(now);
        assert_eq!(account.email_verified_at, Some(now));
        assert!(account.profile().email_verified);
    }

    #[test]
    fn test_profile_omits_password_hash() {
        let account = Account::new("a@b.io", "secret-hash".into(), "A".into(), Role::Client);
        let json = serde_json::to_string(&account.profile()).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"role\":\"CLIENT\""));
        assert!(json.contains("emailVerified"));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("freelancer".parse::<Role>().unwrap(), Role::Freelancer);
        assert!("owner".parse::<Role>().is_err());
        assert!(!Role::Admin.is_self_assignable());
        assert!(Role::Client.is_self_assignable());
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane@example.com"), "j***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
