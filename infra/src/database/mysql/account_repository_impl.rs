//! MySQL implementation of the AccountRepository trait.
//!
//! Skills and portfolio links are stored as JSON arrays in text columns;
//! emails are normalized to lowercase before they reach the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sk_core::domain::entities::normalize_email;
use sk_core::{Account, AccountRepository, AuthError, DomainError, Role};

const ACCOUNT_COLUMNS: &str = "id, email, password_hash, name, role, bio, skills, \
     portfolio_links, email_verified_at, created_at, updated_at";

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(name)
            .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
    }

    fn decode_list(raw: &str, name: &str) -> Result<Vec<String>, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::internal(format!("Invalid {} JSON: {}", name, e)))
    }

    fn encode_list(values: &[String]) -> Result<String, DomainError> {
        serde_json::to_string(values)
            .map_err(|e| DomainError::internal(format!("Failed to encode list: {}", e)))
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = Self::column(row, "id")?;
        let role: String = Self::column(row, "role")?;
        let skills: String = Self::column(row, "skills")?;
        let portfolio_links: String = Self::column(row, "portfolio_links")?;

        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid account UUID: {}", e)))?,
            email: Self::column(row, "email")?,
            password_hash: Self::column(row, "password_hash")?,
            name: Self::column(row, "name")?,
            role: role.parse::<Role>().map_err(DomainError::internal)?,
            bio: Self::column(row, "bio")?,
            skills: Self::decode_list(&skills, "skills")?,
            portfolio_links: Self::decode_list(&portfolio_links, "portfolio_links")?,
            email_verified_at: Self::column::<Option<DateTime<Utc>>>(row, "email_verified_at")?,
            created_at: Self::column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: Self::column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {} FROM accounts WHERE email = ? LIMIT 1", ACCOUNT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find account: {}", e)))?;

        result.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {} FROM accounts WHERE id = ? LIMIT 1", ACCOUNT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find account by id: {}", e)))?;

        result.as_ref().map(Self::row_to_account).transpose()
    }

    async fn create(&self, mut account: Account) -> Result<Account, DomainError> {
        account.email = normalize_email(&account.email);

        let query = r#"
            INSERT INTO accounts (
                id, email, password_hash, name, role, bio, skills,
                portfolio_links, email_verified_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.name)
            .bind(account.role.as_str())
            .bind(&account.bio)
            .bind(Self::encode_list(&account.skills)?)
            .bind(Self::encode_list(&account.portfolio_links)?)
            .bind(account.email_verified_at)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => AuthError::AccountAlreadyExists.into(),
                _ => DomainError::internal(format!("Failed to create account: {}", e)),
            })?;

        Ok(account)
    }

    async fn set_activated(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE accounts
            SET email_verified_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(at)
            .bind(at)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to activate account: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM accounts WHERE email = ?")
            .bind(normalize_email(email))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to check email: {}", e)))?;

        let count: i64 = Self::column(&row, "count")?;
        Ok(count > 0)
    }
}
