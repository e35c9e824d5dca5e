//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::user::{Role, User, UserId, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
///
/// Username and email uniqueness are enforced by unique constraints;
/// constraint violations are translated to Conflict errors.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table if it does not exist
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                last_login_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }

    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::storage(format!("Failed to read user id: {}", e)))?;
        let username: String = row
            .try_get("username")
            .map_err(|e| DomainError::storage(format!("Failed to read username: {}", e)))?;
        let email: Option<String> = row
            .try_get("email")
            .map_err(|e| DomainError::storage(format!("Failed to read email: {}", e)))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| DomainError::storage(format!("Failed to read password hash: {}", e)))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::storage(format!("Failed to read role: {}", e)))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| DomainError::storage(format!("Failed to read created_at: {}", e)))?;
        let last_login_at: Option<DateTime<Utc>> = row
            .try_get("last_login_at")
            .map_err(|e| DomainError::storage(format!("Failed to read last_login_at: {}", e)))?;

        let user_id = UserId::new(id)
            .map_err(|e| DomainError::storage(format!("Stored user id is invalid: {}", e)))?;

        Ok(User::restore(
            user_id,
            username,
            email,
            password_hash,
            str_to_role(&role)?,
            created_at,
            last_login_at,
        ))
    }
}

fn role_to_str(role: Role) -> &'static str {
    role.as_str()
}

fn str_to_role(value: &str) -> Result<Role, DomainError> {
    match value {
        "standard" => Ok(Role::Standard),
        "admin" => Ok(Role::Admin),
        other => Err(DomainError::storage(format!(
            "Unknown role '{}' in users table",
            other
        ))),
    }
}

/// Map a unique-constraint violation to a Conflict, everything else to Storage
fn map_create_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            if message.contains("email") {
                return DomainError::conflict("Email already registered");
            }
            return DomainError::conflict("Username already registered");
        }
    }

    DomainError::storage(format!("Failed to create user: {}", e))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, role, created_at, last_login_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.username())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(role_to_str(user.role()))
        .bind(user.created_at())
        .bind(user.last_login_at())
        .execute(&self.pool)
        .await
        .map_err(map_create_error)?;

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| DomainError::storage(format!("Failed to read count: {}", e)))?;

        Ok(count as usize)
    }

    async fn record_login(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET last_login_at = $1 WHERE id = $2")
            .bind(Utc::now())
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to record login: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }
}
