//! User repository for database operations.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{CreateUserRequest, Role, User};
use crate::types::{DatabaseError, DatabaseResult};

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user under a freshly generated UUID v4 and return the id.
    ///
    /// An email that is already registered yields [`DatabaseError::Duplicate`].
    pub async fn create(&self, request: &CreateUserRequest) -> DatabaseResult<String> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO users (id, email, role, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.email)
        .bind(request.role.as_str())
        .bind(&request.password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!(user_id = %id, role = %request.role, "user row inserted");
        Ok(id)
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<User>> {
        let rows = sqlx::query(
            "SELECT id, email, role, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        rows.first().map(map_user).transpose()
    }
}

fn map_user(row: &SqliteRow) -> DatabaseResult<User> {
    let role: String = row.try_get("role")?;
    let role = role
        .parse::<Role>()
        .map_err(|err| DatabaseError::Decode(err.to_string()))?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        role,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}
