//! User Repository

use sqlx::{PgConnection, PgPool};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{PendingUser, PendingUserCreate, User};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find an active (non-deleted) user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(user)
    }

    /// Find an active user by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .fetch_optional(self.base.pool())
                .await?;
        Ok(user)
    }

    /// True if an active user already holds this email or phone
    pub async fn identity_taken(&self, email: &str, phone: &str) -> RepoResult<bool> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM users WHERE (email = $1 OR phone = $2) AND deleted_at IS NULL LIMIT 1",
        )
        .bind(email)
        .bind(phone)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(row.is_some())
    }

    /// List users for the admin panel, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE deleted_at IS NULL ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.base.pool())
        .await?;
        Ok(users)
    }

    /// Block or unblock a user
    pub async fn set_blocked(&self, id: i64, blocked: bool) -> RepoResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET is_blocked = $2 WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(blocked)
        .fetch_optional(self.base.pool())
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Update name/phone on the profile
    pub async fn update_profile(&self, id: i64, name: &str, phone: &str) -> RepoResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = $2, phone = $3 WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .fetch_optional(self.base.pool())
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Replace the stored password hash
    pub async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(self.base.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }

    // ========== Signup staging ==========

    /// Stage a signup until the OTP is verified; repeat signups refresh the row
    pub async fn stage_pending(&self, data: PendingUserCreate) -> RepoResult<PendingUser> {
        let pending = sqlx::query_as::<_, PendingUser>(
            "INSERT INTO pending_users (name, email, phone, password_hash) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (email) DO UPDATE \
             SET name = EXCLUDED.name, phone = EXCLUDED.phone, \
                 password_hash = EXCLUDED.password_hash, created_at = now() \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.password_hash)
        .fetch_one(self.base.pool())
        .await?;
        Ok(pending)
    }

    pub async fn find_pending_by_email(&self, email: &str) -> RepoResult<Option<PendingUser>> {
        let pending =
            sqlx::query_as::<_, PendingUser>("SELECT * FROM pending_users WHERE email = $1")
                .bind(email)
                .fetch_optional(self.base.pool())
                .await?;
        Ok(pending)
    }

    /// Promote a staged signup into a real user (inside the verify transaction)
    pub async fn promote_pending(
        &self,
        conn: &mut PgConnection,
        pending: &PendingUser,
    ) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, phone, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&pending.name)
        .bind(&pending.email)
        .bind(&pending.phone)
        .bind(&pending.password_hash)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query("DELETE FROM pending_users WHERE id = $1")
            .bind(pending.id)
            .execute(&mut *conn)
            .await?;

        Ok(user)
    }

    /// Insert a user directly (OAuth signups skip the OTP staging)
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        name: &str,
        email: &str,
        phone: &str,
        password_hash: &str,
    ) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, phone, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(password_hash)
        .fetch_one(&mut *conn)
        .await?;
        Ok(user)
    }
}
