//! OTP Repository

use chrono::{Duration, Utc};
use sqlx::PgPool;

use super::{BaseRepository, RepoResult};
use crate::db::models::Otp;

/// OTP codes expire after this many minutes.
const OTP_TTL_MINUTES: i64 = 10;

#[derive(Clone)]
pub struct OtpRepository {
    base: BaseRepository,
}

impl OtpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Store a freshly generated code, invalidating earlier ones for the
    /// same email/purpose.
    pub async fn issue(&self, email: &str, code: &str, purpose: &str) -> RepoResult<Otp> {
        sqlx::query("UPDATE otps SET consumed = TRUE WHERE email = $1 AND purpose = $2")
            .bind(email)
            .bind(purpose)
            .execute(self.base.pool())
            .await?;

        let otp = sqlx::query_as::<_, Otp>(
            "INSERT INTO otps (email, code, purpose, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(email)
        .bind(code)
        .bind(purpose)
        .bind(Utc::now() + Duration::minutes(OTP_TTL_MINUTES))
        .fetch_one(self.base.pool())
        .await?;
        Ok(otp)
    }

    /// Find a live (unconsumed, unexpired) code for the email/purpose pair
    pub async fn find_valid(
        &self,
        email: &str,
        code: &str,
        purpose: &str,
    ) -> RepoResult<Option<Otp>> {
        let otp = sqlx::query_as::<_, Otp>(
            "SELECT * FROM otps \
             WHERE email = $1 AND code = $2 AND purpose = $3 \
               AND NOT consumed AND expires_at > now() \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(email)
        .bind(code)
        .bind(purpose)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(otp)
    }

    /// Mark a code as used
    pub async fn consume(&self, id: i64) -> RepoResult<()> {
        sqlx::query("UPDATE otps SET consumed = TRUE WHERE id = $1")
            .bind(id)
            .execute(self.base.pool())
            .await?;
        Ok(())
    }
}
