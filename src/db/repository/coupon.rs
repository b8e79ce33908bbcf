//! Coupon Repository

use sqlx::{PgConnection, PgPool};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Coupon, CouponCreate, CouponUpdate};

#[derive(Clone)]
pub struct CouponRepository {
    base: BaseRepository,
}

impl CouponRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Coupon>> {
        let coupons =
            sqlx::query_as::<_, Coupon>("SELECT * FROM coupons ORDER BY expires_at DESC")
                .fetch_all(self.base.pool())
                .await?;
        Ok(coupons)
    }

    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Coupon>> {
        let coupon = sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE code = $1")
            .bind(code)
            .fetch_optional(self.base.pool())
            .await?;
        Ok(coupon)
    }

    /// Lock the coupon row inside the checkout transaction so concurrent
    /// redemptions of the same code serialize.
    pub async fn lock_by_code(
        &self,
        conn: &mut PgConnection,
        code: &str,
    ) -> RepoResult<Option<Coupon>> {
        let coupon =
            sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE code = $1 FOR UPDATE")
                .bind(code)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(coupon)
    }

    pub async fn create(&self, data: CouponCreate) -> RepoResult<Coupon> {
        let coupon = sqlx::query_as::<_, Coupon>(
            "INSERT INTO coupons \
                (code, discount_percent, min_order_value, max_discount, usage_limit, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.code)
        .bind(data.discount_percent)
        .bind(data.min_order_value)
        .bind(data.max_discount)
        .bind(data.usage_limit.unwrap_or(1))
        .bind(data.expires_at)
        .fetch_one(self.base.pool())
        .await?;
        Ok(coupon)
    }

    pub async fn update(&self, code: &str, data: CouponUpdate) -> RepoResult<Coupon> {
        sqlx::query_as::<_, Coupon>(
            "UPDATE coupons SET \
                discount_percent = COALESCE($2, discount_percent), \
                min_order_value  = COALESCE($3, min_order_value), \
                max_discount     = COALESCE($4, max_discount), \
                usage_limit      = COALESCE($5, usage_limit), \
                expires_at       = COALESCE($6, expires_at), \
                is_active        = COALESCE($7, is_active) \
             WHERE code = $1 RETURNING *",
        )
        .bind(code)
        .bind(data.discount_percent)
        .bind(data.min_order_value)
        .bind(data.max_discount)
        .bind(data.usage_limit)
        .bind(data.expires_at)
        .bind(data.is_active)
        .fetch_optional(self.base.pool())
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Coupon {} not found", code)))
    }

    /// Deactivate a coupon (orders keep referencing it, so no hard delete)
    pub async fn deactivate(&self, code: &str) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE coupons SET is_active = FALSE WHERE code = $1")
            .bind(code)
            .execute(self.base.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
