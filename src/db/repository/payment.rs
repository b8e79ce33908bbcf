//! Payment Repository

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Payment, PaymentStatus};

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Persist a gateway order intent against an order
    pub async fn create_intent(
        &self,
        order_id: i64,
        gateway_order_id: &str,
        amount: Decimal,
    ) -> RepoResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (order_id, gateway_order_id, amount) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(order_id)
        .bind(gateway_order_id)
        .bind(amount)
        .fetch_one(self.base.pool())
        .await?;
        Ok(payment)
    }

    pub async fn find_by_gateway_order(
        &self,
        gateway_order_id: &str,
    ) -> RepoResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE gateway_order_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(gateway_order_id)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(payment)
    }

    pub async fn find_by_order(&self, order_id: i64) -> RepoResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE order_id = $1 ORDER BY created_at DESC",
        )
        .bind(order_id)
        .fetch_all(self.base.pool())
        .await?;
        Ok(payments)
    }

    /// Record the verified gateway payment id and flip the intent status
    pub async fn mark_paid(
        &self,
        conn: &mut PgConnection,
        id: i64,
        gateway_payment_id: &str,
    ) -> RepoResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments SET gateway_payment_id = $2, status = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(gateway_payment_id)
        .bind(PaymentStatus::Paid)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Payment {} not found", id)))
    }
}
