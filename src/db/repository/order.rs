//! Order Repository
//!
//! Checkout and cancellation run several of these methods inside one
//! transaction; those take `&mut PgConnection` so the use case owns
//! commit/rollback.

use sqlx::{PgConnection, PgPool};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    Order, OrderCreate, OrderItem, OrderItemCreate, OrderStatus, PaymentStatus, SalesRow,
};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.base.pool())
            .await?;
        Ok(order)
    }

    /// Lock the order row for the duration of the enclosing transaction
    pub async fn find_by_id_for_update(
        &self,
        conn: &mut PgConnection,
        id: i64,
    ) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(order)
    }

    pub async fn list_by_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.base.pool())
        .await?;
        Ok(orders)
    }

    /// All orders, newest first (admin panel)
    pub async fn list_all(&self, limit: i64, offset: i64) -> RepoResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.base.pool())
        .await?;
        Ok(orders)
    }

    /// Order lines; usable with the pool or a transaction connection
    pub async fn find_items<'e>(
        &self,
        exec: impl sqlx::PgExecutor<'e>,
        order_id: i64,
    ) -> RepoResult<Vec<OrderItem>> {
        let items =
            sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1")
                .bind(order_id)
                .fetch_all(exec)
                .await?;
        Ok(items)
    }

    // ========== Checkout transaction ==========

    pub async fn insert_order(
        &self,
        conn: &mut PgConnection,
        data: OrderCreate,
    ) -> RepoResult<Order> {
        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders \
                (user_id, address_id, coupon_code, discount, grand_total, final_price, \
                 payment_method, payment_status, order_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.address_id)
        .bind(&data.coupon_code)
        .bind(data.discount)
        .bind(data.grand_total)
        .bind(data.final_price)
        .bind(data.payment_method)
        .bind(data.payment_status)
        .bind(data.order_status)
        .fetch_one(&mut *conn)
        .await?;
        Ok(order)
    }

    pub async fn insert_item(
        &self,
        conn: &mut PgConnection,
        order_id: i64,
        item: OrderItemCreate,
    ) -> RepoResult<OrderItem> {
        let row = sqlx::query_as::<_, OrderItem>(
            "INSERT INTO order_items (order_id, product_id, quantity, total_price) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.total_price)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Redemptions of a coupon by one user (cancelled orders do not count).
    /// Runs inside the checkout transaction, after the coupon row is locked.
    pub async fn count_coupon_uses(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        code: &str,
    ) -> RepoResult<i64> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders \
             WHERE user_id = $1 AND coupon_code = $2 AND order_status <> 'cancelled'",
        )
        .bind(user_id)
        .bind(code)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row.0)
    }

    // ========== Status updates ==========

    pub async fn update_status(
        &self,
        conn: &mut PgConnection,
        id: i64,
        status: OrderStatus,
    ) -> RepoResult<Order> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET order_status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn update_payment_status(
        &self,
        conn: &mut PgConnection,
        id: i64,
        status: PaymentStatus,
    ) -> RepoResult<Order> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET payment_status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    // ========== Reporting ==========

    /// Daily order count and revenue over the trailing window.
    /// Cancelled and failed orders are excluded from revenue.
    pub async fn daily_sales(&self, days: i32) -> RepoResult<Vec<SalesRow>> {
        let rows = sqlx::query_as::<_, SalesRow>(
            "SELECT created_at::date AS day, COUNT(*) AS orders, \
                    COALESCE(SUM(final_price), 0) AS revenue \
             FROM orders \
             WHERE created_at > now() - make_interval(days => $1) \
               AND order_status NOT IN ('cancelled', 'failed') \
             GROUP BY day ORDER BY day DESC",
        )
        .bind(days)
        .fetch_all(self.base.pool())
        .await?;
        Ok(rows)
    }
}
