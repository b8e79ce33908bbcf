//! Cart Repository

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{CartItem, CartLine};

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Cart lines joined with product data for display
    pub async fn find_lines(&self, user_id: i64) -> RepoResult<Vec<CartLine>> {
        let lines = sqlx::query_as::<_, CartLine>(
            "SELECT c.product_id, p.name AS product_name, p.image, \
                    c.quantity, c.unit_price, c.total_price \
             FROM cart_items c JOIN products p ON p.id = c.product_id \
             WHERE c.user_id = $1 ORDER BY c.id",
        )
        .bind(user_id)
        .fetch_all(self.base.pool())
        .await?;
        Ok(lines)
    }

    /// Raw cart rows (checkout reads these inside its transaction)
    pub async fn find_items(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
    ) -> RepoResult<Vec<CartItem>> {
        let items =
            sqlx::query_as::<_, CartItem>("SELECT * FROM cart_items WHERE user_id = $1 ORDER BY id")
                .bind(user_id)
                .fetch_all(&mut *conn)
                .await?;
        Ok(items)
    }

    /// Sum of line totals
    pub async fn cart_total(&self, user_id: i64) -> RepoResult<Decimal> {
        let row: (Option<Decimal>,) =
            sqlx::query_as("SELECT SUM(total_price) FROM cart_items WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(self.base.pool())
                .await?;
        Ok(row.0.unwrap_or_default())
    }

    /// Add a product to the cart; a repeat add bumps the row in place.
    pub async fn upsert_item(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i32,
        unit_price: Decimal,
    ) -> RepoResult<CartItem> {
        let item = sqlx::query_as::<_, CartItem>(
            "INSERT INTO cart_items (user_id, product_id, quantity, unit_price, total_price) \
             VALUES ($1, $2, $3, $4, $3 * $4) \
             ON CONFLICT (user_id, product_id) DO UPDATE \
             SET quantity   = cart_items.quantity + EXCLUDED.quantity, \
                 unit_price = EXCLUDED.unit_price, \
                 total_price = (cart_items.quantity + EXCLUDED.quantity) * EXCLUDED.unit_price \
             RETURNING *",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .fetch_one(self.base.pool())
        .await?;
        Ok(item)
    }

    /// Set the quantity of a line outright
    pub async fn update_quantity(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> RepoResult<CartItem> {
        sqlx::query_as::<_, CartItem>(
            "UPDATE cart_items SET quantity = $3, total_price = $3 * unit_price \
             WHERE user_id = $1 AND product_id = $2 RETURNING *",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(self.base.pool())
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {} is not in the cart", product_id)))
    }

    pub async fn remove_item(&self, user_id: i64, product_id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(self.base.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Empty the cart (checkout does this inside its transaction)
    pub async fn clear(&self, conn: &mut PgConnection, user_id: i64) -> RepoResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
