//! Wishlist Repository

use sqlx::PgPool;

use super::{BaseRepository, RepoResult};
use crate::db::models::WishlistLine;

#[derive(Clone)]
pub struct WishlistRepository {
    base: BaseRepository,
}

impl WishlistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    pub async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<WishlistLine>> {
        let lines = sqlx::query_as::<_, WishlistLine>(
            "SELECT w.product_id, p.name AS product_name, p.image, \
                    p.price, p.offer_price, p.stock > 0 AS in_stock \
             FROM wishlist_items w JOIN products p ON p.id = w.product_id \
             WHERE w.user_id = $1 AND p.deleted_at IS NULL ORDER BY w.id DESC",
        )
        .bind(user_id)
        .fetch_all(self.base.pool())
        .await?;
        Ok(lines)
    }

    /// Add a product; a repeat add is a no-op
    pub async fn add(&self, user_id: i64, product_id: i64) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO wishlist_items (user_id, product_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, product_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(self.base.pool())
        .await?;
        Ok(())
    }

    pub async fn remove(&self, user_id: i64, product_id: i64) -> RepoResult<bool> {
        let result =
            sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .execute(self.base.pool())
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
