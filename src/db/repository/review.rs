//! Review Repository

use sqlx::PgPool;

use super::{BaseRepository, RepoResult};
use crate::db::models::{ProductRating, Review, ReviewCreate};

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// True if this user already reviewed the product
    pub async fn exists(&self, user_id: i64, product_id: i64) -> RepoResult<bool> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM reviews WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .fetch_optional(self.base.pool())
                .await?;
        Ok(row.is_some())
    }

    pub async fn create(&self, data: ReviewCreate) -> RepoResult<Review> {
        let review = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (user_id, product_id, rating, comment) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.product_id)
        .bind(data.rating)
        .bind(&data.comment)
        .fetch_one(self.base.pool())
        .await?;
        Ok(review)
    }

    pub async fn find_by_product(&self, product_id: i64) -> RepoResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE product_id = $1 ORDER BY created_at DESC",
        )
        .bind(product_id)
        .fetch_all(self.base.pool())
        .await?;
        Ok(reviews)
    }

    pub async fn rating_summary(&self, product_id: i64) -> RepoResult<ProductRating> {
        let rating = sqlx::query_as::<_, ProductRating>(
            "SELECT AVG(rating)::FLOAT8 AS average, COUNT(*) AS count \
             FROM reviews WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(self.base.pool())
        .await?;
        Ok(rating)
    }

    /// Delete the caller's own review
    pub async fn delete_own(&self, user_id: i64, product_id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(self.base.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
