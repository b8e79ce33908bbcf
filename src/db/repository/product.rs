//! Product Repository

use sqlx::{PgConnection, PgPool};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate, ProductUpdate};

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find active products, optionally filtered by category, newest first
    pub async fn find_all(
        &self,
        category_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products \
             WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR category_id = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.base.pool())
        .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let offer_price = data.offer_price.unwrap_or(data.price);
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (category_id, name, description, image, price, offer_price, stock, quantity) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) RETURNING *",
        )
        .bind(data.category_id)
        .bind(&data.name)
        .bind(data.description.unwrap_or_default())
        .bind(data.image.unwrap_or_default())
        .bind(data.price)
        .bind(offer_price)
        .bind(data.stock)
        .fetch_one(self.base.pool())
        .await?;
        Ok(product)
    }

    /// Update a product (only the provided fields change)
    pub async fn update(&self, id: i64, data: ProductUpdate) -> RepoResult<Product> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET \
                category_id = COALESCE($2, category_id), \
                name        = COALESCE($3, name), \
                description = COALESCE($4, description), \
                image       = COALESCE($5, image), \
                price       = COALESCE($6, price), \
                offer_price = COALESCE($7, offer_price), \
                stock       = COALESCE($8, stock), \
                quantity    = COALESCE($8, quantity) \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(data.category_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.image)
        .bind(data.price)
        .bind(data.offer_price)
        .bind(data.stock)
        .fetch_optional(self.base.pool())
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Soft delete a product
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(self.base.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ========== Order-flow helpers (explicit transaction) ==========

    /// Lock a product row for the duration of the enclosing transaction and
    /// return its current stock. `None` means the product vanished.
    pub async fn lock_stock(&self, conn: &mut PgConnection, id: i64) -> RepoResult<Option<i32>> {
        let row: Option<(i32,)> = sqlx::query_as(
            "SELECT stock FROM products WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Decrement stock and the display counter in one guarded statement.
    ///
    /// The `stock >= $2` guard means a lost race still cannot drive stock
    /// negative; zero rows affected is reported as insufficient stock.
    pub async fn decrement_stock(
        &self,
        conn: &mut PgConnection,
        id: i64,
        qty: i32,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE products SET stock = stock - $2, quantity = quantity - $2 \
             WHERE id = $1 AND stock >= $2",
        )
        .bind(id)
        .bind(qty)
        .execute(&mut *conn)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::Validation(format!(
                "insufficient stock for product {}",
                id
            )));
        }
        Ok(())
    }

    /// Give back stock and the display counter after a cancellation/return.
    pub async fn restore_stock(
        &self,
        conn: &mut PgConnection,
        id: i64,
        qty: i32,
    ) -> RepoResult<()> {
        sqlx::query(
            "UPDATE products SET stock = stock + $2, quantity = quantity + $2 WHERE id = $1",
        )
        .bind(id)
        .bind(qty)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
