//! Address Repository

use sqlx::PgPool;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Address, AddressCreate, AddressUpdate};

#[derive(Clone)]
pub struct AddressRepository {
    base: BaseRepository,
}

impl AddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    pub async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Address>> {
        let addresses = sqlx::query_as::<_, Address>(
            "SELECT * FROM addresses WHERE user_id = $1 ORDER BY is_default DESC, id",
        )
        .bind(user_id)
        .fetch_all(self.base.pool())
        .await?;
        Ok(addresses)
    }

    /// Fetch an address only if it belongs to the user
    pub async fn find_owned(&self, id: i64, user_id: i64) -> RepoResult<Option<Address>> {
        let address =
            sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(self.base.pool())
                .await?;
        Ok(address)
    }

    pub async fn create(&self, user_id: i64, data: AddressCreate) -> RepoResult<Address> {
        // Only one default address per user
        if data.is_default {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1")
                .bind(user_id)
                .execute(self.base.pool())
                .await?;
        }

        let address = sqlx::query_as::<_, Address>(
            "INSERT INTO addresses (user_id, house, street, city, state, pincode, is_default) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(user_id)
        .bind(&data.house)
        .bind(&data.street)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.pincode)
        .bind(data.is_default)
        .fetch_one(self.base.pool())
        .await?;
        Ok(address)
    }

    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        data: AddressUpdate,
    ) -> RepoResult<Address> {
        if data.is_default == Some(true) {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1")
                .bind(user_id)
                .execute(self.base.pool())
                .await?;
        }

        sqlx::query_as::<_, Address>(
            "UPDATE addresses SET \
                house      = COALESCE($3, house), \
                street     = COALESCE($4, street), \
                city       = COALESCE($5, city), \
                state      = COALESCE($6, state), \
                pincode    = COALESCE($7, pincode), \
                is_default = COALESCE($8, is_default) \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(data.house)
        .bind(data.street)
        .bind(data.city)
        .bind(data.state)
        .bind(data.pincode)
        .bind(data.is_default)
        .fetch_optional(self.base.pool())
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)))
    }

    pub async fn delete(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.base.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
