//! Wallet Repository
//!
//! Balance mutations append to the ledger in the same statement flow, and all
//! of them run inside a caller-owned transaction: the order use cases are the
//! only writers.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Wallet, WalletTransaction, WalletTxnKind};

#[derive(Clone)]
pub struct WalletRepository {
    base: BaseRepository,
}

impl WalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    pub async fn find_by_user(&self, user_id: i64) -> RepoResult<Option<Wallet>> {
        let wallet = sqlx::query_as::<_, Wallet>("SELECT * FROM wallets WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.base.pool())
            .await?;
        Ok(wallet)
    }

    /// Create the wallet row when a user is promoted from signup
    pub async fn create_for_user(&self, conn: &mut PgConnection, user_id: i64) -> RepoResult<Wallet> {
        let wallet = sqlx::query_as::<_, Wallet>(
            "INSERT INTO wallets (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING *",
        )
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(wallet)
    }

    pub async fn transactions(&self, user_id: i64) -> RepoResult<Vec<WalletTransaction>> {
        let txns = sqlx::query_as::<_, WalletTransaction>(
            "SELECT t.* FROM wallet_transactions t \
             JOIN wallets w ON w.id = t.wallet_id \
             WHERE w.user_id = $1 ORDER BY t.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.base.pool())
        .await?;
        Ok(txns)
    }

    /// Debit the wallet. Fails with a validation error when the balance is
    /// insufficient; the guarded UPDATE keeps the balance non-negative even
    /// under concurrent spends.
    pub async fn debit(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        amount: Decimal,
        note: &str,
    ) -> RepoResult<WalletTransaction> {
        let wallet: Option<Wallet> = sqlx::query_as(
            "UPDATE wallets SET balance = balance - $2 \
             WHERE user_id = $1 AND balance >= $2 RETURNING *",
        )
        .bind(user_id)
        .bind(amount)
        .fetch_optional(&mut *conn)
        .await?;

        let wallet = wallet
            .ok_or_else(|| RepoError::Validation("insufficient wallet balance".to_string()))?;

        self.append_txn(conn, &wallet, amount, WalletTxnKind::Debit, note)
            .await
    }

    /// Credit the wallet (refunds on cancellation/return)
    pub async fn credit(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        amount: Decimal,
        note: &str,
    ) -> RepoResult<WalletTransaction> {
        let wallet: Option<Wallet> = sqlx::query_as(
            "UPDATE wallets SET balance = balance + $2 WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(amount)
        .fetch_optional(&mut *conn)
        .await?;

        let wallet =
            wallet.ok_or_else(|| RepoError::NotFound(format!("Wallet for user {}", user_id)))?;

        self.append_txn(conn, &wallet, amount, WalletTxnKind::Credit, note)
            .await
    }

    async fn append_txn(
        &self,
        conn: &mut PgConnection,
        wallet: &Wallet,
        amount: Decimal,
        kind: WalletTxnKind,
        note: &str,
    ) -> RepoResult<WalletTransaction> {
        let txn = sqlx::query_as::<_, WalletTransaction>(
            "INSERT INTO wallet_transactions (wallet_id, amount, kind, balance_after, note) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(wallet.id)
        .bind(amount)
        .bind(kind)
        .bind(wallet.balance)
        .bind(note)
        .fetch_one(&mut *conn)
        .await?;
        Ok(txn)
    }
}
