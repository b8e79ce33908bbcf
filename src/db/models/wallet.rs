//! Wallet Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One wallet per user. The balance only changes through order placement
/// (debit) and cancellation/return refunds (credit).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Wallet {
    pub id: i64,
    pub user_id: i64,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "wallet_txn_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WalletTxnKind {
    Credit,
    Debit,
}

/// Append-only ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WalletTransaction {
    pub id: i64,
    pub wallet_id: i64,
    pub amount: Decimal,
    pub kind: WalletTxnKind,
    pub balance_after: Decimal,
    pub note: String,
    pub created_at: DateTime<Utc>,
}
