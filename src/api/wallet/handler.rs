//! Wallet API Handlers

use axum::extract::State;
use axum::{Extension, Json};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Wallet, WalletTransaction};
use crate::db::repository::WalletRepository;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/user/wallet - 钱包余额
pub async fn get_wallet(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Wallet>>> {
    let repo = WalletRepository::new(state.pool.clone());

    let wallet = match repo.find_by_user(user.id).await? {
        Some(w) => w,
        None => {
            // Accounts from before wallets existed get one lazily
            let mut tx = state.pool.begin().await?;
            let wallet = repo.create_for_user(&mut *tx, user.id).await?;
            tx.commit().await?;
            wallet
        }
    };

    Ok(ok(wallet))
}

/// GET /api/user/wallet/transactions - 钱包流水
pub async fn list_transactions(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Vec<WalletTransaction>>>> {
    let repo = WalletRepository::new(state.pool.clone());
    Ok(ok(repo.transactions(user.id).await?))
}
