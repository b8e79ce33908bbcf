//! Cancellation, returns, and admin status moves
//!
//! Stock restoration and the wallet refund happen inside the same transaction
//! that flips the status; there is no second bookkeeping phase.

use super::OrdersManager;
use crate::db::models::{Order, OrderStatus, PaymentStatus};
use crate::db::repository::{OrderRepository, ProductRepository, WalletRepository};
use crate::utils::{AppError, AppResult};

impl OrdersManager {
    /// Cancel an order on behalf of its owner.
    ///
    /// An owner mismatch is rejected outright; cancellation is only legal
    /// from `pending` and `shipped`. Paid amounts are refunded to the wallet.
    pub async fn cancel_order(&self, order_id: i64, user_id: i64) -> AppResult<Order> {
        let pool = self.pool().clone();
        let order_repo = OrderRepository::new(pool.clone());

        let mut tx = pool.begin().await?;

        let order = order_repo
            .find_by_id_for_update(&mut *tx, order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;

        if order.user_id != user_id {
            return Err(AppError::forbidden(
                "order does not belong to this user".to_string(),
            ));
        }

        if let Some(reason) = order.order_status.deny_cancel_reason() {
            return Err(AppError::business_rule(reason));
        }

        let order = self
            .close_out(&mut tx, order, OrderStatus::Cancelled, "order refund")
            .await?;

        tx.commit().await?;

        tracing::info!(order_id, user_id, "Order cancelled");
        Ok(order)
    }

    /// Return a shipped order. Follows the same restore-and-refund path as
    /// cancellation.
    pub async fn return_order(&self, order_id: i64, user_id: i64) -> AppResult<Order> {
        let pool = self.pool().clone();
        let order_repo = OrderRepository::new(pool.clone());

        let mut tx = pool.begin().await?;

        let order = order_repo
            .find_by_id_for_update(&mut *tx, order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;

        if order.user_id != user_id {
            return Err(AppError::forbidden(
                "order does not belong to this user".to_string(),
            ));
        }

        if let Some(reason) = order.order_status.deny_return_reason() {
            return Err(AppError::business_rule(reason));
        }

        let order = self
            .close_out(&mut tx, order, OrderStatus::Returned, "return refund")
            .await?;

        tx.commit().await?;

        tracing::info!(order_id, user_id, "Order returned");
        Ok(order)
    }

    /// Admin move through the state machine (ship, deliver, fail, cancel).
    ///
    /// Moves into `cancelled`, `returned`, or `failed` restore stock and
    /// refund paid amounts like the user-facing flows do.
    pub async fn advance_status(&self, order_id: i64, next: OrderStatus) -> AppResult<Order> {
        let pool = self.pool().clone();
        let order_repo = OrderRepository::new(pool.clone());

        let mut tx = pool.begin().await?;

        let order = order_repo
            .find_by_id_for_update(&mut *tx, order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;

        if !order.order_status.can_transition_to(next) {
            return Err(AppError::business_rule(format!(
                "cannot move order from {} to {}",
                order.order_status, next
            )));
        }

        let order = match next {
            OrderStatus::Cancelled | OrderStatus::Returned | OrderStatus::Failed => {
                self.close_out(&mut tx, order, next, "order refund").await?
            }
            _ => order_repo.update_status(&mut *tx, order_id, next).await?,
        };

        tx.commit().await?;

        tracing::info!(order_id, status = %order.order_status, "Order status updated");
        Ok(order)
    }

    /// Shared tail of every terminating flow: flip the status, give stock
    /// back per line, refund the wallet when the order was paid.
    async fn close_out(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order: Order,
        next: OrderStatus,
        refund_note: &str,
    ) -> AppResult<Order> {
        let pool = self.pool().clone();
        let order_repo = OrderRepository::new(pool.clone());
        let product_repo = ProductRepository::new(pool.clone());
        let wallet_repo = WalletRepository::new(pool);

        let mut updated = order_repo.update_status(&mut **tx, order.id, next).await?;

        let items = order_repo.find_items(&mut **tx, order.id).await?;
        for item in &items {
            product_repo
                .restore_stock(&mut **tx, item.product_id, item.quantity)
                .await?;
        }

        if order.payment_status == PaymentStatus::Paid {
            wallet_repo
                .credit(&mut **tx, order.user_id, order.final_price, refund_note)
                .await?;
            updated = order_repo
                .update_payment_status(&mut **tx, order.id, PaymentStatus::Refunded)
                .await?;
        }

        Ok(updated)
    }
}
