//! Checkout: cart → order
//!
//! One transaction covers coupon validation, stock decrement, wallet debit,
//! the order insert, and the cart clear. Any failure rolls everything back,
//! so a half-placed order can never leak stock or money.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::OrdersManager;
use crate::db::models::{
    Coupon, OrderCreate, OrderItemCreate, OrderStatus, OrderSummary, PaymentMethod, PaymentStatus,
};
use crate::db::repository::{
    AddressRepository, CartRepository, CouponRepository, OrderRepository, ProductRepository,
    WalletRepository,
};
use crate::utils::{AppError, AppResult};

/// Checkout request
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    pub address_id: i64,
    pub payment_method: PaymentMethod,
    pub coupon_code: Option<String>,
}

/// Validate a coupon against the cart total and compute the discount.
///
/// The percentage discount is capped at the coupon's `max_discount`.
pub(crate) fn compute_discount(coupon: &Coupon, grand_total: Decimal) -> AppResult<Decimal> {
    if !coupon.is_active {
        return Err(AppError::business_rule("coupon is inactive"));
    }
    if coupon.expires_at <= chrono::Utc::now() {
        return Err(AppError::business_rule("coupon has expired"));
    }
    if grand_total < coupon.min_order_value {
        return Err(AppError::business_rule(format!(
            "order total below the coupon minimum of {}",
            coupon.min_order_value
        )));
    }

    let discount = grand_total * Decimal::from(coupon.discount_percent) / Decimal::ONE_HUNDRED;
    Ok(discount.min(coupon.max_discount))
}

/// Cash on delivery is refused above the configured limit.
pub(crate) fn check_cod_limit(final_price: Decimal, limit: Decimal) -> AppResult<()> {
    if final_price > limit {
        return Err(AppError::business_rule(format!(
            "cash on delivery is not allowed for orders above {limit}"
        )));
    }
    Ok(())
}

impl OrdersManager {
    /// Place an order from the user's cart.
    ///
    /// Steps, all inside one transaction after the address pre-check:
    /// cart read → totals → coupon → payment-method rules → per-line stock
    /// lock + decrement → wallet debit (wallet payments) → order + items
    /// insert → cart clear → commit.
    pub async fn place_order(
        &self,
        user_id: i64,
        req: PlaceOrderRequest,
    ) -> AppResult<OrderSummary> {
        let pool = self.pool().clone();
        let cart_repo = CartRepository::new(pool.clone());
        let product_repo = ProductRepository::new(pool.clone());
        let order_repo = OrderRepository::new(pool.clone());
        let coupon_repo = CouponRepository::new(pool.clone());
        let wallet_repo = WalletRepository::new(pool.clone());

        // Address must exist and belong to the buyer
        AddressRepository::new(pool.clone())
            .find_owned(req.address_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Address {} not found", req.address_id)))?;

        let mut tx = pool.begin().await?;

        let items = cart_repo.find_items(&mut *tx, user_id).await?;
        if items.is_empty() {
            return Err(AppError::business_rule("cart is empty"));
        }

        let grand_total: Decimal = items.iter().map(|i| i.total_price).sum();

        // Coupon: lock the row so concurrent redemptions serialize, then
        // enforce the per-user usage limit against the order ledger.
        let mut discount = Decimal::ZERO;
        if let Some(code) = req.coupon_code.as_deref() {
            let coupon = coupon_repo
                .lock_by_code(&mut *tx, code)
                .await?
                .ok_or_else(|| AppError::invalid("coupon does not exist"))?;

            let uses = order_repo.count_coupon_uses(&mut *tx, user_id, code).await?;
            if uses >= i64::from(coupon.usage_limit) {
                return Err(AppError::business_rule("coupon usage limit reached"));
            }

            discount = compute_discount(&coupon, grand_total)?;
        }

        let final_price = grand_total - discount;

        let payment_status = match req.payment_method {
            PaymentMethod::Cod => {
                check_cod_limit(final_price, self.cod_limit())?;
                PaymentStatus::Pending
            }
            PaymentMethod::Razorpay => PaymentStatus::Pending,
            PaymentMethod::Wallet => PaymentStatus::Paid,
        };

        // Re-check and decrement stock per line under a row lock
        for item in &items {
            let stock = product_repo
                .lock_stock(&mut *tx, item.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("Product {} not found", item.product_id))
                })?;
            if stock < item.quantity {
                return Err(AppError::business_rule(format!(
                    "insufficient stock for product {}",
                    item.product_id
                )));
            }
            product_repo
                .decrement_stock(&mut *tx, item.product_id, item.quantity)
                .await?;
        }

        // Wallet payments debit inside the same transaction
        if req.payment_method == PaymentMethod::Wallet {
            wallet_repo
                .debit(&mut *tx, user_id, final_price, "order payment")
                .await?;
        }

        let order = order_repo
            .insert_order(
                &mut *tx,
                OrderCreate {
                    user_id,
                    address_id: req.address_id,
                    coupon_code: req.coupon_code.clone(),
                    discount,
                    grand_total,
                    final_price,
                    payment_method: req.payment_method,
                    payment_status,
                    order_status: OrderStatus::Pending,
                },
            )
            .await?;

        for item in &items {
            order_repo
                .insert_item(
                    &mut *tx,
                    order.id,
                    OrderItemCreate {
                        product_id: item.product_id,
                        quantity: item.quantity,
                        total_price: item.total_price,
                    },
                )
                .await?;
        }

        cart_repo.clear(&mut *tx, user_id).await?;

        tx.commit().await?;

        tracing::info!(
            order_id = order.id,
            user_id,
            %final_price,
            method = ?order.payment_method,
            "Order placed"
        );

        Ok(OrderSummary::from(&order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn coupon(percent: i32, min: i64, cap: i64) -> Coupon {
        Coupon {
            code: "SAVE10".to_string(),
            discount_percent: percent,
            min_order_value: Decimal::new(min, 0),
            max_discount: Decimal::new(cap, 0),
            usage_limit: 1,
            expires_at: Utc::now() + Duration::days(7),
            is_active: true,
        }
    }

    #[test]
    fn discount_is_percentage_of_total() {
        let d = compute_discount(&coupon(10, 0, 1000), Decimal::new(500, 0)).unwrap();
        assert_eq!(d, Decimal::new(50, 0));
    }

    #[test]
    fn discount_is_capped_at_max() {
        let d = compute_discount(&coupon(50, 0, 100), Decimal::new(1000, 0)).unwrap();
        assert_eq!(d, Decimal::new(100, 0));
    }

    #[test]
    fn inactive_coupon_is_rejected() {
        let mut c = coupon(10, 0, 1000);
        c.is_active = false;
        assert!(compute_discount(&c, Decimal::new(500, 0)).is_err());
    }

    #[test]
    fn expired_coupon_is_rejected() {
        let mut c = coupon(10, 0, 1000);
        c.expires_at = Utc::now() - Duration::days(1);
        assert!(compute_discount(&c, Decimal::new(500, 0)).is_err());
    }

    #[test]
    fn below_minimum_total_is_rejected() {
        let err = compute_discount(&coupon(10, 600, 1000), Decimal::new(500, 0)).unwrap_err();
        assert!(err.to_string().contains("minimum"));
    }

    #[test]
    fn cod_allowed_at_limit_rejected_above() {
        let limit = Decimal::new(1000, 0);
        assert!(check_cod_limit(Decimal::new(1000, 0), limit).is_ok());
        let err = check_cod_limit(Decimal::new(1500, 0), limit).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Business rule violation: cash on delivery is not allowed for orders above 1000"
        );
    }
}
