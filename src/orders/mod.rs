//! 订单业务层
//!
//! 订单状态机与下单 / 取消 / 退货用例。这里是整个后端唯一需要
//! 多语句事务的地方：库存扣减、优惠券校验、钱包扣款和订单写入
//! 必须原子地成功或失败。

pub mod cancel;
pub mod checkout;
pub mod status;

pub use checkout::PlaceOrderRequest;

use rust_decimal::Decimal;
use sqlx::PgPool;

/// 订单用例入口
///
/// 持有连接池并拥有事务边界；仓储方法只在传入的事务句柄上执行 SQL。
#[derive(Clone)]
pub struct OrdersManager {
    pool: PgPool,
    cod_limit: Decimal,
}

impl OrdersManager {
    pub fn new(pool: PgPool, cod_limit: Decimal) -> Self {
        Self { pool, cod_limit }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub(crate) fn cod_limit(&self) -> Decimal {
        self.cod_limit
    }
}
