//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册、OTP、登录、OAuth
//! - [`users`] - 个人资料与收货地址
//! - [`categories`] - 分类浏览与管理
//! - [`products`] - 商品浏览与管理
//! - [`cart`] - 购物车
//! - [`orders`] - 下单、取消、退货
//! - [`payments`] - 支付网关对接
//! - [`coupons`] - 优惠券
//! - [`wallet`] - 钱包与流水
//! - [`wishlist`] - 心愿单
//! - [`reviews`] - 商品评价
//! - [`admin`] - 用户管理、订单管理、销售报表

pub mod auth;
pub mod health;

// Shopping API
pub mod cart;
pub mod categories;
pub mod coupons;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod users;
pub mod wallet;
pub mod wishlist;

// Admin API
pub mod admin;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

use serde::Deserialize;

/// Shared pagination query (`?page=1&limit=20`)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    const DEFAULT_LIMIT: i64 = 20;
    const MAX_LIMIT: i64 = 100;

    /// Clamp to sane bounds and convert to LIMIT/OFFSET
    pub fn limit_offset(self) -> (i64, i64) {
        let limit = self
            .limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT);
        let page = self.page.unwrap_or(1).max(1);
        (limit, (page - 1) * limit)
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn pagination_defaults_and_clamps() {
        let (limit, offset) = Pagination {
            page: None,
            limit: None,
        }
        .limit_offset();
        assert_eq!((limit, offset), (20, 0));

        let (limit, offset) = Pagination {
            page: Some(3),
            limit: Some(500),
        }
        .limit_offset();
        assert_eq!((limit, offset), (100, 200));

        let (limit, offset) = Pagination {
            page: Some(0),
            limit: Some(0),
        }
        .limit_offset();
        assert_eq!((limit, offset), (1, 0));
    }
}
