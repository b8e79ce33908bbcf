use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{Mailer, RazorpayClient};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是整个后端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | PgPool | PostgreSQL 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | mailer | Arc<Mailer> | OTP 邮件服务 |
/// | gateway | Arc<RazorpayClient> | 支付网关客户端 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// PostgreSQL 连接池
    pub pool: PgPool,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// OTP 邮件服务
    pub mailer: Arc<Mailer>,
    /// 支付网关客户端
    pub gateway: Arc<RazorpayClient>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库连接池 + 迁移
    /// 2. JWT / 邮件 / 支付网关服务
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let mailer = Arc::new(Mailer::new(&config.smtp, config.is_development()));
        let gateway = Arc::new(RazorpayClient::new(config.razorpay.clone()));

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            jwt_service,
            mailer,
            gateway,
        })
    }

    /// 获取数据库连接池
    pub fn get_pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
