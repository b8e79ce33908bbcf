//! Coral Commerce - 自托管电商后端
//!
//! # 架构概述
//!
//! 本模块是后端的主入口，提供以下核心功能：
//!
//! - **HTTP API** (`api`): RESTful API 接口 (用户 / 管理员 / 公共浏览)
//! - **数据库** (`db`): PostgreSQL 存储，仓储层每个聚合一个结构体
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **订单** (`orders`): 下单 / 取消 / 退货的事务性用例与状态机
//! - **外部服务** (`services`): 支付网关、OTP 邮件、OAuth
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、密码哈希、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! ├── orders/        # 订单业务层 (状态机 + 事务用例)
//! ├── services/      # 支付网关、邮件、OAuth
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrdersManager;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(level.as_deref(), std::env::var("LOG_DIR").ok().as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   ______                __
  / ____/___  _________ _/ /
 / /   / __ \/ ___/ __ `/ /
/ /___/ /_/ / /  / /_/ / /
\____/\____/_/   \__,_/_/
   ______
  / ____/___  ____ ___  ____ ___  ___  _____________
 / /   / __ \/ __ `__ \/ __ `__ \/ _ \/ ___/ ___/ _ \
/ /___/ /_/ / / / / / / / / / / /  __/ /  / /__/  __/
\____/\____/_/ /_/ /_/_/ /_/ /_/\___/_/   \___/\___/
    "#
    );
}
