use rust_decimal::Decimal;

use crate::auth::JwtConfig;

/// 服务器配置 - 电商后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_URL | - | PostgreSQL 连接串 (必填) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | COD_LIMIT | 1000 | 货到付款金额上限 |
/// | SMTP_HOST / SMTP_PORT / SMTP_USERNAME / SMTP_PASSWORD / SMTP_FROM | - | OTP 邮件 |
/// | RAZORPAY_KEY_ID / RAZORPAY_KEY_SECRET | - | 支付网关 |
/// | GOOGLE_CLIENT_ID / GOOGLE_CLIENT_SECRET / GOOGLE_REDIRECT_URL | - | OAuth 登录 |
///
/// JWT 相关变量见 [`JwtConfig`]。
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// PostgreSQL 连接串
    pub database_url: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 货到付款 (COD) 金额上限
    pub cod_limit: Decimal,
    /// SMTP 配置 (OTP 邮件)
    pub smtp: SmtpConfig,
    /// 支付网关配置
    pub razorpay: RazorpayConfig,
    /// Google OAuth 配置
    pub google: GoogleOauthConfig,
}

/// SMTP 配置
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

/// 支付网关配置
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
}

/// Google OAuth 配置
#[derive(Debug, Clone)]
pub struct GoogleOauthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值。`DATABASE_URL` 缺失时返回错误。
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable must be set".to_string())?;

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url,
            environment: env_or("ENVIRONMENT", "development"),
            log_level: env_or("LOG_LEVEL", "info"),
            jwt: JwtConfig::from_env()?,
            cod_limit: std::env::var("COD_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Decimal::new(1000, 0)),
            smtp: SmtpConfig {
                host: env_or("SMTP_HOST", "localhost"),
                port: std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587),
                username: env_or("SMTP_USERNAME", ""),
                password: env_or("SMTP_PASSWORD", ""),
                from: env_or("SMTP_FROM", "no-reply@localhost"),
            },
            razorpay: RazorpayConfig {
                key_id: env_or("RAZORPAY_KEY_ID", ""),
                key_secret: env_or("RAZORPAY_KEY_SECRET", ""),
            },
            google: GoogleOauthConfig {
                client_id: env_or("GOOGLE_CLIENT_ID", ""),
                client_secret: env_or("GOOGLE_CLIENT_SECRET", ""),
                redirect_url: env_or(
                    "GOOGLE_REDIRECT_URL",
                    "http://localhost:3000/api/auth/google/callback",
                ),
            },
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
