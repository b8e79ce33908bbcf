//! 核心模块 - 配置、状态、服务器

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, GoogleOauthConfig, RazorpayConfig, SmtpConfig};
pub use server::Server;
pub use state::ServerState;
