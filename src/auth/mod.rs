//! 认证模块 - JWT + Argon2 认证体系

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtService};
pub use middleware::{CurrentUserExt, require_admin, require_auth};
pub use password::{hash_password, verify_password};
