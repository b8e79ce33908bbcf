//! Repository Module
//!
//! One repository per aggregate, each issuing its own SQL against the shared
//! PostgreSQL pool. Multi-statement flows (checkout, cancellation) receive an
//! explicit transaction connection instead of the pool so the caller owns
//! commit/rollback.

// Auth
pub mod otp;
pub mod user;

// Catalog
pub mod category;
pub mod product;

// Shopping
pub mod address;
pub mod cart;
pub mod coupon;
pub mod wishlist;

// Orders
pub mod order;
pub mod payment;
pub mod wallet;

// Social
pub mod review;

// Re-exports
pub use address::AddressRepository;
pub use cart::CartRepository;
pub use category::CategoryRepository;
pub use coupon::CouponRepository;
pub use order::OrderRepository;
pub use otp::OtpRepository;
pub use payment::PaymentRepository;
pub use product::ProductRepository;
pub use review::ReviewRepository;
pub use user::UserRepository;
pub use wallet::WalletRepository;
pub use wishlist::WishlistRepository;

use sqlx::PgPool;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        // Surface unique-constraint violations as duplicates so callers can
        // answer 409 instead of 500.
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database pool reference
#[derive(Clone)]
pub struct BaseRepository {
    pool: PgPool,
}

impl BaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
