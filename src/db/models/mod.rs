//! Database Models
//!
//! Plain row structs (`sqlx::FromRow`) plus the Create/Update payloads the
//! repositories accept. Business rules live in the use-case layer, not here.

pub mod address;
pub mod cart_item;
pub mod category;
pub mod coupon;
pub mod order;
pub mod otp;
pub mod payment;
pub mod product;
pub mod review;
pub mod user;
pub mod wallet;
pub mod wishlist;

pub use address::{Address, AddressCreate, AddressUpdate};
pub use cart_item::{CartItem, CartLine};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use coupon::{Coupon, CouponCreate, CouponUpdate};
pub use order::{
    Order, OrderCreate, OrderItem, OrderItemCreate, OrderStatus, OrderSummary, PaymentMethod,
    PaymentStatus, SalesRow,
};
pub use otp::Otp;
pub use payment::Payment;
pub use product::{Product, ProductCreate, ProductUpdate};
pub use review::{ProductRating, Review, ReviewCreate};
pub use user::{PendingUser, PendingUserCreate, User, UserProfile};
pub use wallet::{Wallet, WalletTransaction, WalletTxnKind};
pub use wishlist::WishlistLine;
