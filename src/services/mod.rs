//! 外部服务 - 支付网关、邮件、OAuth

pub mod google;
pub mod mailer;
pub mod otp;
pub mod razorpay;

pub use google::{GoogleOauth, GoogleUser};
pub use mailer::Mailer;
pub use otp::generate_code;
pub use razorpay::RazorpayClient;
