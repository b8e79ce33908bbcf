//! Payment gateway client
//!
//! Creates remote order intents over the gateway's REST API and verifies the
//! HMAC-SHA256 signature the client echoes back after paying.

use ring::hmac;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::json;

use crate::core::RazorpayConfig;
use crate::utils::AppError;

const GATEWAY_BASE_URL: &str = "https://api.razorpay.com/v1";

#[derive(Debug, Deserialize)]
struct GatewayOrder {
    id: String,
}

/// Razorpay REST client
pub struct RazorpayClient {
    http: reqwest::Client,
    config: RazorpayConfig,
}

impl RazorpayClient {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn ensure_configured(&self) -> Result<(), AppError> {
        if self.config.key_id.is_empty() || self.config.key_secret.is_empty() {
            return Err(AppError::internal(
                "payment gateway credentials are not configured",
            ));
        }
        Ok(())
    }

    /// Create a remote order intent and return the gateway's order id.
    ///
    /// The gateway expects the amount in the currency's smallest unit.
    pub async fn create_order(&self, amount: Decimal, receipt: &str) -> Result<String, AppError> {
        self.ensure_configured()?;

        let paise = (amount * Decimal::ONE_HUNDRED)
            .trunc()
            .to_i64()
            .ok_or_else(|| AppError::internal(format!("order amount out of range: {amount}")))?;

        let body = json!({
            "amount": paise,
            "currency": "INR",
            "receipt": receipt,
        });

        let response = self
            .http
            .post(format!("{GATEWAY_BASE_URL}/orders"))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("payment gateway request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%status, %detail, "Payment gateway rejected order creation");
            return Err(AppError::internal(format!(
                "payment gateway returned {status}"
            )));
        }

        let order: GatewayOrder = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("payment gateway response malformed: {e}")))?;

        Ok(order.id)
    }

    /// Verify the client-supplied signature over `"{order_id}|{payment_id}"`.
    ///
    /// The comparison runs through `ring::hmac::verify`, which is
    /// constant-time.
    pub fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature_hex: &str,
    ) -> bool {
        verify_signature_with_secret(
            &self.config.key_secret,
            gateway_order_id,
            gateway_payment_id,
            signature_hex,
        )
    }
}

fn verify_signature_with_secret(
    secret: &str,
    gateway_order_id: &str,
    gateway_payment_id: &str,
    signature_hex: &str,
) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };

    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let message = format!("{gateway_order_id}|{gateway_payment_id}");
    hmac::verify(&key, message.as_bytes(), &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
        let tag = hmac::sign(&key, format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(tag.as_ref())
    }

    #[test]
    fn valid_signature_verifies() {
        let sig = sign("shh", "order_123", "pay_456");
        assert!(verify_signature_with_secret("shh", "order_123", "pay_456", &sig));
    }

    #[test]
    fn wrong_secret_or_ids_fail() {
        let sig = sign("shh", "order_123", "pay_456");
        assert!(!verify_signature_with_secret("other", "order_123", "pay_456", &sig));
        assert!(!verify_signature_with_secret("shh", "order_999", "pay_456", &sig));
        assert!(!verify_signature_with_secret("shh", "order_123", "pay_999", &sig));
    }

    #[test]
    fn malformed_hex_fails_closed() {
        assert!(!verify_signature_with_secret("shh", "order_123", "pay_456", "zz-not-hex"));
        assert!(!verify_signature_with_secret("shh", "order_123", "pay_456", ""));
    }
}
