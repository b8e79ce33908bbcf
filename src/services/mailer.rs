//! OTP mail delivery
//!
//! SMTP in production; in development without SMTP credentials the code is
//! logged instead so signup stays testable on a laptop.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::core::SmtpConfig;
use crate::utils::AppError;

pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    pub fn new(config: &SmtpConfig, dev_mode: bool) -> Self {
        let transport = if config.username.is_empty() && dev_mode {
            tracing::warn!("SMTP credentials not set; OTP codes will be logged instead of mailed");
            None
        } else {
            match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host) {
                Ok(builder) => Some(
                    builder
                        .port(config.port)
                        .credentials(Credentials::new(
                            config.username.clone(),
                            config.password.clone(),
                        ))
                        .build(),
                ),
                Err(e) => {
                    tracing::error!(error = %e, host = %config.host, "SMTP relay setup failed");
                    None
                }
            }
        };

        Self {
            transport,
            from: config.from.clone(),
        }
    }

    /// Send the one-time code for signup verification.
    pub async fn send_otp(&self, to: &str, code: &str) -> Result<(), AppError> {
        let Some(transport) = &self.transport else {
            tracing::info!(email = %to, code = %code, "OTP issued (dev mode, not mailed)");
            return Ok(());
        };

        let from: Mailbox = self
            .from
            .parse()
            .map_err(|e| AppError::internal(format!("SMTP_FROM is not a valid address: {e}")))?;
        let to: Mailbox = to
            .parse()
            .map_err(|_| AppError::validation("recipient email is not a valid address"))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject("Your verification code")
            .body(format!(
                "Your verification code is {code}. It expires in 10 minutes."
            ))
            .map_err(|e| AppError::internal(format!("Failed to build OTP mail: {e}")))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::internal(format!("Failed to send OTP mail: {e}")))?;

        Ok(())
    }
}
