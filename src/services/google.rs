//! Google OAuth client
//!
//! Code exchange and userinfo fetch for the OAuth login flow.

use serde::Deserialize;

use crate::core::GoogleOauthConfig;
use crate::utils::AppError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Subset of the userinfo payload we care about
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUser {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

pub struct GoogleOauth {
    http: reqwest::Client,
    config: GoogleOauthConfig,
}

impl GoogleOauth {
    pub fn new(config: GoogleOauthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// The consent-screen URL the client is redirected to.
    pub fn authorize_url(&self) -> String {
        format!(
            "{AUTH_URL}?client_id={}&redirect_uri={}&response_type=code&scope=openid%20email%20profile",
            self.config.client_id, self.config.redirect_url
        )
    }

    /// Exchange the callback code for an access token and fetch the profile.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleUser, AppError> {
        if self.config.client_id.is_empty() {
            return Err(AppError::internal("Google OAuth is not configured"));
        }

        let token: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::internal(format!("OAuth token exchange failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::invalid(format!("OAuth code rejected: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::internal(format!("OAuth token response malformed: {e}")))?;

        let user: GoogleUser = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("OAuth userinfo fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::internal(format!("OAuth userinfo rejected: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::internal(format!("OAuth userinfo malformed: {e}")))?;

        Ok(user)
    }
}
