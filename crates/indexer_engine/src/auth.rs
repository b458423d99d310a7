use std::time::Duration;

use chrono::Utc;
use indexer_logging::{indexer_debug, indexer_info};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::credential::ServiceAccountKey;

pub const INDEXING_SCOPE: &str = "https://www.googleapis.com/auth/indexing";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens this close to expiry are refreshed before use.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("could not sign token assertion: {0}")]
    Signing(String),
    #[error("token request failed: {0}")]
    Request(String),
    #[error("token endpoint rejected the credential ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected token response: {0}")]
    InvalidResponse(String),
}

/// Supplies bearer tokens for the indexing endpoint.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, AuthError>;
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: i64,
}

/// OAuth2 service-account flow: a signed RS256 assertion is exchanged for
/// a short-lived access token, which is cached until shortly before expiry.
pub struct ServiceAccountTokenSource {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    token_uri: String,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    pub fn new(
        key: ServiceAccountKey,
        token_uri: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|err| AuthError::Signing(err.to_string()))?;
        let token_uri = token_uri.unwrap_or_else(|| key.token_uri().to_string());
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AuthError::Request(err.to_string()))?;
        Ok(Self {
            key,
            encoding_key,
            token_uri,
            client,
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    fn assertion(&self, now: i64) -> Result<String, AuthError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: INDEXING_SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|err| AuthError::Signing(err.to_string()))
    }

    async fn exchange(&self, now: i64) -> Result<CachedToken, AuthError> {
        let assertion = self.assertion(now)?;
        indexer_debug!("Requesting access token from {}", self.token_uri);
        let response = self
            .client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|err| AuthError::Request(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AuthError::Request(err.to_string()))?;
        if !status.is_success() {
            let message = serde_json::from_str::<TokenErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error_description.or(parsed.error))
                .unwrap_or_else(|| status.to_string());
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|err| AuthError::InvalidResponse(err.to_string()))?;
        let lifetime = parsed.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        indexer_info!(
            "Obtained access token for {} (valid {}s)",
            self.key.client_email,
            lifetime
        );
        Ok(CachedToken {
            value: parsed.access_token,
            expires_at: now + lifetime,
        })
    }
}

#[async_trait::async_trait]
impl TokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at - EXPIRY_MARGIN_SECS > now {
                return Ok(token.value.clone());
            }
        }
        let fresh = self.exchange(now).await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }
}
