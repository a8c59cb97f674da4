//! Client-credentials sessions against the tenant's token endpoint.

use std::sync::Arc;
use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};
use url::Url;

use super::dto::{TokenRequest, TokenResponse};
use crate::domain::DomainError;

/// Tokens are renewed this long before they expire.
const EXPIRY_LEEWAY: Duration = Duration::from_secs(30);

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(86_400);

/// Machine-to-machine application credentials.
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

struct CachedToken {
    value: SecretString,
    renew_at: Instant,
}

/// Bearer token source for one audience.
///
/// The token is requested when the session is opened and renewed lazily once
/// it is about to expire. A failed renewal is returned to the caller as is.
pub struct TokenSession {
    http: reqwest::Client,
    token_url: Url,
    audience: String,
    credentials: Arc<ClientCredentials>,
    cached: Mutex<CachedToken>,
}

impl TokenSession {
    /// Authenticate against `token_url` for `audience`.
    ///
    /// # Errors
    ///
    /// - `Token` if the token endpoint cannot be reached
    /// - `TokenRejected` if it answers with a non-success status
    pub async fn open(
        http: reqwest::Client,
        token_url: Url,
        audience: impl Into<String>,
        credentials: Arc<ClientCredentials>,
    ) -> Result<Self, DomainError> {
        let audience = audience.into();
        let token = request_token(&http, &token_url, &audience, &credentials).await?;
        Ok(Self {
            http,
            token_url,
            audience,
            credentials,
            cached: Mutex::new(token),
        })
    }

    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Current bearer token, renewed first if it is about to expire.
    ///
    /// # Errors
    ///
    /// Same as [`TokenSession::open`] when a renewal is needed.
    pub async fn bearer(&self) -> Result<SecretString, DomainError> {
        let mut cached = self.cached.lock().await;
        if Instant::now() >= cached.renew_at {
            debug!(audience = %self.audience, "Access token about to expire, renewing");
            *cached =
                request_token(&self.http, &self.token_url, &self.audience, &self.credentials)
                    .await?;
        }
        Ok(SecretString::from(cached.value.expose_secret().to_owned()))
    }
}

impl std::fmt::Debug for TokenSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSession")
            .field("token_url", &self.token_url.as_str())
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

#[instrument(skip(http, token_url, credentials), fields(token_url = %token_url))]
async fn request_token(
    http: &reqwest::Client,
    token_url: &Url,
    audience: &str,
    credentials: &ClientCredentials,
) -> Result<CachedToken, DomainError> {
    let body = TokenRequest {
        grant_type: "client_credentials",
        client_id: &credentials.client_id,
        client_secret: credentials.client_secret.expose_secret(),
        audience,
    };

    let token_error = |source: reqwest::Error| DomainError::Token {
        audience: audience.to_owned(),
        source,
    };

    let resp = http
        .post(token_url.clone())
        .json(&body)
        .send()
        .await
        .map_err(token_error)?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(DomainError::TokenRejected {
            audience: audience.to_owned(),
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = resp.json().await.map_err(token_error)?;
    let lifetime = token
        .expires_in
        .map_or(DEFAULT_TOKEN_LIFETIME, Duration::from_secs);
    debug!(lifetime_secs = lifetime.as_secs(), "Access token issued");

    Ok(CachedToken {
        value: SecretString::from(token.access_token),
        renew_at: renew_deadline(Instant::now(), lifetime),
    })
}

/// When a token issued at `issued` with `lifetime` must be renewed.
///
/// Lifetimes too large to represent fall back to the default one.
fn renew_deadline(issued: Instant, lifetime: Duration) -> Instant {
    issued
        .checked_add(lifetime.saturating_sub(EXPIRY_LEEWAY))
        .unwrap_or_else(|| {
            warn!(
                lifetime_secs = lifetime.as_secs(),
                "Token lifetime out of range, using the default"
            );
            issued + DEFAULT_TOKEN_LIFETIME.saturating_sub(EXPIRY_LEEWAY)
        })
}
