//! OAuth2 authorization-code flow
//!
//! Code exchange, refresh and revocation against the platform's
//! `/oauth2/token` endpoints, plus PKCE (S256) and authorize-URL helpers.
//! These run outside the rate-limit buckets; they are handshake-time
//! calls, not bot traffic.

mod pkce;

pub use pkce::PkcePair;

use serde::{Deserialize, Serialize};
use tracing::debug;
use unicord_common::{Error, Result};
use unicord_core::User;
use uuid::Uuid;

use crate::client::encode_segment;

/// Static parameters of an OAuth2 application
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    /// Absent for public (PKCE-only) clients
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub api_base_url: String,
}

/// Token set returned by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub scope: String,
}

/// Result of a full code exchange: tokens plus the authorizing user
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub tokens: TokenResponse,
    pub user: User,
}

/// Random state parameter for the authorize redirect
#[must_use]
pub fn new_state() -> String {
    Uuid::new_v4().to_string()
}

/// Build the authorize URL the user is redirected to
#[must_use]
pub fn authorize_url(
    config: &OAuthConfig,
    scopes: &[&str],
    state: &str,
    pkce: Option<&PkcePair>,
) -> String {
    let mut url = format!(
        "{}/oauth2/authorize?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}",
        config.api_base_url,
        encode_segment(&config.client_id),
        encode_segment(&config.redirect_uri),
        encode_segment(&scopes.join(" ")),
        encode_segment(state),
    );
    if let Some(pkce) = pkce {
        url.push_str("&code_challenge_method=S256&code_challenge=");
        url.push_str(encode_segment(&pkce.challenge).as_str());
    }
    url
}

/// Exchange an authorization code for tokens
pub async fn exchange_code(
    config: &OAuthConfig,
    code: &str,
    verifier: Option<&str>,
) -> Result<TokenResponse> {
    let mut params = vec![
        ("grant_type", "authorization_code".to_string()),
        ("client_id", config.client_id.clone()),
        ("code", code.to_string()),
        ("redirect_uri", config.redirect_uri.clone()),
    ];
    if let Some(secret) = &config.client_secret {
        params.push(("client_secret", secret.clone()));
    }
    if let Some(verifier) = verifier {
        params.push(("code_verifier", verifier.to_string()));
    }
    debug!(client_id = %config.client_id, "exchanging authorization code");
    token_request(config, &params).await
}

/// Exchange a code, then fetch the authorizing user with the new token
pub async fn exchange_code_with_user(
    config: &OAuthConfig,
    code: &str,
    verifier: Option<&str>,
) -> Result<AuthenticatedUser> {
    let tokens = exchange_code(config, code, verifier).await?;

    let response = reqwest::Client::new()
        .get(format!("{}/users/@me", config.api_base_url))
        .bearer_auth(&tokens.access_token)
        .send()
        .await
        .map_err(Error::transport)?;
    if !response.status().is_success() {
        return Err(Error::OAuth(format!(
            "user lookup failed with status {}",
            response.status().as_u16()
        )));
    }
    let user = response.json::<User>().await.map_err(Error::transport)?;

    Ok(AuthenticatedUser { tokens, user })
}

/// Trade a refresh token for a fresh token set
pub async fn refresh_token(config: &OAuthConfig, refresh_token: &str) -> Result<TokenResponse> {
    let mut params = vec![
        ("grant_type", "refresh_token".to_string()),
        ("client_id", config.client_id.clone()),
        ("refresh_token", refresh_token.to_string()),
    ];
    if let Some(secret) = &config.client_secret {
        params.push(("client_secret", secret.clone()));
    }
    debug!(client_id = %config.client_id, "refreshing access token");
    token_request(config, &params).await
}

/// Revoke an access or refresh token
pub async fn revoke_token(config: &OAuthConfig, token: &str) -> Result<()> {
    let mut params = vec![
        ("client_id", config.client_id.clone()),
        ("token", token.to_string()),
    ];
    if let Some(secret) = &config.client_secret {
        params.push(("client_secret", secret.clone()));
    }

    let response = reqwest::Client::new()
        .post(format!("{}/oauth2/token/revoke", config.api_base_url))
        .form(&params)
        .send()
        .await
        .map_err(Error::transport)?;
    if !response.status().is_success() {
        return Err(Error::OAuth(format!(
            "revocation failed with status {}",
            response.status().as_u16()
        )));
    }
    Ok(())
}

async fn token_request(
    config: &OAuthConfig,
    params: &[(&str, String)],
) -> Result<TokenResponse> {
    let response = reqwest::Client::new()
        .post(format!("{}/oauth2/token", config.api_base_url))
        .form(params)
        .send()
        .await
        .map_err(Error::transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::OAuth(format!(
            "token endpoint returned {}: {body}",
            status.as_u16()
        )));
    }
    response
        .json::<TokenResponse>()
        .await
        .map_err(Error::transport)
}
