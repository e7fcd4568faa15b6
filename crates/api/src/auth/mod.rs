//! Bearer-token verification against a remote JWKS document.
//!
//! Token mechanics are deliberately thin: the JWKS is fetched once at
//! startup, RS256 signatures are checked with issuer/audience validation,
//! and the only claim the rest of the server cares about is `sub`.

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use kanban_core::error::CoreError;

use crate::config::AuthConfig;

/// Resolved authentication mode, built from [`AuthConfig`] at startup.
pub enum AuthMode {
    /// Every request acts as this fixed development identity.
    Disabled { dev_user_id: String },
    /// Bearer tokens are verified against the issuer's key set.
    Enabled { verifier: TokenVerifier },
}

impl AuthMode {
    /// Resolve the configured mode, fetching the JWKS when auth is enabled.
    pub async fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        match config {
            AuthConfig::Disabled { dev_user_id } => {
                tracing::warn!(dev_user_id, "Authentication is DISABLED (dev mode)");
                Ok(Self::Disabled {
                    dev_user_id: dev_user_id.clone(),
                })
            }
            AuthConfig::Enabled {
                issuer,
                audience,
                jwks_url,
            } => {
                let verifier = TokenVerifier::fetch(issuer, audience, jwks_url).await?;
                tracing::info!(issuer, jwks_url, "Token verifier initialised");
                Ok(Self::Enabled { verifier })
            }
        }
    }
}

/// Claims the server extracts from a verified access token.
#[derive(Debug, Deserialize)]
pub struct Claims {
    /// Subject -- the caller's user id.
    pub sub: String,
}

/// RS256 token verifier holding the issuer's decoding keys.
pub struct TokenVerifier {
    keys: Vec<(Option<String>, DecodingKey)>,
    validation: Validation,
}

/// A JWKS document as served at the issuer's `jwks_url`.
#[derive(Debug, Deserialize)]
struct JwksDocument {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kty: String,
    #[serde(default)]
    kid: Option<String>,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

impl TokenVerifier {
    /// Fetch the JWKS document and build a verifier from its RSA keys.
    pub async fn fetch(issuer: &str, audience: &str, jwks_url: &str) -> anyhow::Result<Self> {
        let body = reqwest::get(jwks_url)
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::from_jwks_json(&body, issuer, audience)
    }

    /// Build a verifier from a raw JWKS JSON document.
    pub fn from_jwks_json(json: &str, issuer: &str, audience: &str) -> anyhow::Result<Self> {
        let document: JwksDocument = serde_json::from_str(json)?;

        let mut keys = Vec::new();
        for jwk in document.keys {
            if jwk.kty != "RSA" {
                continue;
            }
            let (Some(n), Some(e)) = (&jwk.n, &jwk.e) else {
                continue;
            };
            let key = DecodingKey::from_rsa_components(n, e)?;
            keys.push((jwk.kid, key));
        }
        anyhow::ensure!(!keys.is_empty(), "JWKS document contains no usable RSA keys");

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);

        Ok(Self { keys, validation })
    }

    /// Verify a token and return its claims.
    ///
    /// Keys are matched by `kid` when the token header carries one;
    /// otherwise every key is tried.
    pub fn verify(&self, token: &str) -> Result<Claims, CoreError> {
        let header = decode_header(token)
            .map_err(|e| CoreError::Unauthorized(format!("Malformed token: {e}")))?;

        for (kid, key) in &self.keys {
            if let (Some(want), Some(have)) = (&header.kid, kid) {
                if want != have {
                    continue;
                }
            }
            if let Ok(data) = decode::<Claims>(token, key, &self.validation) {
                return Ok(data.claims);
            }
        }

        Err(CoreError::Unauthorized("Invalid or expired token".into()))
    }
}
