/// Server configuration loaded from environment variables.
///
/// All fields except the auth settings have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bearer-token authentication settings.
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// # Panics
    ///
    /// Panics (fail fast at startup) on unparseable values or missing
    /// mandatory auth settings (see [`AuthConfig::from_env`]).
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let auth = AuthConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            auth,
        }
    }
}

/// Authentication settings.
///
/// Auth can be fully disabled for local/dev use, in which case every
/// request acts as a fixed development user identity. When enabled, the
/// issuer, audience, and JWKS URL are all mandatory.
#[derive(Debug, Clone)]
pub enum AuthConfig {
    /// `AUTH_DISABLED=true`: all requests run as `dev_user_id`.
    Disabled { dev_user_id: String },
    /// Bearer tokens verified against the issuer's JWKS document.
    Enabled {
        issuer: String,
        audience: String,
        jwks_url: String,
    },
}

impl AuthConfig {
    /// Load auth settings from environment variables.
    ///
    /// | Env Var            | Required            | Default    |
    /// |--------------------|---------------------|------------|
    /// | `AUTH_DISABLED`    | no                  | `false`    |
    /// | `AUTH_DEV_USER_ID` | no                  | `dev-user` |
    /// | `AUTH_ISSUER`      | when auth enabled   | --         |
    /// | `AUTH_AUDIENCE`    | when auth enabled   | --         |
    /// | `AUTH_JWKS_URL`    | when auth enabled   | --         |
    ///
    /// # Panics
    ///
    /// Panics when auth is enabled and any of the three mandatory
    /// variables is missing.
    pub fn from_env() -> Self {
        let disabled = std::env::var("AUTH_DISABLED")
            .map(|v| v == "true")
            .unwrap_or(false);

        if disabled {
            let dev_user_id =
                std::env::var("AUTH_DEV_USER_ID").unwrap_or_else(|_| "dev-user".into());
            return Self::Disabled { dev_user_id };
        }

        let issuer = std::env::var("AUTH_ISSUER")
            .expect("AUTH_ISSUER must be set when auth is enabled");
        let audience = std::env::var("AUTH_AUDIENCE")
            .expect("AUTH_AUDIENCE must be set when auth is enabled");
        let jwks_url = std::env::var("AUTH_JWKS_URL")
            .expect("AUTH_JWKS_URL must be set when auth is enabled");

        Self::Enabled {
            issuer,
            audience,
            jwks_url,
        }
    }
}
