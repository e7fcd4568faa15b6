use std::path::PathBuf;

/// Sync agent configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the sync server, e.g. `http://localhost:8000`.
    pub api_url: String,
    /// Bearer token sent on every request. Absent when the server runs
    /// with auth disabled.
    pub api_token: Option<String>,
    /// Directory holding the workspace document and the sync state file.
    pub data_dir: PathBuf,
    /// Identity the local workspace belongs to.
    pub user_id: String,
    /// Seconds between sync cycles.
    pub interval_secs: u64,
}

impl SyncConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Required | Default    |
    /// |----------------------|----------|------------|
    /// | `KANBAN_API_URL`     | yes      | --         |
    /// | `KANBAN_API_TOKEN`   | no       | --         |
    /// | `KANBAN_DATA_DIR`    | no       | `.`        |
    /// | `KANBAN_USER_ID`     | no       | `dev-user` |
    /// | `SYNC_INTERVAL_SECS` | no       | `300`      |
    ///
    /// # Panics
    ///
    /// Panics (fail fast at startup) when `KANBAN_API_URL` is missing or
    /// `SYNC_INTERVAL_SECS` is unparseable.
    pub fn from_env() -> Self {
        let api_url = std::env::var("KANBAN_API_URL")
            .expect("KANBAN_API_URL must be set")
            .trim_end_matches('/')
            .to_string();

        let api_token = std::env::var("KANBAN_API_TOKEN").ok();

        let data_dir = std::env::var("KANBAN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let user_id = std::env::var("KANBAN_USER_ID").unwrap_or_else(|_| "dev-user".into());

        let interval_secs: u64 = std::env::var("SYNC_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("SYNC_INTERVAL_SECS must be a valid u64");

        Self {
            api_url,
            api_token,
            data_dir,
            user_id,
            interval_secs,
        }
    }
}
