//! `kanban-sync` -- background sync agent for the KanbanBoard app.
//!
//! Loads the local workspace document, pushes entities the server has
//! not seen, pulls records created since the last cycle, and writes the
//! merged workspace and its sync bookkeeping back to disk. Repeats on
//! an interval.
//!
//! # Environment variables
//!
//! | Variable             | Required | Default    | Description                          |
//! |----------------------|----------|------------|--------------------------------------|
//! | `KANBAN_API_URL`     | yes      | --         | Server base URL, e.g. `http://localhost:8000` |
//! | `KANBAN_API_TOKEN`   | no       | --         | Bearer token (omit when the server runs with auth disabled) |
//! | `KANBAN_DATA_DIR`    | no       | `.`        | Directory holding the workspace document |
//! | `KANBAN_USER_ID`     | no       | `dev-user` | Identity the workspace belongs to    |
//! | `SYNC_INTERVAL_SECS` | no       | `300`      | Seconds between sync cycles          |

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kanban_core::store::LocalStore;
use kanban_sync::api::ApiClient;
use kanban_sync::config::SyncConfig;
use kanban_sync::state::SyncState;
use kanban_sync::{pull, push};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kanban_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SyncConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        data_dir = %config.data_dir.display(),
        user_id = %config.user_id,
        interval_secs = config.interval_secs,
        "Starting kanban-sync",
    );

    let store = LocalStore::new(config.data_dir.clone()).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Cannot open data directory");
        std::process::exit(1);
    });
    let client = ApiClient::new(config.api_url.clone(), config.api_token.clone());
    let interval = Duration::from_secs(config.interval_secs);

    loop {
        run_cycle(&store, &client, &config).await;
        tokio::time::sleep(interval).await;
    }
}

/// One push + pull cycle. Failures are logged and retried next cycle;
/// the workspace on disk stays untouched unless the pull merged
/// something.
async fn run_cycle(store: &LocalStore, client: &ApiClient, config: &SyncConfig) {
    let mut workspace = store.load(&config.user_id);
    let mut state = SyncState::load(&config.data_dir);

    match push::run(client, &workspace, &mut state).await {
        Ok(report) => {
            if report != Default::default() {
                tracing::debug!(?report, "Pushed local entities");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Push cycle failed, will retry");
            return;
        }
    }

    let merged = match pull::run(client, &mut workspace, &mut state).await {
        Ok(report) => report != Default::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Pull cycle failed, will retry");
            return;
        }
    };

    if merged {
        if let Err(e) = store.save(&workspace) {
            tracing::warn!(error = %e, "Failed to persist merged workspace");
            return;
        }
    }

    if let Err(e) = state.save(&config.data_dir) {
        tracing::warn!(error = %e, "Failed to persist sync state");
    }
}
