//! HTTP client for the sync server's `/sync/*` surface.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use kanban_core::types::{EntityId, Timestamp};

/// Errors surfaced by the sync transport.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The request never completed (connection, DNS, timeout).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error body.
    #[error("Server rejected request ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// The local workspace or state file could not be written.
    #[error("Local store error: {0}")]
    Store(String),
}

/// A board row as the server returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBoard {
    pub id: EntityId,
    pub title: String,
    pub created_at: Timestamp,
}

/// A column row as the server returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteColumn {
    pub id: EntityId,
    pub board_id: EntityId,
    pub title: String,
    pub position: i32,
    pub created_at: Timestamp,
}

/// A card row as the server returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCard {
    pub id: EntityId,
    pub column_id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: Timestamp,
}

/// Board input for a push batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard {
    pub title: String,
}

/// Column input for a push batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewColumn {
    pub board_id: EntityId,
    pub title: String,
    pub position: i32,
}

/// Card input for a push batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub column_id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
}

#[derive(Serialize)]
struct PushBody<'a, T> {
    items: &'a [T],
}

#[derive(Deserialize)]
struct ItemsBody<T> {
    items: Vec<T>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin typed wrapper over the server's push and pull endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    pub async fn push_boards(&self, items: &[NewBoard]) -> Result<Vec<RemoteBoard>, SyncError> {
        self.push("boards", items).await
    }

    pub async fn push_columns(&self, items: &[NewColumn]) -> Result<Vec<RemoteColumn>, SyncError> {
        self.push("columns", items).await
    }

    pub async fn push_cards(&self, items: &[NewCard]) -> Result<Vec<RemoteCard>, SyncError> {
        self.push("cards", items).await
    }

    pub async fn pull_boards(
        &self,
        since: Option<Timestamp>,
    ) -> Result<Vec<RemoteBoard>, SyncError> {
        self.pull("boards", since).await
    }

    pub async fn pull_columns(
        &self,
        since: Option<Timestamp>,
    ) -> Result<Vec<RemoteColumn>, SyncError> {
        self.pull("columns", since).await
    }

    pub async fn pull_cards(&self, since: Option<Timestamp>) -> Result<Vec<RemoteCard>, SyncError> {
        self.pull("cards", since).await
    }

    async fn push<T: Serialize, R: DeserializeOwned>(
        &self,
        kind: &str,
        items: &[T],
    ) -> Result<Vec<R>, SyncError> {
        let url = format!("{}/sync/{kind}", self.base_url);
        let mut request = self.http.post(&url).json(&PushBody { items });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body: ItemsBody<R> = Self::decode(response).await?;
        Ok(body.items)
    }

    async fn pull<R: DeserializeOwned>(
        &self,
        kind: &str,
        since: Option<Timestamp>,
    ) -> Result<Vec<R>, SyncError> {
        let url = format!("{}/sync/{kind}", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(since) = since {
            request = request.query(&[("since", since.to_rfc3339())]);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body: ItemsBody<R> = Self::decode(response).await?;
        Ok(body.items)
    }

    /// Decode a success body, or turn an error status into [`SyncError::Api`]
    /// using the server's `{"error": ...}` payload when it has one.
    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, SyncError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP {status}"),
        };
        Err(SyncError::Api { status, message })
    }
}
