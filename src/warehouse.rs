//! Data-warehouse client
//!
//! A thin handle bound to one project and dataset, authenticating with the
//! explicitly loaded authorized-user credentials. Token acquisition is
//! deferred to first use, matching the usual cloud-SDK behavior; query and
//! schema operations are out of scope here.

use crate::auth::{AuthError, BearerToken, Credentials};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Client handle for the cloud data warehouse
pub struct WarehouseClient {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
    token: OnceCell<BearerToken>,
    project_id: String,
    dataset_id: String,
}

impl WarehouseClient {
    /// Creates a client bound to the given project and dataset
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        credentials: Arc<Credentials>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            http,
            credentials,
            token: OnceCell::new(),
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    /// Fully-qualified dataset path
    pub fn dataset_path(&self) -> String {
        format!("projects/{}/datasets/{}", self.project_id, self.dataset_id)
    }

    /// Fully-qualified path of a table inside the bound dataset
    pub fn table_path(&self, table: &str) -> String {
        format!("{}/tables/{}", self.dataset_path(), table)
    }

    /// Returns the bearer token, exchanging the refresh token on first use
    ///
    /// The token is acquired at most once and held for the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the exchange fails; subsequent calls retry.
    pub async fn authorize(&self) -> Result<&BearerToken, AuthError> {
        self.token
            .get_or_try_init(|| async {
                debug!(project = %self.project_id, "authorizing warehouse client");
                self.credentials.exchange_for_token(&self.http).await
            })
            .await
    }
}

impl std::fmt::Debug for WarehouseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarehouseClient")
            .field("project_id", &self.project_id)
            .field("dataset_id", &self.dataset_id)
            .field("authorized", &self.token.initialized())
            .finish()
    }
}
