//! Shared context with memoized credential and client accessors
//!
//! [`GcpContext`] replaces ambient process-wide singletons: it owns the
//! configuration and three lazily-initialized slots (credentials, warehouse
//! client, generative client) and is passed explicitly to whatever needs
//! them. Each slot fills at most once; concurrent first access is serialized
//! by the cell, and a failed fill leaves the slot empty so the next call
//! retries.
//!
//! Nothing here refreshes or invalidates: a long-running process keeps the
//! same credentials and clients for its entire lifetime.

use crate::auth::{CredentialError, Credentials};
use crate::config::ConvotagConfig;
use crate::llm::{LlmError, VertexClient};
use crate::warehouse::WarehouseClient;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::debug;

/// Errors surfaced by the context accessors
#[derive(Debug, Error)]
pub enum ContextError {
    /// Credential file could not be loaded
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Client construction failed (token exchange, transport)
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Explicit holder for the process-lifetime credentials and client handles
pub struct GcpContext {
    config: ConvotagConfig,
    http: reqwest::Client,
    credentials: OnceCell<Arc<Credentials>>,
    warehouse: OnceCell<Arc<WarehouseClient>>,
    generative: OnceCell<Arc<VertexClient>>,
}

impl GcpContext {
    /// Creates a context; no file or network access happens until the first
    /// accessor call
    pub fn new(config: ConvotagConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            credentials: OnceCell::new(),
            warehouse: OnceCell::new(),
            generative: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ConvotagConfig {
        &self.config
    }

    /// Loads the authorized-user credentials, reading the file at most once
    ///
    /// Repeated calls return the same `Arc` instance. A failed load leaves
    /// the slot empty, so every later accessor call fails the same way until
    /// the file becomes readable.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` for a missing/unreadable file, malformed
    /// JSON, or absent authorization fields.
    pub async fn credentials(&self) -> Result<Arc<Credentials>, CredentialError> {
        self.credentials
            .get_or_try_init(|| async {
                debug!(path = %self.config.adc_path.display(), "loading credentials file");
                Credentials::from_authorized_user_file(&self.config.adc_path).map(Arc::new)
            })
            .await
            .cloned()
    }

    /// Returns the data-warehouse client, constructing it on first call
    ///
    /// # Errors
    ///
    /// Returns `ContextError::Credential` when the underlying credential
    /// load fails.
    pub async fn warehouse_client(&self) -> Result<Arc<WarehouseClient>, ContextError> {
        self.warehouse
            .get_or_try_init(|| async {
                let credentials = self.credentials().await?;
                debug!(project = %self.config.project_id, "constructing warehouse client");
                Ok::<_, ContextError>(Arc::new(WarehouseClient::new(
                    self.config.project_id.clone(),
                    self.config.dataset_id.clone(),
                    credentials,
                    self.http.clone(),
                )))
            })
            .await
            .cloned()
    }

    /// Returns the generative-AI client, constructing it on first call
    ///
    /// Construction includes the one-time refresh-token exchange, so this is
    /// where invalid credentials surface as `LlmError::Authentication`.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::Credential` when the file load fails and
    /// `ContextError::Llm` when the token exchange or client setup fails.
    pub async fn generative_client(&self) -> Result<Arc<VertexClient>, ContextError> {
        self.generative
            .get_or_try_init(|| async {
                let credentials = self.credentials().await?;
                debug!(
                    project = %self.config.project_id,
                    location = %self.config.location,
                    "constructing generative client"
                );
                let client = VertexClient::connect(
                    &self.config.project_id,
                    &self.config.location,
                    &self.config.model,
                    self.config.request_timeout(),
                    &credentials,
                    &self.http,
                )
                .await?;
                Ok::<_, ContextError>(Arc::new(client))
            })
            .await
            .cloned()
    }
}

impl std::fmt::Debug for GcpContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcpContext")
            .field("project_id", &self.config.project_id)
            .field("credentials_loaded", &self.credentials.initialized())
            .field("warehouse_ready", &self.warehouse.initialized())
            .field("generative_ready", &self.generative.initialized())
            .finish()
    }
}
