//! convotag - LLM-powered classification of e-commerce customer conversations
//!
//! This library wires up Google Cloud credentials and issues function-calling
//! requests to a hosted generative model, asking it to classify a customer
//! conversation through a fixed `update_session` tool schema (summary,
//! sentiment/urgency/purchase scores, intent and subintent codes, suggested
//! replies, conversation tags).
//!
//! # Core Concepts
//!
//! - **Context**: [`GcpContext`] owns the configuration and the memoized,
//!   construct-once credential and client handles; pass it explicitly instead
//!   of relying on process-wide globals
//! - **Classifier**: [`SessionClassifier`] builds the tool declarations and
//!   performs the single request/response round trip
//! - **Taxonomy**: [`Intent`]/[`Subintent`] code tables are the single source
//!   of truth for the schema's enum values
//!
//! # Example Usage
//!
//! ```ignore
//! use convotag::{ConvotagConfig, GcpContext, SessionClassifier, SessionUpdate};
//!
//! async fn classify() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConvotagConfig::default();
//!     config.validate()?;
//!
//!     let context = GcpContext::new(config);
//!     let classifier = SessionClassifier::from_context(&context).await?;
//!
//!     let response = classifier
//!         .generate_with_tools("顧客：我上週下的訂單現在到哪了？")
//!         .await?;
//!
//!     if let Some(call) = response.tool_calls.first() {
//!         let update = SessionUpdate::from_tool_call(call)?;
//!         println!("intent: {}", update.intent);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod classifier;
pub mod config;
pub mod context;
pub mod llm;
pub mod session;
pub mod taxonomy;
pub mod util;
pub mod warehouse;

// Re-export key types for convenient access
pub use auth::{AuthError, BearerToken, CredentialError, Credentials};
pub use classifier::{SessionClassifier, CLASSIFIER_TEMPERATURE};
pub use config::{ConfigError, ConvotagConfig};
pub use context::{ContextError, GcpContext};
pub use llm::{
    GenerateRequest, GenerateResponse, LlmClient, LlmError, MockLlmClient, MockResponse, ToolCall,
    ToolDefinition, VertexClient,
};
pub use session::{build_session_update_tool, SessionUpdate, ValidationError, SESSION_UPDATE_TOOL};
pub use taxonomy::{Intent, Subintent};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};
pub use warehouse::WarehouseClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
