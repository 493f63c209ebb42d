//! The `update_session` tool schema and its typed payload
//!
//! The schema is pure data, rebuilt deterministically on every call. Its
//! `intent`/`subintent` enum values are generated from [`crate::taxonomy`],
//! which is the single source of truth for the classification scheme.

use crate::llm::{ToolCall, ToolDefinition};
use crate::taxonomy::{Intent, Subintent};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Name of the session-update tool as declared to the model
pub const SESSION_UPDATE_TOOL: &str = "update_session";

/// Upper bound on subintents per classification
pub const MAX_SUBINTENTS: usize = 3;

/// Bounds on suggested replies per classification
pub const MIN_SUGGESTED_RESPONSES: usize = 1;
pub const MAX_SUGGESTED_RESPONSES: usize = 3;

/// The ten fields the model must always populate
pub const REQUIRED_FIELDS: [&str; 10] = [
    "session_end",
    "session_summary_user",
    "consumer_sentiment_score",
    "consumer_urgency_score",
    "consumer_purchase_potential_score",
    "potential_interest_products",
    "intent",
    "subintent",
    "suggested_responses",
    "customer_conversation_tags",
];

/// Builds the `update_session` tool declaration
///
/// Deterministic and free of I/O: repeated calls produce structurally
/// identical schema data.
pub fn build_session_update_tool() -> ToolDefinition {
    let intent_values: Vec<String> = Intent::ALL.iter().map(Intent::schema_value).collect();
    let subintent_values: Vec<String> =
        Subintent::ALL.iter().map(Subintent::schema_value).collect();

    let intent_description = format!(
        "將使用者最新的對話分類到以下其中一個主要意圖：{}",
        Intent::ALL
            .iter()
            .map(Intent::schema_value)
            .collect::<Vec<_>>()
            .join(", ")
    );

    ToolDefinition::new(
        SESSION_UPDATE_TOOL,
        "依據電商對話，更新整體摘要、分數與建議回覆。這是主要的工具",
        json!({
            "type": "object",
            "properties": {
                "session_end": {
                    "type": "boolean",
                    "description": "是否結束對話，如果為 True，則會將對話結束，並回傳整體摘要、分數與建議回覆。",
                },
                "session_summary_user": {
                    "type": "string",
                    "description": "從過往對話紀錄摘要對話內容。",
                },
                "consumer_sentiment_score": {"type": "integer"},
                "consumer_urgency_score": {"type": "integer"},
                "consumer_purchase_potential_score": {"type": "integer"},
                "potential_interest_products": {
                    "type": "array",
                    "items": {"type": "string"},
                },
                "intent": {
                    "type": "string",
                    "description": intent_description,
                    "enum": intent_values,
                },
                "subintent": {
                    "type": "array",
                    "items": {"type": "string"},
                    "maxItems": MAX_SUBINTENTS,
                    "description": "根據主要意圖，列出相關的子意圖（最多3個）。",
                    "enum": subintent_values,
                },
                "suggested_responses": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "建議回覆，可以是多個字串，最多3個。",
                    "minItems": MIN_SUGGESTED_RESPONSES,
                    "maxItems": MAX_SUGGESTED_RESPONSES,
                },
                "customer_conversation_tags": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "基於過往對話標籤和新訊息更新客戶對話標籤。如果沒有合適的既有標籤，請根據對話內容產生新的標籤。保留有意義的舊標籤。",
                },
            },
            "required": REQUIRED_FIELDS,
        }),
    )
}

/// Violations of the `update_session` contract
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The tool call targets a different tool
    #[error("tool call '{0}' is not an update_session invocation")]
    WrongTool(String),

    /// The arguments do not deserialize into the expected shape
    #[error("update_session arguments did not match the schema: {0}")]
    Malformed(#[from] serde_json::Error),

    /// An array field is outside its declared bounds
    #[error("'{field}' has {actual} items, allowed range is {min}..={max}")]
    ItemCount {
        field: &'static str,
        actual: usize,
        min: usize,
        max: usize,
    },

    /// An enum value is not part of the taxonomy
    #[error("'{field}' value '{value}' is not part of the taxonomy")]
    UnknownLabel { field: &'static str, value: String },
}

/// Typed payload of a completed `update_session` invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub session_end: bool,
    pub session_summary_user: String,
    pub consumer_sentiment_score: i64,
    pub consumer_urgency_score: i64,
    pub consumer_purchase_potential_score: i64,
    pub potential_interest_products: Vec<String>,
    pub intent: String,
    pub subintent: Vec<String>,
    pub suggested_responses: Vec<String>,
    pub customer_conversation_tags: Vec<String>,
}

impl SessionUpdate {
    /// Decodes and validates the arguments of a model tool call
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::WrongTool` for a call targeting a different
    /// tool, `Malformed` when a required field is absent or mistyped, and
    /// the bound/label violations from [`SessionUpdate::validate`].
    pub fn from_tool_call(call: &ToolCall) -> Result<Self, ValidationError> {
        if call.name != SESSION_UPDATE_TOOL {
            return Err(ValidationError::WrongTool(call.name.clone()));
        }

        let update: SessionUpdate = serde_json::from_value(call.arguments.clone())?;
        update.validate()?;
        Ok(update)
    }

    /// Checks the payload against the bounds and enums the schema declares
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ItemCount` when `subintent` or
    /// `suggested_responses` fall outside their bounds, `UnknownLabel` when
    /// an intent or subintent string is not in the taxonomy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subintent.len() > MAX_SUBINTENTS {
            return Err(ValidationError::ItemCount {
                field: "subintent",
                actual: self.subintent.len(),
                min: 0,
                max: MAX_SUBINTENTS,
            });
        }

        let responses = self.suggested_responses.len();
        if !(MIN_SUGGESTED_RESPONSES..=MAX_SUGGESTED_RESPONSES).contains(&responses) {
            return Err(ValidationError::ItemCount {
                field: "suggested_responses",
                actual: responses,
                min: MIN_SUGGESTED_RESPONSES,
                max: MAX_SUGGESTED_RESPONSES,
            });
        }

        if Intent::from_schema_value(&self.intent).is_none() {
            return Err(ValidationError::UnknownLabel {
                field: "intent",
                value: self.intent.clone(),
            });
        }

        for value in &self.subintent {
            if Subintent::from_schema_value(value).is_none() {
                return Err(ValidationError::UnknownLabel {
                    field: "subintent",
                    value: value.clone(),
                });
            }
        }

        Ok(())
    }
}
