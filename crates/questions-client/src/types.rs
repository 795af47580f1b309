//! Wire envelopes returned by the Questions API.

use serde::{Deserialize, Serialize};

/// Success envelope: `{"description", "body", "success"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub description: String,
    pub body: T,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

/// Error envelope: `{"description", "error"?, "code"?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub description: String,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub code: Option<String>,
}
