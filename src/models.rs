// src/models.rs
use serde::Serialize;

/// Error envelope shared by every handler: `{"success": false, "error": …}`.
#[derive(Serialize, Clone, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}
