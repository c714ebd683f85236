use serde::{Deserialize, Serialize};

/// 操作确认响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationResponse {
    pub status: String,
    pub message: String,
}

impl ConfirmationResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }
}
