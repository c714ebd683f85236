use crate::decode::DecodeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use warden_rule::RuleError;

/// API 错误类型
#[derive(Debug, Error)]
pub enum ApiError {
    /// 规则未找到
    #[error("{0}")]
    NotFound(String),
    /// 规则已存在
    #[error("{0}")]
    Conflict(String),
    /// 请求体无法解码或内容不一致
    #[error("{0}")]
    Validation(String),
    /// 内部错误，原因只写入日志
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        ApiError::Internal(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ApiError::Internal(cause) => {
                tracing::error!(error = %cause, "Rule request failed");
                "internal server error".to_string()
            }
            ApiError::NotFound(msg) | ApiError::Conflict(msg) | ApiError::Validation(msg) => msg,
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

// 仓库错误只区分 NotFound，其余一律视为内部错误。
// Conflict 仅在 append 的结果上单独识别，见 `RuleService::append_rules`
impl From<RuleError> for ApiError {
    fn from(err: RuleError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::internal(err)
        }
    }
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
