use axum::body::Body;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// 请求体大小上限（1 MiB）
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// 请求体解码错误
#[derive(Debug, Error)]
pub enum DecodeError {
    /// 读取失败或超过大小上限
    #[error("Failed to read request body: {0}")]
    Read(#[source] axum::Error),
    /// JSON 解析失败
    #[error("Failed to decode request body: {0}")]
    Json(#[from] serde_json::Error),
}

/// 读取至多 `limit` 字节的请求体并解析为 JSON
pub async fn decode_body<T: DeserializeOwned>(body: Body, limit: usize) -> Result<T, DecodeError> {
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(DecodeError::Read)?;
    Ok(serde_json::from_slice(&bytes)?)
}
