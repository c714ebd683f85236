use thiserror::Error;

/// 规则存储错误类型
#[derive(Error, Debug)]
pub enum RuleError {
    /// 规则未找到
    #[error("Rule not found: {0}")]
    NotFound(String),

    /// 规则已存在
    #[error("Rule already exists: {0}")]
    Conflict(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    Validation(String),

    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 文件读写错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 其他错误
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 规则存储结果类型
pub type Result<T> = std::result::Result<T, RuleError>;

impl RuleError {
    pub fn not_found(id: impl Into<String>) -> Self {
        RuleError::NotFound(id.into())
    }

    pub fn conflict(id: impl Into<String>) -> Self {
        RuleError::Conflict(id.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        RuleError::Validation(msg.into())
    }

    /// 是否为"规则不存在"
    pub fn is_not_found(&self) -> bool {
        matches!(self, RuleError::NotFound(_))
    }
}
