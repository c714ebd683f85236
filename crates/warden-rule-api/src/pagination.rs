use serde::Deserialize;

/// 分页参数解析策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default)]
    pub default_offset: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_limit() -> usize {
    50
}

fn default_max_limit() -> usize {
    500
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_offset: 0,
            max_limit: default_max_limit(),
        }
    }
}

/// 原始查询参数
///
/// 以字符串接收，非法值回退到默认值而不是拒绝请求。
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// 解析后的分页窗口 `[offset, offset + limit)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Pagination {
    pub fn parse(query: &PaginationQuery, config: &PaginationConfig) -> Self {
        let limit = parse_or(query.limit.as_deref(), config.default_limit);
        let offset = parse_or(query.offset.as_deref(), config.default_offset);

        Self {
            limit: limit.clamp(0, config.max_limit as i64) as usize,
            offset: offset.max(0) as usize,
        }
    }
}

fn parse_or(raw: Option<&str>, default: usize) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default as i64)
}
