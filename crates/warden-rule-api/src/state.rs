use crate::{pagination::PaginationConfig, service::RuleService};
use std::sync::Arc;

/// API 应用状态
#[derive(Clone)]
pub struct AppState {
    /// 规则管理服务
    pub service: Arc<RuleService>,
    /// 分页参数解析策略
    pub pagination: PaginationConfig,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(service: Arc<RuleService>) -> Self {
        Self {
            service,
            pagination: PaginationConfig::default(),
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }
}
