use crate::decode::{decode_body, MAX_BODY_BYTES};
use crate::error::{ApiError, Result};
use crate::pagination::Pagination;
use axum::body::Body;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use warden_rule::{Rule, RuleError, RuleRepository};

/// 规则管理服务
///
/// 不持有任何跨请求状态，所有数据都在仓库中。写操作前的存在性检查与仓库写入之间
/// 不是原子的：并发修改同一 ID 时，最终结果取决于仓库自身是否做条件写入。
pub struct RuleService {
    repository: Arc<dyn RuleRepository>,
    max_body_bytes: usize,
}

impl RuleService {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self {
            repository,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }

    /// 设置请求体大小上限
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// 列出规则
    pub async fn list(&self, page: Pagination) -> Result<Vec<Rule>> {
        debug!(limit = page.limit, offset = page.offset, "Listing rules");

        let rules = self.repository.list(page.limit, page.offset).await?;
        Ok(rules)
    }

    /// 获取规则
    pub async fn get(&self, id: &str) -> Result<Rule> {
        debug!(rule_id = %id, "Getting rule");

        let rule = self.repository.get(id).await?;
        Ok(rule)
    }

    /// 批量创建规则
    ///
    /// 任一 ID 已存在（或在同一批次中重复）时整批拒绝，仓库的 `append` 不会被调用。
    pub async fn append(&self, body: Body) -> Result<()> {
        let rules: Vec<Rule> = decode_body(body, self.max_body_bytes).await?;
        self.append_rules(rules).await
    }

    pub async fn append_rules(&self, rules: Vec<Rule>) -> Result<()> {
        let mut seen = HashSet::with_capacity(rules.len());
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                warn!(rule_id = %rule.id, "Duplicate rule id within append batch");
                return Err(ApiError::Conflict(format!(
                    "Rule id appears more than once in batch: {}",
                    rule.id
                )));
            }
            if self.exists(&rule.id).await? {
                warn!(rule_id = %rule.id, "Rejecting append batch, rule already exists");
                return Err(ApiError::Conflict(format!(
                    "Rule already exists: {}",
                    rule.id
                )));
            }
        }

        let count = rules.len();
        self.repository
            .append(rules)
            .await
            .map_err(|err| match err {
                // 预检之后被并发写入抢先
                RuleError::Conflict(_) => ApiError::Conflict(err.to_string()),
                other => ApiError::internal(other),
            })?;

        info!(count, "Rules appended");
        Ok(())
    }

    /// 删除规则
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.ensure_exists(id).await?;

        self.repository
            .delete(id)
            .await
            .map_err(ApiError::internal)?;

        info!(rule_id = %id, "Rule deleted");
        Ok(())
    }

    /// 整体替换规则
    ///
    /// 顺序：存在性检查 -> 解码请求体 -> ID 一致性检查 -> 仓库写入。
    pub async fn change(&self, id: &str, body: Body) -> Result<()> {
        self.ensure_exists(id).await?;

        let rule: Rule = decode_body(body, self.max_body_bytes).await?;
        self.replace(id, rule).await
    }

    async fn replace(&self, id: &str, rule: Rule) -> Result<()> {
        if rule.id != id {
            warn!(rule_id = %id, body_id = %rule.id, "Rule id mismatch on change");
            return Err(ApiError::Validation(
                "ID of changed rule must be same as new one".to_string(),
            ));
        }

        self.repository
            .change(id, rule)
            .await
            .map_err(ApiError::internal)?;

        info!(rule_id = %id, "Rule changed");
        Ok(())
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        match self.repository.get(id).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(ApiError::internal(err)),
        }
    }

    async fn ensure_exists(&self, id: &str) -> Result<()> {
        match self.repository.get(id).await {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => Err(ApiError::NotFound(err.to_string())),
            Err(err) => Err(ApiError::internal(err)),
        }
    }
}
