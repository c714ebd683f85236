use crate::{Result, Rule};
use async_trait::async_trait;

/// 规则仓库 trait
///
/// 持久化以及并发一致性由实现方负责。`get` 在规则不存在时必须返回
/// [`RuleError::NotFound`](crate::RuleError::NotFound)，调用方只依据这一种错误做分支。
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// 按插入顺序返回 `[offset, offset + limit)` 窗口内的规则
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Rule>>;

    /// 获取规则
    async fn get(&self, id: &str) -> Result<Rule>;

    /// 批量追加规则
    async fn append(&self, rules: Vec<Rule>) -> Result<()>;

    /// 删除规则
    async fn delete(&self, id: &str) -> Result<()>;

    /// 整体替换规则，调用方保证 `rule.id == id`
    async fn change(&self, id: &str, rule: Rule) -> Result<()>;
}
