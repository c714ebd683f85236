use crate::{Result, Rule, RuleError, RuleRepository};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// 规则仓库（内存实现）
///
/// 规则按插入顺序保存。`append` 在写锁内重新检查 ID，整批要么全部写入、要么全部拒绝。
pub struct MemoryRuleRepository {
    rules: Arc<RwLock<Vec<Rule>>>,
}

impl MemoryRuleRepository {
    pub fn new() -> Self {
        Self {
            rules: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// 使用已有规则创建仓库
    pub fn with_rules(rules: Vec<Rule>) -> Result<Self> {
        check_batch(&[], &rules)?;
        Ok(Self {
            rules: Arc::new(RwLock::new(rules)),
        })
    }

    /// 当前规则数量
    pub async fn len(&self) -> usize {
        self.rules.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rules.read().await.is_empty()
    }
}

impl Default for MemoryRuleRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// 检查批次中的 ID 与已有规则或批次内其它条目是否冲突
fn check_batch(existing: &[Rule], batch: &[Rule]) -> Result<()> {
    let mut seen: HashSet<&str> = existing.iter().map(|r| r.id.as_str()).collect();
    for rule in batch {
        if !seen.insert(rule.id.as_str()) {
            return Err(RuleError::conflict(rule.id.clone()));
        }
    }
    Ok(())
}

#[async_trait]
impl RuleRepository for MemoryRuleRepository {
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Rule>> {
        let rules = self.rules.read().await;
        Ok(rules.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Rule> {
        let rules = self.rules.read().await;
        rules
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RuleError::not_found(id))
    }

    async fn append(&self, batch: Vec<Rule>) -> Result<()> {
        let mut rules = self.rules.write().await;
        check_batch(&rules, &batch)?;

        debug!(count = batch.len(), "Appending rules to memory repository");
        rules.extend(batch);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut rules = self.rules.write().await;
        let position = rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RuleError::not_found(id))?;
        rules.remove(position);
        Ok(())
    }

    async fn change(&self, id: &str, rule: Rule) -> Result<()> {
        let mut rules = self.rules.write().await;
        let slot = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RuleError::not_found(id))?;
        *slot = rule;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(rules: &[Rule]) -> Vec<&str> {
        rules.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_and_window() {
        let repo = MemoryRuleRepository::new();
        repo.append(vec![Rule::new("c"), Rule::new("a"), Rule::new("b")])
            .await
            .unwrap();

        let all = repo.list(50, 0).await.unwrap();
        assert_eq!(ids(&all), vec!["c", "a", "b"]);

        let window = repo.list(1, 1).await.unwrap();
        assert_eq!(ids(&window), vec!["a"]);

        assert!(repo.list(10, 5).await.unwrap().is_empty());
        assert!(repo.list(0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = MemoryRuleRepository::new();
        let err = repo.get("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_append_rejects_whole_batch_on_conflict() {
        let repo = MemoryRuleRepository::with_rules(vec![Rule::new("r1")]).unwrap();

        let err = repo
            .append(vec![Rule::new("r2"), Rule::new("r1")])
            .await
            .unwrap_err();
        assert!(matches!(err, RuleError::Conflict(ref id) if id == "r1"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_append_rejects_duplicates_within_batch() {
        let repo = MemoryRuleRepository::new();
        let err = repo
            .append(vec![Rule::new("r1"), Rule::new("r1")])
            .await
            .unwrap_err();
        assert!(matches!(err, RuleError::Conflict(_)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_change_and_delete() {
        let repo = MemoryRuleRepository::with_rules(vec![Rule::new("r1"), Rule::new("r2")]).unwrap();

        repo.change("r1", Rule::new("r1").with_version("v2"))
            .await
            .unwrap();
        assert_eq!(repo.get("r1").await.unwrap().version, "v2");

        repo.delete("r1").await.unwrap();
        assert!(repo.get("r1").await.unwrap_err().is_not_found());
        assert!(repo.delete("r1").await.unwrap_err().is_not_found());
        assert!(repo
            .change("r1", Rule::new("r1"))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_with_rules_rejects_duplicates() {
        let result = MemoryRuleRepository::with_rules(vec![Rule::new("x"), Rule::new("x")]);
        assert!(matches!(result, Err(RuleError::Conflict(_))));
    }
}
