use crate::{Result, Rule, RuleError};
use std::path::Path;
use tracing::info;

/// 从 JSON 文件加载规则列表
///
/// 文件内容必须是规则数组，扩展名必须为 `.json`。
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<Vec<Rule>> {
    let path = path.as_ref();

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if !is_json {
        return Err(RuleError::validation(format!(
            "Unsupported rule file format: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let rules: Vec<Rule> = serde_json::from_str(&content)?;

    info!(path = %path.display(), count = rules.len(), "Loaded rules from file");
    Ok(rules)
}
