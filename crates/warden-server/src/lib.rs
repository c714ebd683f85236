pub mod config;
pub mod logging;

use crate::config::{AppConfig, RepositoryConfig, RepositoryKind};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use warden_rule::{load_rules, MemoryRuleRepository, RuleRepository, SqlRuleRepository};
use warden_rule_api::{create_router, AppState, RuleService};

/// 按配置创建规则仓库并导入规则文件
pub async fn build_repository(config: &RepositoryConfig) -> Result<Arc<dyn RuleRepository>> {
    let repository: Arc<dyn RuleRepository> = match config.kind {
        RepositoryKind::Memory => {
            tracing::info!("Using in-memory rule repository");
            Arc::new(MemoryRuleRepository::new())
        }
        RepositoryKind::Sql => {
            let repo = SqlRuleRepository::connect(&config.url)
                .await
                .with_context(|| format!("Failed to open rule database {}", config.url))?;
            Arc::new(repo)
        }
    };

    for path in &config.rule_files {
        let rules = load_rules(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?;
        let count = rules.len();
        repository
            .append(rules)
            .await
            .with_context(|| format!("Failed to import rules from {}", path.display()))?;
        tracing::info!(path = %path.display(), count, "Imported rules");
    }

    Ok(repository)
}

/// 组装 HTTP 应用
pub async fn build_app(config: &AppConfig) -> Result<Router> {
    let repository = build_repository(&config.repository).await?;
    let service = RuleService::new(repository).with_max_body_bytes(config.api.max_body_bytes);
    let state = AppState::new(Arc::new(service)).with_pagination(config.pagination);

    Ok(create_router(state))
}
