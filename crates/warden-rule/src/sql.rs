use crate::{Result, Rule, RuleError, RuleRepository};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryOrder, QuerySelect, Schema, Set, SqlErr, TransactionTrait,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// 规则表实体
pub mod entity {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "rules")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        /// 插入顺序，`list` 按此列排序
        pub position: i64,
        pub version: String,
        /// 完整规则 JSON
        #[sea_orm(column_type = "Text")]
        pub body: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// 规则仓库（数据库实现）
///
/// `append` 在单个事务内完成冲突检查与写入，主键约束兜底并发插入。
pub struct SqlRuleRepository {
    db: Arc<DatabaseConnection>,
}

impl SqlRuleRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 连接数据库并建表
    pub async fn connect(url: &str) -> Result<Self> {
        let db = Database::connect(url).await?;
        info!(database_url = %url, "Connected to rule database");

        let repo = Self::new(Arc::new(db));
        repo.ensure_schema().await?;
        Ok(repo)
    }

    /// 创建规则表（如不存在）
    pub async fn ensure_schema(&self) -> Result<()> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);
        let mut stmt = schema.create_table_from_entity(entity::Entity);
        stmt.if_not_exists();

        self.db.execute(backend.build(&stmt)).await?;
        debug!("Rule table ensured");
        Ok(())
    }
}

fn decode(model: entity::Model) -> Result<Rule> {
    Ok(serde_json::from_str(&model.body)?)
}

fn to_active_model(rule: &Rule, position: i64) -> Result<entity::ActiveModel> {
    Ok(entity::ActiveModel {
        id: Set(rule.id.clone()),
        position: Set(position),
        version: Set(rule.version.clone()),
        body: Set(serde_json::to_string(rule)?),
    })
}

/// 主键冲突转为 Conflict，其余保持数据库错误
fn map_insert_error(err: DbErr, id: &str) -> RuleError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RuleError::conflict(id),
        _ => RuleError::Database(err),
    }
}

#[async_trait]
impl RuleRepository for SqlRuleRepository {
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Rule>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Position)
            // 并发追加可能得到相同 position
            .order_by_asc(entity::Column::Id)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&*self.db)
            .await?;

        models.into_iter().map(decode).collect()
    }

    async fn get(&self, id: &str) -> Result<Rule> {
        let model = entity::Entity::find_by_id(id.to_string())
            .one(&*self.db)
            .await?
            .ok_or_else(|| RuleError::not_found(id))?;

        decode(model)
    }

    async fn append(&self, rules: Vec<Rule>) -> Result<()> {
        let txn = self.db.begin().await?;

        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(RuleError::conflict(rule.id.clone()));
            }
            let count = entity::Entity::find_by_id(rule.id.clone())
                .count(&txn)
                .await?;
            if count > 0 {
                return Err(RuleError::conflict(rule.id.clone()));
            }
        }

        let next = entity::Entity::find()
            .order_by_desc(entity::Column::Position)
            .one(&txn)
            .await?
            .map(|m| m.position + 1)
            .unwrap_or(0);

        for (i, rule) in rules.iter().enumerate() {
            let model = to_active_model(rule, next + i as i64)?;
            entity::Entity::insert(model)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| map_insert_error(e, &rule.id))?;
        }

        txn.commit().await?;
        debug!(count = rules.len(), "Appended rules to database");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = entity::Entity::delete_by_id(id.to_string())
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RuleError::not_found(id));
        }
        Ok(())
    }

    async fn change(&self, id: &str, rule: Rule) -> Result<()> {
        let txn = self.db.begin().await?;

        let existing = entity::Entity::find_by_id(id.to_string())
            .one(&txn)
            .await?
            .ok_or_else(|| RuleError::not_found(id))?;

        let mut active: entity::ActiveModel = existing.into();
        active.version = Set(rule.version.clone());
        active.body = Set(serde_json::to_string(&rule)?);
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}
