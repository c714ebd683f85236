use anyhow::{bail, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use warden_rule_api::PaginationConfig;

/// 环境变量前缀，例如 `WARDEN__SERVER__PORT=4456`
pub const ENV_PREFIX: &str = "WARDEN";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// 请求体大小上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    #[default]
    Memory,
    Sql,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub kind: RepositoryKind,
    /// 数据库连接串，仅 `kind = "sql"` 时使用
    #[serde(default = "default_database_url")]
    pub url: String,
    /// 启动时导入的规则文件
    #[serde(default)]
    pub rule_files: Vec<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

// 默认值函数
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4456
}

fn default_max_body_bytes() -> usize {
    warden_rule_api::MAX_BODY_BYTES
}

fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            kind: RepositoryKind::default(),
            url: default_database_url(),
            rule_files: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置：TOML 文件（可缺省）叠加 `WARDEN__` 环境变量
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid config path: {}", path.display()))?;

        let config = Config::builder()
            .add_source(File::new(path_str, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pagination.max_limit == 0 {
            bail!("pagination.max_limit must be > 0");
        }
        if self.pagination.default_limit > self.pagination.max_limit {
            bail!(
                "pagination.default_limit ({}) exceeds pagination.max_limit ({})",
                self.pagination.default_limit,
                self.pagination.max_limit
            );
        }
        if self.api.max_body_bytes == 0 {
            bail!("api.max_body_bytes must be > 0");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:4456");
        assert_eq!(config.api.max_body_bytes, 1_048_576);
        assert_eq!(config.pagination, PaginationConfig::default());
        assert_eq!(config.repository.kind, RepositoryKind::Memory);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_pagination() {
        let mut config = AppConfig::default();
        config.pagination.max_limit = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.pagination.default_limit = 600;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.api.max_body_bytes = 0;
        assert!(config.validate().is_err());
    }
}
