use serde::{Deserialize, Serialize};

/// 访问规则定义
///
/// 除 `id` 外的字段由规则领域定义，管理接口不解释其语义，只负责原样存取。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// 规则 ID（全局唯一）
    pub id: String,

    /// 规则版本号
    #[serde(default)]
    pub version: String,

    /// 规则描述
    #[serde(default)]
    pub description: String,

    /// 匹配条件
    #[serde(default, rename = "match")]
    pub rule_match: RuleMatch,

    /// 认证器
    #[serde(default)]
    pub authenticators: Vec<RuleHandler>,

    /// 授权器
    #[serde(default)]
    pub authorizer: RuleHandler,

    /// 变换器
    #[serde(default)]
    pub mutators: Vec<RuleHandler>,

    /// 上游服务
    #[serde(default)]
    pub upstream: Upstream,
}

impl Rule {
    /// 创建只带 ID 的规则，其余字段为默认值
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: String::new(),
            description: String::new(),
            rule_match: RuleMatch::default(),
            authenticators: Vec::new(),
            authorizer: RuleHandler::default(),
            mutators: Vec::new(),
            upstream: Upstream::default(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// 匹配条件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleMatch {
    /// HTTP 方法
    #[serde(default)]
    pub methods: Vec<String>,

    /// URL 模式
    #[serde(default)]
    pub url: String,
}

/// 处理器引用（认证器/授权器/变换器）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleHandler {
    /// 处理器名称
    #[serde(default)]
    pub handler: String,

    /// 处理器配置
    #[serde(default)]
    pub config: serde_json::Value,
}

/// 上游配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Upstream {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub preserve_host: bool,

    #[serde(default)]
    pub strip_path: String,
}
