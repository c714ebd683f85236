pub mod error;
pub mod loader;
pub mod memory;
pub mod model;
pub mod repository;
pub mod sql;

pub use error::{Result, RuleError};
pub use loader::load_rules;
pub use memory::MemoryRuleRepository;
pub use model::{Rule, RuleHandler, RuleMatch, Upstream};
pub use repository::RuleRepository;
pub use sql::SqlRuleRepository;
