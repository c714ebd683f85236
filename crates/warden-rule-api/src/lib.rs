pub mod api;
pub mod decode;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod service;
pub mod state;

pub use api::{create_router, RULES_PATH};
pub use decode::{decode_body, DecodeError, MAX_BODY_BYTES};
pub use error::{ApiError, Result};
pub use pagination::{Pagination, PaginationConfig, PaginationQuery};
pub use service::RuleService;
pub use state::AppState;
