use crate::{handlers, state::AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// 规则接口根路径
pub const RULES_PATH: &str = "/rules";

/// 创建 API 路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))

        // 规则管理 API
        .route(
            RULES_PATH,
            get(handlers::list_rules).post(handlers::append_rules),
        )
        .route(
            &format!("{RULES_PATH}/:id"),
            get(handlers::get_rule)
                .put(handlers::change_rule)
                .delete(handlers::delete_rule),
        )

        // 兼容旧版客户端的路径
        .route(
            &format!("{RULES_PATH}/{}", handlers::LEGACY_APPEND_SEGMENT),
            post(handlers::append_rules)
                .get(handlers::get_legacy_segment_rule)
                .put(handlers::change_legacy_segment_rule)
                .delete(handlers::delete_legacy_segment_rule),
        )
        .route(&format!("{RULES_PATH}/delete/:id"), delete(handlers::delete_rule))
        .route(&format!("{RULES_PATH}/change/:id"), post(handlers::change_rule))

        // 添加中间件
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 健康检查
async fn health_check() -> &'static str {
    "OK"
}
