use crate::{
    error::Result,
    models::ConfirmationResponse,
    pagination::{Pagination, PaginationQuery},
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Path, Query, State},
    Json,
};
use warden_rule::Rule;

/// 列出规则
pub async fn list_rules(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Vec<Rule>>> {
    let page = Pagination::parse(&query, &state.pagination);
    let rules = state.service.list(page).await?;

    Ok(Json(rules))
}

/// 获取规则
pub async fn get_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Result<Json<Rule>> {
    let rule = state.service.get(&rule_id).await?;

    Ok(Json(rule))
}

/// 批量创建规则
pub async fn append_rules(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<ConfirmationResponse>> {
    state.service.append(body).await?;

    Ok(Json(ConfirmationResponse::ok("append rules ok")))
}

/// 删除规则
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Result<Json<ConfirmationResponse>> {
    state.service.delete(&rule_id).await?;

    Ok(Json(ConfirmationResponse::ok("delete ok")))
}

/// 整体替换规则
pub async fn change_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
    body: Body,
) -> Result<Json<ConfirmationResponse>> {
    state.service.change(&rule_id, body).await?;

    Ok(Json(ConfirmationResponse::ok("change ok")))
}

/// `/rules/appendrule` 与旧版追加路径重名，ID 为 `appendrule` 的规则
/// 通过以下处理器读取、替换和删除
pub const LEGACY_APPEND_SEGMENT: &str = "appendrule";

pub async fn get_legacy_segment_rule(state: State<AppState>) -> Result<Json<Rule>> {
    get_rule(state, Path(LEGACY_APPEND_SEGMENT.to_string())).await
}

pub async fn change_legacy_segment_rule(
    state: State<AppState>,
    body: Body,
) -> Result<Json<ConfirmationResponse>> {
    change_rule(state, Path(LEGACY_APPEND_SEGMENT.to_string()), body).await
}

pub async fn delete_legacy_segment_rule(
    state: State<AppState>,
) -> Result<Json<ConfirmationResponse>> {
    delete_rule(state, Path(LEGACY_APPEND_SEGMENT.to_string())).await
}
