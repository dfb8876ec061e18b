use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use application::report::{CreateReport, UpdateReport};
use domain::report::ReportFilter;
use domain::{Owner, Page, PageRequest, lenient_id};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::views::ReportView;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_reports).post(create_report))
        .route(
            "/{id}",
            get(get_report).put(update_report).delete(delete_report),
        )
}

#[derive(Debug, Default, Deserialize)]
struct ReportQuery {
    page: Option<u64>,
    limit: Option<u64>,
    estado: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    id_user: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    id_workers: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    id_machine: Option<i32>,
}

async fn list_reports(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Page<ReportView>>> {
    let filter = ReportFilter {
        owner: Owner::from_columns(query.id_user, query.id_workers),
        estado: query.estado.filter(|e| !e.trim().is_empty()),
        id_machine: query.id_machine,
    };
    let page = state
        .reports
        .list(PageRequest::new(query.page, query.limit), &filter)
        .await?;
    Ok(Json(page.map(ReportView::from)))
}

async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ReportView>> {
    Ok(Json(state.reports.get(id).await?.into()))
}

/// The caller's token decides who owns the report.
async fn create_report(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(payload): Json<CreateReport>,
) -> ApiResult<(StatusCode, Json<ReportView>)> {
    let report = state.reports.create(caller.owner(), payload).await?;
    Ok((StatusCode::CREATED, Json(report.into())))
}

async fn update_report(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReport>,
) -> ApiResult<Json<ReportView>> {
    Ok(Json(state.reports.update(id, payload).await?.into()))
}

async fn delete_report(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let removed_cases = state.reports.delete(id).await?;
    Ok(Json(json!({ "id": id, "removed_cases": removed_cases })))
}
