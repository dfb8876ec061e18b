use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use application::report_case::{CreateReportCase, UpdateReportCase};
use domain::report_case::ReportCase;
use domain::{Page, PageRequest, lenient_id};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_cases).post(create_case))
        .route("/{id}", get(get_case).put(update_case).delete(delete_case))
}

#[derive(Debug, Default, Deserialize)]
struct CaseQuery {
    page: Option<u64>,
    limit: Option<u64>,
    #[serde(default, deserialize_with = "lenient_id")]
    id_report: Option<i32>,
}

async fn list_cases(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CaseQuery>,
) -> ApiResult<Json<Page<ReportCase>>> {
    let page = PageRequest::new(query.page, query.limit);
    Ok(Json(state.report_cases.list(page, query.id_report).await?))
}

async fn get_case(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ReportCase>> {
    Ok(Json(state.report_cases.get(id).await?))
}

async fn create_case(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReportCase>,
) -> ApiResult<(StatusCode, Json<ReportCase>)> {
    let case = state.report_cases.create(payload).await?;
    Ok((StatusCode::CREATED, Json(case)))
}

async fn update_case(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReportCase>,
) -> ApiResult<Json<ReportCase>> {
    Ok(Json(state.report_cases.update(id, payload).await?))
}

async fn delete_case(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.report_cases.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
