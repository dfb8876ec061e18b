use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use application::statistics::StatisticsQuery;
use domain::statistics::StatisticsSummary;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(report_statistics))
}

/// `GET /api/stadistic?from=&to=` or `?period=week&date=2024-05-16`.
async fn report_statistics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<Json<StatisticsSummary>> {
    Ok(Json(state.statistics.summary(&query).await?))
}
