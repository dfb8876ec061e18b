use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use application::worker::{CreateWorker, UpdateWorker};
use domain::Page;
use domain::worker::Worker;
use std::sync::Arc;

use super::ListQuery;
use super::views::WorkerView;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_workers).post(create_worker))
        .route("/ficha/{ficha}", get(get_worker_by_ficha))
        .route(
            "/{id}",
            get(get_worker).put(update_worker).delete(delete_worker),
        )
}

async fn list_workers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Page<Worker>>> {
    Ok(Json(state.workers.list(query.page(), query.search()).await?))
}

async fn get_worker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<WorkerView>> {
    Ok(Json(state.workers.get(id).await?.into()))
}

async fn get_worker_by_ficha(
    State(state): State<Arc<AppState>>,
    Path(ficha): Path<String>,
) -> ApiResult<Json<WorkerView>> {
    Ok(Json(state.workers.get_by_ficha(&ficha).await?.into()))
}

async fn create_worker(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(payload): Json<CreateWorker>,
) -> ApiResult<(StatusCode, Json<WorkerView>)> {
    caller.require_staff()?;
    let details = state.workers.create(payload).await?;
    Ok((StatusCode::CREATED, Json(details.into())))
}

async fn update_worker(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWorker>,
) -> ApiResult<Json<WorkerView>> {
    caller.require_staff()?;
    Ok(Json(state.workers.update(id, payload).await?.into()))
}

async fn delete_worker(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    caller.require_staff()?;
    state.workers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
