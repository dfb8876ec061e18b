use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use application::machine::{CreateMachine, UpdateMachine};
use domain::Page;
use std::sync::Arc;

use super::ListQuery;
use super::views::MachineView;
use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_machines).post(create_machine))
        .route(
            "/{id}",
            get(get_machine).put(update_machine).delete(delete_machine),
        )
}

async fn list_machines(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Page<MachineView>>> {
    let page = state.machines.list(query.page(), query.search()).await?;
    Ok(Json(page.map(MachineView::from)))
}

async fn get_machine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<MachineView>> {
    Ok(Json(state.machines.get(id).await?.into()))
}

async fn create_machine(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateMachine>,
) -> ApiResult<(StatusCode, Json<MachineView>)> {
    let machine = state.machines.create(payload).await?;
    Ok((StatusCode::CREATED, Json(machine.into())))
}

async fn update_machine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMachine>,
) -> ApiResult<Json<MachineView>> {
    Ok(Json(state.machines.update(id, payload).await?.into()))
}

async fn delete_machine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.machines.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
