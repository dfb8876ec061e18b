use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use domain::lenient_id;
use domain::specialization::Specialization;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_specializations).post(create_specialization))
        .route(
            "/{id}",
            get(get_specialization)
                .put(rename_specialization)
                .delete(delete_specialization),
        )
}

/// The user↔specialization join.
pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_for_user).post(assign_to_user))
        .route("/{id_user}/{id_specialization}", delete(unassign_from_user))
}

#[derive(Debug, Deserialize)]
struct NameBody {
    name: String,
}

async fn list_specializations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Specialization>>> {
    Ok(Json(state.specializations.list().await?))
}

async fn get_specialization(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Specialization>> {
    Ok(Json(state.specializations.get(id).await?))
}

async fn create_specialization(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NameBody>,
) -> ApiResult<(StatusCode, Json<Specialization>)> {
    let specialization = state.specializations.create(&body.name).await?;
    Ok((StatusCode::CREATED, Json(specialization)))
}

async fn rename_specialization(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<NameBody>,
) -> ApiResult<Json<Specialization>> {
    Ok(Json(state.specializations.rename(id, &body.name).await?))
}

async fn delete_specialization(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.specializations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    #[serde(default, deserialize_with = "lenient_id")]
    id_user: Option<i32>,
}

async fn list_for_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<Vec<Specialization>>> {
    let id_user = query
        .id_user
        .ok_or_else(|| ApiError::BadRequest("id_user is required".to_string()))?;
    Ok(Json(state.specializations.for_user(id_user).await?))
}

#[derive(Debug, Deserialize)]
struct AssignBody {
    #[serde(default, deserialize_with = "lenient_id")]
    id_user: Option<i32>,
    name: String,
}

async fn assign_to_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AssignBody>,
) -> ApiResult<(StatusCode, Json<Specialization>)> {
    let id_user = body
        .id_user
        .ok_or_else(|| ApiError::BadRequest("id_user is required".to_string()))?;
    let specialization = state.specializations.assign(id_user, &body.name).await?;
    Ok((StatusCode::CREATED, Json(specialization)))
}

async fn unassign_from_user(
    State(state): State<Arc<AppState>>,
    Path((id_user, id_specialization)): Path<(i32, i32)>,
) -> ApiResult<StatusCode> {
    state
        .specializations
        .unassign(id_user, id_specialization)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
