use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use super::views::WorkerView;
use crate::auth::TokenRole;
use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/worker", post(worker_login))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Value>> {
    let user = state.users.authenticate(&req.email, &req.password).await?;
    let token = state.tokens.issue(user.id, user.role.into())?;
    info!(user_id = user.id, "User signed in");
    Ok(Json(json!({ "token": token, "user": user })))
}

#[derive(Debug, Deserialize)]
struct WorkerLoginRequest {
    ficha: String,
}

async fn worker_login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkerLoginRequest>,
) -> ApiResult<Json<Value>> {
    let worker = state.workers.authenticate(&req.ficha).await?;
    let token = state.tokens.issue(worker.id, TokenRole::Worker)?;
    let details = state.workers.get(worker.id).await?;
    info!(worker_id = worker.id, "Worker signed in");
    Ok(Json(json!({ "token": token, "worker": WorkerView::from(details) })))
}
