use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use application::user::{CreateUser, UpdateUser};
use domain::Page;
use domain::pagination::PageRequest;
use domain::user::User;
use std::sync::Arc;

use super::ListQuery;
use super::views::UserView;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Page<User>>> {
    Ok(Json(state.users.list(query.page(), query.search()).await?))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<UserView>> {
    Ok(Json(state.users.get(id).await?.into()))
}

/// Staff only, except for the very first account, which bootstraps an empty
/// database.
async fn create_user(
    State(state): State<Arc<AppState>>,
    auth: Result<AuthUser, ApiError>,
    Json(payload): Json<CreateUser>,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    match auth {
        Ok(caller) => caller.require_staff()?,
        Err(rejection) => {
            let existing = state.users.list(PageRequest::new(None, Some(1)), None).await?;
            if existing.total_items > 0 {
                return Err(rejection);
            }
        }
    }

    let details = state.users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(details.into())))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUser>,
) -> ApiResult<Json<UserView>> {
    caller.require_staff()?;
    Ok(Json(state.users.update(id, payload).await?.into()))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    caller.require_staff()?;
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
