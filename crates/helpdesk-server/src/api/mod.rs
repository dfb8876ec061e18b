use axum::{Json, Router, routing::get};
use domain::PageRequest;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod auth;
mod machines;
mod report_cases;
mod reports;
mod specializations;
mod statistics;
mod users;
mod views;
mod workers;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth::routes())
        .nest("/api/users", users::routes())
        .nest("/api/workers", workers::routes())
        .nest("/api/machines", machines::routes())
        .nest("/api/report", reports::routes())
        .nest("/api/report_cases", report_cases::routes())
        .nest("/api/specializations", specializations::routes())
        .nest("/api/specialization_users", specializations::user_routes())
        .nest("/api/stadistic", statistics::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `?page=&limit=&search=` shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    page: Option<u64>,
    limit: Option<u64>,
    search: Option<String>,
}

impl ListQuery {
    fn page(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }

    fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }
}
