use crate::{logic::webhook, server::AppState};
use axum::{response::IntoResponse, routing::get, Json, Router};
use http::header::AUTHORIZATION;
use salesap_domain::{ApplicationError, SalesapError};
use serde_json::json;
use std::{iter::once, sync::Arc};
use tower_http::{
    cors::CorsLayer, sensitive_headers::SetSensitiveRequestHeadersLayer, trace::TraceLayer,
};

pub fn get_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(webhook::get_router())
        .route("/", get(get_root))
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        // Outermost, so the trace layer already sees the token as redacted.
        .layer(SetSensitiveRequestHeadersLayer::new(once(AUTHORIZATION)))
}

pub async fn get_root() -> impl IntoResponse {
    Json(json!({ "success": true }))
}

pub async fn not_found_handler() -> SalesapError {
    ApplicationError::not_found("Not found")
}
