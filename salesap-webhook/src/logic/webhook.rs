use crate::server::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use http::{header::AUTHORIZATION, HeaderMap};
use salesap_domain::{ApplicationError, DealId, SalesapError};
use serde::Serialize;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, info, warn};

const TOKEN_KEY: &str = "token";
const BEARER_PREFIX: &str = "Bearer ";
const DEAL_ID_KEYS: [&str; 2] = ["deal_id", "id"];

pub const INVALID_TOKEN: &str = "invalid token";
pub const NO_DEAL_ID: &str = "no deal id";

pub fn get_router() -> Router<Arc<AppState>> {
    Router::new().route("/webhook", post(receive_webhook))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookAck {
    pub status: String,
}

impl WebhookAck {
    pub fn received() -> Self {
        Self {
            status: "received".to_owned(),
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    query: Option<Query<HashMap<String, String>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, SalesapError> {
    let body = serde_json::from_slice::<Value>(&body).unwrap_or_else(|e| {
        debug!("Webhook body is not JSON: {e}");
        Value::Null
    });

    let token = resolve_token(
        query.as_ref().and_then(|q| q.get(TOKEN_KEY)).map(String::as_str),
        bearer_token(&headers),
        body.get(TOKEN_KEY).and_then(Value::as_str),
    );

    if token != Some(state.config.api_token.as_str()) {
        warn!(token_present = token.is_some(), "Rejected webhook");
        return Err(ApplicationError::forbidden(INVALID_TOKEN));
    }

    let Some(deal_id) = extract_deal_id(&body) else {
        warn!("Webhook carries no deal id");
        return Err(ApplicationError::bad_request(NO_DEAL_ID));
    };

    info!(%deal_id, "Webhook accepted, scheduling duplication");
    state.dispatcher.dispatch(deal_id);

    Ok(Json(WebhookAck::received()))
}

/// First non-empty token wins: query string, then bearer header, then body.
pub fn resolve_token<'a>(
    query: Option<&'a str>,
    header: Option<&'a str>,
    body: Option<&'a str>,
) -> Option<&'a str> {
    [query, header, body]
        .into_iter()
        .flatten()
        .find(|token| !token.is_empty())
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}

pub fn extract_deal_id(body: &Value) -> Option<DealId> {
    DEAL_ID_KEYS
        .iter()
        .find_map(|key| body.get(*key).and_then(DealId::from_value))
}
