use envconfig::Envconfig;
use http::{Method, StatusCode};
use mockito::{Mock, Server as MockServer, ServerGuard};
use salesap_domain::{InternalError, SalesapError};
use salesap_webhook::{domain::config::WebhookConfig, server::Server};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{collections::HashMap, time::Duration};
use tokio::net::TcpListener;

pub const API_TOKEN: &str = "webhook-test-token";

pub struct TestServer {
    pub port: u16,
    pub client: reqwest::Client,
    pub mock_server: ServerGuard,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ApiResponse<T: DeserializeOwned = Value> {
    pub code: StatusCode,
    pub data: T,
}

impl TestServer {
    pub async fn new() -> Result<Self, SalesapError> {
        let mock_server = MockServer::new_async().await;

        let config = WebhookConfig::init_from_hashmap(&HashMap::from([
            ("API_TOKEN".to_string(), API_TOKEN.to_string()),
            (
                "SALESAP_API_URL".to_string(),
                format!("{}/v1", mock_server.url()),
            ),
            ("HTTP_CLIENT_TIMEOUT_SECS".to_string(), "5".to_string()),
        ]))
        .map_err(|e| InternalError::configuration_error(&e.to_string()))?;

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| InternalError::connection_error(&e.to_string()))?;
        let port = listener
            .local_addr()
            .map_err(|e| InternalError::connection_error(&e.to_string()))?
            .port();

        let server = Server::init(config)?;
        tokio::task::spawn(async move { server.serve(listener).await });

        Ok(Self {
            port,
            client: reqwest::Client::new(),
            mock_server,
        })
    }

    pub fn base_path(&self) -> &'static str {
        "/v1"
    }

    pub async fn send_request<T: Serialize, U: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        payload: Option<&T>,
        header: Option<&HashMap<String, String>>,
    ) -> Result<ApiResponse<U>, SalesapError> {
        let uri = format!("http://localhost:{}/{path}", self.port);
        let mut req = self.client.request(method, uri);
        if let Some(payload) = payload {
            req = req.json(payload);
        }

        if let Some(header) = header {
            for (key, value) in header {
                req = req.header(key, value);
            }
        }

        let res = req.send().await.map_err(|e| {
            InternalError::connection_error(&format!("Failed to send request: {e}"))
        })?;

        let status = res.status();
        let json = res.json().await;

        Ok(ApiResponse {
            code: status,
            data: json.map_err(|e| {
                InternalError::deserialize_error(&format!("Failed to deserialize response: {e}"))
            })?,
        })
    }
}

/// Polls until `mock` has been hit, the detached worker gives no other signal.
pub async fn wait_until_matched(mock: &Mock) -> bool {
    for _ in 0..50 {
        if mock.matched_async().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    false
}
