use crate::domain::{config::WebhookConfig, step::DuplicationStep};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use salesap_domain::{CreatedDeal, Deal, DealId, InternalError, NewDeal, Relation, SalesapError};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Thin client over the three SalesAp endpoints the duplication uses.
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct SalesapClient {
    client: Client,
    deals_url: Url,
    relations_url: Url,
    api_token: String,
}

impl SalesapClient {
    pub fn new(config: &WebhookConfig) -> Result<Self, SalesapError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_client_timeout_secs))
            .build()
            .map_err(|e| {
                InternalError::configuration_error(&format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            deals_url: parse_url(&config.deals_url())?,
            relations_url: parse_url(&config.relations_url())?,
            api_token: config.api_token.clone(),
        })
    }

    pub async fn get_deal(&self, deal_id: &DealId) -> Result<Deal, SalesapError> {
        let request = self.client.get(self.deal_url(deal_id)?);
        let response = self
            .send(DuplicationStep::Fetch, request, &[StatusCode::OK])
            .await?;

        Self::decode(DuplicationStep::Fetch, response).await
    }

    pub async fn create_deal(&self, deal: &NewDeal) -> Result<CreatedDeal, SalesapError> {
        let request = self.client.post(self.deals_url.clone()).json(deal);
        let response = self
            .send(DuplicationStep::Create, request, &[StatusCode::CREATED])
            .await?;

        Self::decode(DuplicationStep::Create, response).await
    }

    pub async fn create_relation(&self, relation: &Relation) -> Result<(), SalesapError> {
        let request = self.client.post(self.relations_url.clone()).json(relation);
        self.send(
            DuplicationStep::Link,
            request,
            &[StatusCode::OK, StatusCode::CREATED],
        )
        .await?;

        Ok(())
    }

    /// `{base}/deals/{id}` with the id pushed as a single, percent-encoded
    /// path segment.
    fn deal_url(&self, deal_id: &DealId) -> Result<Url, SalesapError> {
        let mut url = self.deals_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                InternalError::configuration_error(&format!(
                    "SALESAP_API_URL cannot carry a path: {}",
                    self.deals_url
                ))
            })?
            .push(deal_id.inner());

        Ok(url)
    }

    async fn send(
        &self,
        step: DuplicationStep,
        request: RequestBuilder,
        accepted: &[StatusCode],
    ) -> Result<Response, SalesapError> {
        let response = request
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InternalError::timeout(&format!("{step} request timed out: {e}"))
                } else {
                    InternalError::connection_error(&format!("{step} request failed: {e}"))
                }
            })?;

        let status = response.status();
        debug!(%step, status = status.as_u16(), "SalesAp responded");

        if accepted.contains(&status) {
            Ok(response)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(InternalError::upstream(step.as_ref(), status.as_u16(), &text))
        }
    }

    async fn decode<T: DeserializeOwned>(
        step: DuplicationStep,
        response: Response,
    ) -> Result<T, SalesapError> {
        response.json::<T>().await.map_err(|e| {
            InternalError::deserialize_error(&format!("Could not decode {step} response: {e}"))
        })
    }
}

fn parse_url(url: &str) -> Result<Url, SalesapError> {
    Url::parse(url).map_err(|e| {
        InternalError::configuration_error(&format!("Invalid SalesAp URL {url}: {e}"))
    })
}
