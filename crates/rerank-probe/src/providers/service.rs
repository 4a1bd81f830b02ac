use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::RerankServiceConfig;
use crate::error::RerankError;
use crate::traits::RerankProvider;
use crate::types::{RerankRequest, RerankResponse};

pub const RERANK_PATH: &str = "/rerank";

/// Client for a self-hosted rerank server exposing `POST /rerank`.
#[derive(Clone)]
pub struct RerankServiceProvider {
    config: RerankServiceConfig,
    client: Client,
}

impl RerankServiceProvider {
    pub fn new(config: RerankServiceConfig) -> Result<Self, RerankError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// The base URL is taken verbatim; no slash normalization.
    pub fn endpoint(&self) -> String {
        format!("{}{RERANK_PATH}", self.config.base_url)
    }
}

#[async_trait::async_trait]
impl RerankProvider for RerankServiceProvider {
    fn name(&self) -> &'static str {
        "rerank-service"
    }

    async fn rerank(&self, request: &RerankRequest) -> Result<RerankResponse, RerankError> {
        if request.documents.is_empty() {
            return Err(RerankError::Config(
                "rerank documents is empty".to_string(),
            ));
        }

        let payload = serde_json::json!({
            "query": request.query,
            "documents": request.documents,
            "top_n": request.top_n,
        });

        let endpoint = self.endpoint();
        debug!(
            %endpoint,
            documents = request.documents.len(),
            top_n = request.top_n,
            "sending rerank request"
        );

        let res = self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(RerankError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = res.text().await?;
        let parsed: RerankResponse = serde_json::from_str(&body)?;
        check_indices(&parsed, request.documents.len())?;
        debug!(
            model = %parsed.model,
            results = parsed.results.len(),
            "decoded rerank response"
        );
        Ok(parsed)
    }
}

fn check_indices(response: &RerankResponse, document_count: usize) -> Result<(), RerankError> {
    match response
        .results
        .iter()
        .find(|it| it.index >= document_count)
    {
        Some(it) => Err(RerankError::InvalidResponse(format!(
            "result index {} out of range for {document_count} documents",
            it.index
        ))),
        None => Ok(()),
    }
}
