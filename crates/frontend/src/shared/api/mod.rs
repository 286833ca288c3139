//! Client for the Cube-compatible analytics query API.

pub mod fence;

pub use fence::{RequestSequence, Ticket};

use crate::shared::config::CubeConfig;
use contracts::analytics::{LoadResponse, MetaResponse, Query};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use thiserror::Error;

/// Polling budget for the API's "Continue wait" long-poll protocol.
const CONTINUE_WAIT_ATTEMPTS: u32 = 10;
const CONTINUE_WAIT_DELAY_MS: u32 = 1_000;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("HTTP error: {status}")]
    Http { status: u16 },
    #[error("failed to parse response: {0}")]
    Decode(String),
    #[error("query error: {0}")]
    Query(String),
    #[error("query did not finish in time")]
    ContinueWaitTimeout,
}

#[derive(Serialize)]
struct LoadRequest<'a> {
    query: &'a Query,
}

/// HTTP client for `/cubejs-api/v1`. Cheap to clone.
#[derive(Clone)]
pub struct CubeClient {
    config: CubeConfig,
}

impl CubeClient {
    pub fn new(config: CubeConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(CubeConfig::from_env())
    }

    /// WebSocket endpoint derived from the HTTP base URL.
    pub fn ws_url(&self) -> String {
        let base = self
            .config
            .base_url
            .replacen("https://", "wss://", 1)
            .replacen("http://", "ws://", 1);
        format!("{}/", base)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/cubejs-api/v1{}", self.config.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => builder.header("Authorization", token),
            None => builder,
        }
    }

    /// Execute a query. Transparently re-polls while the engine answers
    /// "Continue wait", up to a fixed attempt budget.
    pub async fn load(&self, query: &Query) -> Result<LoadResponse, ApiError> {
        for _ in 0..CONTINUE_WAIT_ATTEMPTS {
            let response = self
                .authorized(Request::post(&self.url("/load")))
                .json(&LoadRequest { query })
                .map_err(|e| ApiError::Decode(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            if !response.ok() {
                return Err(ApiError::Http {
                    status: response.status(),
                });
            }

            let body: serde_json::Value = response
                .json()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))?;

            if let Some(error) = body.get("error").and_then(|e| e.as_str()) {
                if error == "Continue wait" {
                    TimeoutFuture::new(CONTINUE_WAIT_DELAY_MS).await;
                    continue;
                }
                return Err(ApiError::Query(error.to_string()));
            }

            return serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()));
        }
        Err(ApiError::ContinueWaitTimeout)
    }

    /// Distinct values of one dimension for filter dropdowns. The
    /// dimension's own pending selection is excluded from the query so the
    /// full value list stays visible while picking.
    pub async fn distinct_values(
        &self,
        state: &crate::shared::state::FilterState,
        dimension: &str,
    ) -> Result<Vec<String>, ApiError> {
        use contracts::analytics::ResultSet;

        let query = crate::shared::query::build_query(state, &[dimension])
            .into_query(vec![], vec![dimension.to_string()]);
        let response = self.load(&query).await?;

        let mut values: Vec<String> = response
            .data
            .iter()
            .filter_map(|row| ResultSet::string(row, dimension))
            .collect();
        values.sort();
        values.dedup();
        Ok(values)
    }

    /// Cube catalogue introspection.
    pub async fn meta(&self) -> Result<MetaResponse, ApiError> {
        let response = self
            .authorized(Request::get(&self.url("/meta")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Http {
                status: response.status(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CubeClient {
        CubeClient::new(CubeConfig {
            base_url: base.to_string(),
            token: None,
        })
    }

    #[test]
    fn test_ws_url_scheme_rewrite() {
        assert_eq!(
            client("https://cube.example.com").ws_url(),
            "wss://cube.example.com/"
        );
        assert_eq!(client("http://localhost:4000").ws_url(), "ws://localhost:4000/");
    }

    #[test]
    fn test_api_url_layout() {
        assert_eq!(
            client("http://localhost:4000").url("/load"),
            "http://localhost:4000/cubejs-api/v1/load"
        );
    }
}
