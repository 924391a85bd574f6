//! Protocol traits for the remote label store and capability probe.
//!
//! The traits keep the core testable without a network; the reqwest-backed
//! [`HttpApi`] implementation lives behind the `http` feature.

use async_trait::async_trait;

use crate::errors::CrawlmarkError;
use crate::models::{Capability, LabelMap};

/// Protocol for the remote label service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelTransport: Send + Sync {
    /// Fetches the full label mapping (`GET /labels`).
    async fn fetch_labels(&self) -> Result<LabelMap, CrawlmarkError>;

    /// Sends a partial mapping (`PUT /labels`) and returns the full updated
    /// mapping from the response.
    async fn update_labels(&self, partial: &LabelMap) -> Result<LabelMap, CrawlmarkError>;
}

/// Protocol for the one-shot backend capability probe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CapabilityTransport: Send + Sync {
    /// Fetches the capability payload (`GET /`).
    async fn fetch_capability(&self) -> Result<Capability, CrawlmarkError>;
}

#[cfg(feature = "http")]
pub use http_api::HttpApi;

#[cfg(feature = "http")]
mod http_api {
    use super::{async_trait, Capability, CapabilityTransport, CrawlmarkError, LabelMap, LabelTransport};
    use crate::config::ReviewConfig;

    /// HTTP implementation of both transport protocols over a shared client.
    #[derive(Debug, Clone)]
    pub struct HttpApi {
        http: reqwest::Client,
        base: String,
    }

    impl HttpApi {
        /// Creates a client from the session configuration.
        ///
        /// # Errors
        ///
        /// Returns [`CrawlmarkError::Transport`] when the underlying client
        /// cannot be constructed.
        pub fn new(config: &ReviewConfig) -> Result<Self, CrawlmarkError> {
            let http = reqwest::Client::builder()
                .user_agent(config.user_agent.clone())
                .timeout(config.timeout())
                .build()
                .map_err(|e| CrawlmarkError::transport(format!("client build: {e}")))?;

            Ok(Self {
                http,
                base: config.api_host.trim_end_matches('/').to_string(),
            })
        }

        fn endpoint(&self, path: &str) -> String {
            format!("{}{path}", self.base)
        }
    }

    #[async_trait]
    impl LabelTransport for HttpApi {
        async fn fetch_labels(&self) -> Result<LabelMap, CrawlmarkError> {
            let response = self
                .http
                .get(self.endpoint("/labels"))
                .send()
                .await
                .map_err(|e| CrawlmarkError::transport(format!("GET /labels: {e}")))?;

            response
                .json::<LabelMap>()
                .await
                .map_err(|e| CrawlmarkError::Serialization(format!("GET /labels body: {e}")))
        }

        async fn update_labels(&self, partial: &LabelMap) -> Result<LabelMap, CrawlmarkError> {
            let response = self
                .http
                .put(self.endpoint("/labels"))
                .json(partial)
                .send()
                .await
                .map_err(|e| CrawlmarkError::transport(format!("PUT /labels: {e}")))?;

            response
                .json::<LabelMap>()
                .await
                .map_err(|e| CrawlmarkError::Serialization(format!("PUT /labels body: {e}")))
        }
    }

    #[async_trait]
    impl CapabilityTransport for HttpApi {
        async fn fetch_capability(&self) -> Result<Capability, CrawlmarkError> {
            let response = self
                .http
                .get(self.endpoint("/"))
                .send()
                .await
                .map_err(|e| CrawlmarkError::transport(format!("GET /: {e}")))?;

            response
                .json::<Capability>()
                .await
                .map_err(|e| CrawlmarkError::Serialization(format!("GET / body: {e}")))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_endpoint_joins_without_double_slash() {
            let config = ReviewConfig::new().with_api_host("http://localhost:8080/");
            let api = HttpApi::new(&config).unwrap();
            assert_eq!(api.endpoint("/labels"), "http://localhost:8080/labels");
        }
    }
}
