use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Existence check for a derived caption URL.
///
/// Best-effort by contract: implementations answer "is it there", and any
/// transport failure reads as "no". A probe must never abort the enclosing
/// enhancement workflow.
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    async fn is_available(&self, url: &str) -> bool;
}

/// HEAD-request probe. Metadata only, no body transfer, attempted exactly
/// once per item; there is no retry or backoff policy here.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AvailabilityProbe for HttpProbe {
    async fn is_available(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                let available = response.status().is_success();
                tracing::debug!(url, status = %response.status(), available, "caption probe");
                available
            }
            Err(err) => {
                tracing::debug!(url, error = %err, "caption probe failed, treating as unavailable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn probe() -> HttpProbe {
        HttpProbe::new(Duration::from_millis(500)).unwrap()
    }

    #[tokio::test]
    async fn test_head_success_is_available() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/2025/09/16/a-de.vtt"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let url = format!("{}/2025/09/16/a-de.vtt", server.uri());
        assert!(probe().is_available(&url).await);
    }

    #[tokio::test]
    async fn test_head_not_found_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing-de.vtt", server.uri());
        assert!(!probe().is_available(&url).await);
    }

    #[tokio::test]
    async fn test_transport_error_is_unavailable() {
        // Nothing listens here; connection refused must read as "no".
        assert!(
            !probe()
                .is_available("http://127.0.0.1:9/never-de.vtt")
                .await
        );
    }
}
