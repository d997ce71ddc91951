use std::time::Duration;

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::{Client, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::infra::config::AppArgs;
use crate::shared::errors::Fault;

/// http client wrapper for reqwest library, bound to the API base url.
#[derive(Clone)]
pub struct HttpAdapter {
    client: ClientWithMiddleware,
    base_url: Url,
}

impl HttpAdapter {
    #[instrument(name = "new_http_adapter", skip_all, fields(base_url = %args.base_url()))]
    pub fn new(args: &AppArgs) -> Result<Self> {
        let retry_args = args.http_args.retry_args;
        let delay_secs = *retry_args.retry_delay_secs();
        let max_retry_bound = delay_secs.max(2);
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(max_retry_bound as u64))
            .build_with_max_retries(*retry_args.max_no_retries() as u32);
        let retry_middleware = RetryTransientMiddleware::new_with_policy(retry_policy); // Enable retry with exponential backoff.
        let try_client = Client::try_from(args.http_args.clone())
            .context("Can't create http client due to misconfiguration.")?;
        let client: ClientWithMiddleware = ClientBuilder::new(try_client)
            .with(TracingMiddleware::default()) // Enable built-in http client tracing and logging.
            .with(retry_middleware)
            .build();

        Ok(Self { client, base_url: args.base_url() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GETs `path` relative to the base url and decodes the JSON body.
    #[instrument(name = "http_get_json", skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Fault> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| Fault::Fatal(format!("Can't build request url for {path}: {err}")))?;
        let response = self.client.get(url).send().await?;
        let body = Self::success_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Returns the body of a 2xx response; anything else becomes a fault.
    async fn success_body(response: Response) -> Result<Bytes, Fault> {
        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Successful response.");
            return Ok(response.bytes().await?);
        }

        warn!(status = status.as_u16(), url = %response.url(), "Unsuccessful response.");
        if status.is_client_error() {
            // An unreadable body still leaves a classifiable fault behind.
            let body = response.text().await.unwrap_or_default();
            Err(Fault::ClientRequest { status: status.as_u16(), body })
        } else {
            Err(Fault::Response { status: status.as_u16() })
        }
    }
}
