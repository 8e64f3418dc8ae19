use anyhow::{Context, Error};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Response;
use reqwest_tracing::TracingMiddleware;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error as ThisError;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HttpClientSettings {
    /// Per request timeout. `None` keeps reqwest's default (no timeout).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Transient failures are only retried when this is above zero.
    #[serde(default)]
    pub max_retries: u32,
}

#[derive(Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
}

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error(transparent)]
    ResponseError(#[from] Error),
    #[error("httpBuilderError {0}")]
    HTTPBuilderError(String),
}

struct HeadersMapGenerator(HeaderMap);

impl HeadersMapGenerator {
    fn into_inner(self) -> HeaderMap {
        self.0
    }
}

impl TryFrom<HashMap<&'static str, String>> for HeadersMapGenerator {
    type Error = HttpClientError;

    fn try_from(value: HashMap<&'static str, String>) -> Result<Self, Self::Error> {
        let mut header_map = HeaderMap::new();

        for (key, value) in value.into_iter() {
            let value = HeaderValue::from_str(&value)
                .map_err(|err| HttpClientError::HTTPBuilderError(format!("{err} {key}")))?;
            header_map.insert(key, value);
        }
        Ok(Self(header_map))
    }
}

impl HttpClient {
    pub fn new(settings: &HttpClientSettings) -> Result<Self, HttpClientError> {
        let mut inner = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout_secs {
            inner = inner.timeout(Duration::from_secs(timeout));
        }
        let inner = inner
            .build()
            .map_err(|err| HttpClientError::HTTPBuilderError(err.to_string()))?;

        let mut builder = ClientBuilder::new(inner);
        if settings.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(settings.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }
        let client = builder.with(TracingMiddleware::default()).build();
        Ok(Self { client })
    }

    pub async fn get_json_with_headers<DTO: DeserializeOwned>(
        &self,
        url: Url,
        headers: HashMap<&'static str, String>,
    ) -> Result<DTO, HttpClientError> {
        let header_map = HeadersMapGenerator::try_from(headers)?.into_inner();
        let response = self
            .client
            .get(url.clone())
            .headers(header_map)
            .send()
            .await
            .with_context(|| format!("Failed to fetch request from {url}"))?;
        let err_msg = format!("Failed to deserialize response {response:?}");
        response
            .json::<DTO>()
            .await
            .context(err_msg)
            .map_err(HttpClientError::ResponseError)
    }

    /// Sends a form encoded POST and hands back the raw response so callers can
    /// inspect the status and headers.
    pub async fn post_form(
        &self,
        url: Url,
        headers: HashMap<&'static str, String>,
        form: &[(&str, &str)],
    ) -> Result<Response, HttpClientError> {
        let header_map = HeadersMapGenerator::try_from(headers)?.into_inner();
        self.client
            .post(url.clone())
            .headers(header_map)
            .form(form)
            .send()
            .await
            .with_context(|| format!("Failed to post form to {url}"))
            .map_err(HttpClientError::ResponseError)
    }

    pub async fn post_json(
        &self,
        url: Url,
        headers: HashMap<&'static str, String>,
        body: &Value,
    ) -> Result<Response, HttpClientError> {
        let header_map = HeadersMapGenerator::try_from(headers)?.into_inner();
        self.client
            .post(url.clone())
            .headers(header_map)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to post json to {url}"))
            .map_err(HttpClientError::ResponseError)
    }
}

/// Pulls the next chunk of a streamed body, `None` once the body is exhausted.
pub async fn next_chunk(response: &mut Response) -> Result<Option<Bytes>, HttpClientError> {
    response
        .chunk()
        .await
        .context("Failed to read response chunk")
        .map_err(HttpClientError::ResponseError)
}
