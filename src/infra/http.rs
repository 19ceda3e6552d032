use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// Thin JSON client bound to one service origin. No retries, no caching, no
/// de-duplication: every call goes to the network and every failure goes back
/// to the caller.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|err| AppError::Configuration(format!("invalid API URL '{base_url}': {err}")))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL and appends the non-empty query pairs.
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> AppResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|err| AppError::Configuration(format!("invalid request URL '{raw}': {err}")))?;

        let mut pairs = query.iter().filter(|(_, value)| !value.is_empty()).peekable();
        if pairs.peek().is_some() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> AppResult<T> {
        let url = self.endpoint(path, query)?;
        self.send(Method::GET, url, |request| request).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, &[])?;
        self.send(Method::POST, url, |request| request.json(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, &[])?;
        self.send(Method::PATCH, url, |request| request.json(body)).await
    }

    async fn send<T, F>(&self, method: Method, url: Url, prepare: F) -> AppResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        tracing::debug!(%method, %url, "sending request");

        let request = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        let response = prepare(request)
            .send()
            .await
            .map_err(|err| AppError::Transport(format!("{method} {url}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            tracing::debug!(%method, %url, %status, "request rejected");
            return Err(AppError::Api { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Transport(format!("failed to parse response from {url}: {err}")))
    }
}
