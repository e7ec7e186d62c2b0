use anyhow::{bail, Context};
use async_trait::async_trait;
use nl_core::{BaselineResult, Endpoint, NeuroSymbolicResult, PuzzleRequest, SolveError};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::error::Error as _;
use tracing::debug;

use crate::backend::Backend;
use crate::decode::{decode, HealthResponse};

/// `Backend` over HTTP. No client-side timeout or retry: a slow backend keeps
/// the call pending until the transport gives up.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let parsed =
            Url::parse(base_url).with_context(|| format!("invalid backend url: {base_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("backend url must be http(s): {base_url}");
        }
        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: &PuzzleRequest,
    ) -> Result<T, SolveError> {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| network_error(endpoint, &e))?;
        read_json(endpoint, resp).await
    }
}

async fn read_json<T: DeserializeOwned>(
    endpoint: Endpoint,
    resp: Response,
) -> Result<T, SolveError> {
    let status = resp.status();
    debug!(%endpoint, status = status.as_u16(), "response");
    if !status.is_success() {
        return Err(SolveError::HttpStatus {
            endpoint,
            status: status.as_u16(),
        });
    }
    let body = resp
        .bytes()
        .await
        .map_err(|e| network_error(endpoint, &e))?;
    decode(endpoint, &body)
}

fn network_error(endpoint: Endpoint, err: &reqwest::Error) -> SolveError {
    // reqwest's top-level message hides the cause (refused, dns, tls); keep the chain.
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    SolveError::Network { endpoint, detail }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn baseline(&self, request: &PuzzleRequest) -> Result<BaselineResult, SolveError> {
        self.post(Endpoint::Baseline, request).await
    }

    async fn neurosymbolic(
        &self,
        request: &PuzzleRequest,
    ) -> Result<NeuroSymbolicResult, SolveError> {
        self.post(Endpoint::NeuroSymbolic, request).await
    }

    async fn health(&self) -> Result<String, SolveError> {
        let endpoint = Endpoint::Health;
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| network_error(endpoint, &e))?;
        let health: HealthResponse = read_json(endpoint, resp).await?;
        Ok(health.message)
    }
}
