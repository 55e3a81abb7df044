use std::time::Duration;

use futures_util::StreamExt;
use newsdesk_logging::{desk_debug, desk_info, desk_warn};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{ClientError, FailureKind, RefreshSummary, SearchHit, SearchRequest};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Request/response access to the search service. No retries.
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, ClientError>;

    async fn refresh(&self) -> Result<RefreshSummary, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchClient {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestSearchClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let base = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, name: &str) -> Result<Url, ClientError> {
        self.base
            .join(name)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        desk_debug!("Received {} bytes", body.len());

        serde_json::from_slice(&body)
            .map_err(|err| ClientError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

#[async_trait::async_trait]
impl SearchClient for ReqwestSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, ClientError> {
        let url = self.endpoint("search")?;
        desk_info!(
            "POST {} page={} include_all={} query_len={}",
            url,
            request.page,
            request.include_all,
            request.query.len()
        );
        let body = encode_body(request)?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let hits: Vec<SearchHit> = self.read_json(response).await.inspect_err(|err| {
            desk_warn!("Search page {} failed: {}", request.page, err);
        })?;
        Ok(hits)
    }

    async fn refresh(&self) -> Result<RefreshSummary, ClientError> {
        let url = self.endpoint("refresh")?;
        desk_info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        self.read_json(response).await.inspect_err(|err| {
            desk_warn!("Refresh failed: {}", err);
        })
    }
}

/// Parses the service root, making sure relative endpoint names resolve
/// beneath it rather than replacing its last path segment.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut base = Url::parse(raw.trim())
        .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(ClientError::new(
            FailureKind::InvalidUrl,
            format!("not an http(s) base url: {raw}"),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

fn encode_body<T: Serialize + ?Sized>(body: &T) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(body)
        .map_err(|err| ClientError::new(FailureKind::InvalidRequest, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
