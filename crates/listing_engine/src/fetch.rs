use std::sync::OnceLock;
use std::time::Duration;

use futures_util::StreamExt;
use listing_logging::harvest_debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{redirect, Client, Response, Url};

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

/// Browser-like identification; some listing sites refuse unknown clients.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/91.0.4472.124 Safari/537.36"
);

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Media types accepted in `Content-Type`. An empty list accepts any type;
    /// a response without the header always passes.
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: ["text/html", "application/xhtml+xml", "text/plain"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl FetchSettings {
    /// Same client settings with the media-type check turned off.
    pub fn accepting_any_content_type(mut self) -> Self {
        self.allowed_content_types.clear();
        self
    }
}

/// Retrieves one URL. Implementations must not retry.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// HTTP GET over a shared `reqwest` client, built on first use.
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: OnceLock<Client>,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self {
            settings,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&Client, FetchError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let built = build_client(&self.settings)?;
        Ok(self.client.get_or_init(|| built))
    }

    /// Status, declared length and media type, in that order. Returns the
    /// raw `Content-Type` value when present.
    fn check_head(&self, response: &Response) -> Result<Option<String>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(declared) = response.content_length() {
            self.check_size(declared)?;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let restricted = !self.settings.allowed_content_types.is_empty();
        if let Some(raw) = content_type.as_deref().filter(|_| restricted) {
            let media_type = raw.split(';').next().unwrap_or(raw).trim();
            let allowed = self
                .settings
                .allowed_content_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(media_type));
            if !allowed {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: raw.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }
        Ok(content_type)
    }

    fn check_size(&self, len: u64) -> Result<(), FetchError> {
        if len <= self.settings.max_bytes {
            return Ok(());
        }
        Err(FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(len),
            },
            "response too large",
        ))
    }

    /// Streams the body, stopping as soon as it passes `max_bytes`.
    async fn read_body(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            self.check_size((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let target = Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.client()?;
        let requested = target.to_string();

        harvest_debug!("GET {}", requested);
        let response = client.get(target).send().await.map_err(map_reqwest_error)?;
        let final_url = response.url().to_string();
        let content_type = self.check_head(&response)?;
        let bytes = self.read_body(response).await?;

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            redirected: final_url != requested,
            final_url,
            content_type,
            byte_len: bytes.len() as u64,
        };
        harvest_debug!("{} bytes from {}", metadata.byte_len, metadata.final_url);
        Ok(FetchOutput { bytes, metadata })
    }
}

fn build_client(settings: &FetchSettings) -> Result<Client, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .default_headers(headers)
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .redirect(redirect::Policy::limited(settings.redirect_limit))
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
