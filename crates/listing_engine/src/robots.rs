use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use listing_logging::{harvest_debug, harvest_info, harvest_warn};
use robotstxt::DefaultMatcher;
use url::Url;

use crate::{FailureKind, FetchError, FetchSettings, Fetcher, ReqwestFetcher};

/// Product token matched against robots.txt groups. No site names it, so
/// the `*` group applies.
pub const DEFAULT_POLICY_AGENT: &str = "ListingHarvester";

/// Answers "may this URL be fetched" for automated clients.
#[async_trait::async_trait]
pub trait CrawlPolicy: Send + Sync {
    async fn is_allowed(&self, url: &str) -> Result<bool, PolicyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("cannot derive a robots.txt location from {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("crawl policy {robots_url} unavailable: {source}")]
    Unavailable {
        robots_url: String,
        #[source]
        source: FetchError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rules {
    AllowAll,
    DenyAll,
    Robots(String),
}

/// robots.txt policy, fetched once per origin and cached for the lifetime
/// of the value.
///
/// Status handling follows the usual robot parser convention: 401/403 deny
/// everything, other client errors allow everything. Transport failures and
/// server errors are reported as [`PolicyError::Unavailable`] and are not
/// cached, so the caller decides whether to abort.
pub struct RobotsPolicy {
    fetcher: Arc<dyn Fetcher>,
    agent: String,
    cache: Mutex<HashMap<String, Arc<Rules>>>,
}

impl RobotsPolicy {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_agent(fetcher, DEFAULT_POLICY_AGENT)
    }

    /// Policy with its own HTTP client. It shares `settings` except for the
    /// media-type check: robots.txt is read whatever type the host declares.
    pub fn from_settings(settings: &FetchSettings) -> Self {
        let fetcher = ReqwestFetcher::new(settings.clone().accepting_any_content_type());
        Self::new(Arc::new(fetcher))
    }

    pub fn with_agent(fetcher: Arc<dyn Fetcher>, agent: impl Into<String>) -> Self {
        Self {
            fetcher,
            agent: agent.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_origins(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    async fn rules_for(&self, origin: &str) -> Result<Arc<Rules>, PolicyError> {
        if let Some(rules) = self.cached(origin) {
            return Ok(rules);
        }

        let robots_url = format!("{origin}/robots.txt");
        let rules = match self.fetcher.fetch(&robots_url).await {
            Ok(output) => Rules::Robots(String::from_utf8_lossy(&output.bytes).into_owned()),
            Err(FetchError {
                kind: FailureKind::HttpStatus(401 | 403),
                ..
            }) => Rules::DenyAll,
            Err(FetchError {
                kind: FailureKind::HttpStatus(code),
                ..
            }) if (400..500).contains(&code) => Rules::AllowAll,
            Err(source) => {
                harvest_warn!("robots.txt at {} unavailable: {}", robots_url, source);
                return Err(PolicyError::Unavailable { robots_url, source });
            }
        };
        harvest_info!("Loaded crawl policy from {}", robots_url);

        let rules = Arc::new(rules);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(origin.to_string(), rules.clone());
        }
        Ok(rules)
    }

    fn cached(&self, origin: &str) -> Option<Arc<Rules>> {
        self.cache.lock().ok()?.get(origin).cloned()
    }
}

#[async_trait::async_trait]
impl CrawlPolicy for RobotsPolicy {
    async fn is_allowed(&self, url: &str) -> Result<bool, PolicyError> {
        let parsed = Url::parse(url).map_err(|err| PolicyError::InvalidUrl {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PolicyError::InvalidUrl {
                url: url.to_string(),
                message: "not an http(s) url".to_string(),
            });
        }
        let origin = parsed.origin().ascii_serialization();

        let allowed = match self.rules_for(&origin).await?.as_ref() {
            Rules::AllowAll => true,
            Rules::DenyAll => false,
            Rules::Robots(body) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(body, &self.agent, parsed.as_str())
            }
        };
        harvest_debug!("robots: {} allowed={}", url, allowed);
        Ok(allowed)
    }
}
