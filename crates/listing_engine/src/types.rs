use std::fmt;

/// Placeholder written for any field that could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";

/// One job or internship posting as it is exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub title: String,
    pub skills: String,
    pub link: String,
}

impl ListingRecord {
    pub fn new(
        title: impl Into<String>,
        skills: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            skills: skills.into(),
            link: link.into(),
        }
    }

    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Title => &self.title,
            RecordField::Skills => &self.skills,
            RecordField::Link => &self.link,
        }
    }
}

impl Default for ListingRecord {
    fn default() -> Self {
        Self::new(NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Title,
    Skills,
    Link,
}

/// A record together with the page data that only filters look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedListing {
    pub record: ListingRecord,
    pub posted: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirected: bool,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Diagnostics emitted while a collection runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectEvent {
    PageStarted { page: u32, url: String },
    PageSkipped { page: u32, url: String },
    PageFailed { page: u32, url: String, reason: String },
    PageCollected { page: u32, found: usize, kept: usize },
}

impl fmt::Display for CollectEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectEvent::PageStarted { page, url } => write!(f, "Fetching page {page}: {url}"),
            CollectEvent::PageSkipped { url, .. } => {
                write!(f, "Scraping not allowed for URL: {url}")
            }
            CollectEvent::PageFailed { page, reason, .. } => {
                write!(f, "Page {page} failed: {reason}")
            }
            CollectEvent::PageCollected { page, found, kept } => {
                write!(f, "Page {page}: {kept} of {found} listings kept")
            }
        }
    }
}
