use std::sync::Arc;
use std::time::Duration;

use listing_logging::{harvest_info, harvest_warn};

use crate::extract::{FieldExtractor, SchemaError};
use crate::filter::ListingFilter;
use crate::parse::{parse_page, ParseError};
use crate::robots::{CrawlPolicy, PolicyError};
use crate::schema::SiteSchema;
use crate::{CollectEvent, FetchError, FetchOutput, Fetcher, ListingRecord};

/// Receives per-page diagnostics while a collection runs.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: CollectEvent);
}

/// Sink that only writes events to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: CollectEvent) {
        match &event {
            CollectEvent::PageSkipped { .. } | CollectEvent::PageFailed { .. } => {
                harvest_warn!("{event}")
            }
            _ => harvest_info!("{event}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectSettings {
    /// Pause between two page fetches of the same collection.
    pub page_delay: Duration,
}

impl Default for CollectSettings {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("cannot build page url from {base_url:?}: {message}")]
    InvalidTarget { base_url: String, message: String },
}

#[derive(Debug, thiserror::Error)]
enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Walks the result pages of one site and accumulates records.
pub struct Collector {
    fetcher: Arc<dyn Fetcher>,
    policy: Arc<dyn CrawlPolicy>,
    settings: CollectSettings,
}

impl Collector {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        policy: Arc<dyn CrawlPolicy>,
        settings: CollectSettings,
    ) -> Self {
        Self {
            fetcher,
            policy,
            settings,
        }
    }

    /// Collects pages `1..=pages` in order.
    ///
    /// A page denied by the crawl policy, or one whose fetch or parse fails,
    /// contributes nothing and the loop moves on. Only an unreachable crawl
    /// policy aborts the whole collection. Sites without a page parameter
    /// are fetched once.
    pub async fn collect(
        &self,
        schema: &SiteSchema,
        pages: u32,
        filter: Option<&dyn ListingFilter>,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<ListingRecord>, CollectError> {
        let extractor = FieldExtractor::new(schema)?;
        let pages = if schema.paginates() { pages } else { pages.min(1) };
        let mut records = Vec::new();
        let mut fetched_before = false;

        for page in 1..=pages {
            let target = schema.target(page);
            let url = target
                .url()
                .map_err(|err| CollectError::InvalidTarget {
                    base_url: target.base_url.clone(),
                    message: err.to_string(),
                })?
                .to_string();

            if !self.policy.is_allowed(&url).await? {
                sink.emit(CollectEvent::PageSkipped { page, url });
                continue;
            }

            if fetched_before && !self.settings.page_delay.is_zero() {
                tokio::time::sleep(self.settings.page_delay).await;
            }
            fetched_before = true;

            sink.emit(CollectEvent::PageStarted {
                page,
                url: url.clone(),
            });
            match self.collect_page(&extractor, &url, filter).await {
                Ok((found, kept)) => {
                    sink.emit(CollectEvent::PageCollected {
                        page,
                        found,
                        kept: kept.len(),
                    });
                    records.extend(kept);
                }
                Err(err) => sink.emit(CollectEvent::PageFailed {
                    page,
                    url,
                    reason: err.to_string(),
                }),
            }
        }

        harvest_info!("{}: collected {} records", schema.name, records.len());
        Ok(records)
    }

    async fn collect_page(
        &self,
        extractor: &FieldExtractor,
        url: &str,
        filter: Option<&dyn ListingFilter>,
    ) -> Result<(usize, Vec<ListingRecord>), PageError> {
        let output = self.fetcher.fetch(url).await?;
        Ok(extract_records(extractor, &output, filter)?)
    }
}

fn extract_records(
    extractor: &FieldExtractor,
    output: &FetchOutput,
    filter: Option<&dyn ListingFilter>,
) -> Result<(usize, Vec<ListingRecord>), ParseError> {
    let document = parse_page(&output.bytes, output.metadata.content_type.as_deref())?;
    let listings = extractor.extract_page(&document);
    let found = listings.len();
    let kept = listings
        .into_iter()
        .filter(|listing| filter.is_none_or(|f| f.accept(listing)))
        .map(|listing| listing.record)
        .collect();
    Ok((found, kept))
}
