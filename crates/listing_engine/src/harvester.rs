use std::path::{Path, PathBuf};
use std::sync::Arc;

use listing_logging::harvest_info;

use crate::collect::{CollectError, CollectSettings, Collector, ProgressSink};
use crate::export::{
    export_records, internshala_columns, timesjobs_columns, Column, ExportError, ExportFormat,
};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::filter::{ListingFilter, SkillFilter};
use crate::robots::{CrawlPolicy, RobotsPolicy};
use crate::schema::{self, Normalization, SiteSchema, TIMESJOBS_DEFAULT_KEYWORDS};
use crate::ListingRecord;

pub const INTERNSHALA_CSV: &str = "internshala_jobs.csv";
pub const TIMESJOBS_XLSX: &str = "timesjobs_jobs.xlsx";
pub const POSTS_DIR: &str = "posts";
pub const TIMESJOBS_CSV: &str = "timesjobs_jobs.csv";

/// Where and how a job's records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub columns: Vec<Column>,
}

/// A complete collection run: what to fetch, what to keep, where to write.
pub struct HarvestJob {
    pub schema: SiteSchema,
    pub pages: u32,
    pub filter: Option<Box<dyn ListingFilter>>,
    pub destination: Option<Destination>,
    /// Write the file (header only) even when nothing was collected.
    pub write_empty: bool,
}

impl HarvestJob {
    /// Internshala's jobs page into `internshala_jobs.csv`.
    pub fn internshala(output_dir: &Path) -> Self {
        Self {
            schema: schema::internshala(),
            pages: 1,
            filter: None,
            destination: Some(Destination {
                path: output_dir.join(INTERNSHALA_CSV),
                format: ExportFormat::Csv,
                columns: internshala_columns(),
            }),
            write_empty: true,
        }
    }

    /// Default TimesJobs search over `pages` pages into `timesjobs_jobs.xlsx`.
    pub fn timesjobs(output_dir: &Path, pages: u32) -> Self {
        Self {
            schema: schema::timesjobs(TIMESJOBS_DEFAULT_KEYWORDS),
            pages,
            filter: None,
            destination: Some(Destination {
                path: output_dir.join(TIMESJOBS_XLSX),
                format: ExportFormat::Xlsx,
                columns: timesjobs_columns(),
            }),
            write_empty: true,
        }
    }

    /// Default TimesJobs search, kept in memory only.
    pub fn timesjobs_listing(pages: u32) -> Self {
        Self {
            destination: None,
            write_empty: false,
            ..Self::timesjobs(Path::new("."), pages)
        }
    }

    /// Recent TimesJobs postings for `skill` that list it among their skills.
    pub fn timesjobs_by_skill(output_dir: &Path, skill: &str, pages: u32) -> Self {
        let schema = schema::timesjobs(skill);
        let filter = recent_filter(&schema, SkillFilter::including(skill));
        Self::filtered_posts(output_dir, schema, filter, pages)
    }

    /// Recent default-search postings that do not mention `skill`.
    pub fn timesjobs_without_skill(output_dir: &Path, skill: &str, pages: u32) -> Self {
        let schema = schema::timesjobs(TIMESJOBS_DEFAULT_KEYWORDS);
        let filter = recent_filter(&schema, SkillFilter::excluding(skill));
        Self::filtered_posts(output_dir, schema, filter, pages)
    }

    /// Skills are compared with all whitespace removed, on both sides.
    fn filtered_posts(
        output_dir: &Path,
        schema: SiteSchema,
        filter: SkillFilter,
        pages: u32,
    ) -> Self {
        let normalization = Normalization::StripSpaces;
        Self {
            schema: schema.with_skills_normalization(normalization),
            pages,
            filter: Some(Box::new(filter.normalized(normalization))),
            destination: Some(Destination {
                path: output_dir.join(POSTS_DIR).join(TIMESJOBS_CSV),
                format: ExportFormat::Csv,
                columns: timesjobs_columns(),
            }),
            write_empty: false,
        }
    }

    /// Sends the job to another base URL; query and selectors stay the same.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.schema = self.schema.with_base_url(base_url);
        self
    }
}

fn recent_filter(schema: &SiteSchema, filter: SkillFilter) -> SkillFilter {
    match &schema.recency {
        Some(recency) => filter.posted_recently(&recency.marker),
        None => filter,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    pub records: Vec<ListingRecord>,
    pub exported: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Runs [`HarvestJob`]s: collect, then export.
pub struct Harvester {
    collector: Collector,
}

impl Harvester {
    /// Live HTTP fetcher plus a robots.txt policy built from the same settings.
    pub fn new(fetch: FetchSettings, collect: CollectSettings) -> Self {
        let policy: Arc<dyn CrawlPolicy> = Arc::new(RobotsPolicy::from_settings(&fetch));
        let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(fetch));
        Self::with_parts(fetcher, policy, collect)
    }

    pub fn with_parts(
        fetcher: Arc<dyn Fetcher>,
        policy: Arc<dyn CrawlPolicy>,
        collect: CollectSettings,
    ) -> Self {
        Self {
            collector: Collector::new(fetcher, policy, collect),
        }
    }

    pub async fn run(
        &self,
        job: &HarvestJob,
        sink: &dyn ProgressSink,
    ) -> Result<HarvestReport, HarvestError> {
        harvest_info!("{}: collecting {} page(s)", job.schema.name, job.pages);
        let records = self
            .collector
            .collect(&job.schema, job.pages, job.filter.as_deref(), sink)
            .await?;

        let exported = match &job.destination {
            Some(dest) if !records.is_empty() || job.write_empty => Some(export_records(
                &records,
                dest.format,
                &dest.columns,
                &dest.path,
            )?),
            _ => None,
        };

        Ok(HarvestReport { records, exported })
    }
}
