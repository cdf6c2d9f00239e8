//! Listing engine: fetch, parse, extract, filter and export job listings.
mod collect;
mod export;
mod extract;
mod fetch;
mod filter;
mod harvester;
mod parse;
mod persist;
mod robots;
pub mod schema;
mod types;

pub use collect::{CollectError, CollectSettings, Collector, LogProgressSink, ProgressSink};
pub use export::{
    export_records, internshala_columns, render_csv, render_xlsx, timesjobs_columns, Column,
    ExportError, ExportFormat,
};
pub use extract::{FieldExtractor, SchemaError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use filter::{KeywordMode, ListingFilter, SkillFilter};
pub use harvester::{
    Destination, HarvestError, HarvestJob, HarvestReport, Harvester, INTERNSHALA_CSV, POSTS_DIR,
    TIMESJOBS_CSV, TIMESJOBS_XLSX,
};
pub use parse::{decode_page, parse_page, DecodedPage, ParseError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use robots::{CrawlPolicy, PolicyError, RobotsPolicy, DEFAULT_POLICY_AGENT};
pub use schema::{FetchTarget, Normalization, SiteSchema};
pub use types::{
    CollectEvent, ExtractedListing, FailureKind, FetchError, FetchMetadata, FetchOutput,
    ListingRecord, RecordField, NOT_AVAILABLE,
};
