use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use listing_core::Operation;
use listing_engine::{
    CollectEvent, CollectSettings, FetchSettings, HarvestJob, HarvestReport, Harvester,
    LogProgressSink, ProgressSink,
};
use listing_logging::{harvest_info, harvest_warn};
use tokio::runtime::Runtime;

use super::shell::OperationRunner;

pub const NO_MATCHES: &str = "No jobs found with the specified criteria.";

/// Runs operations on the engine, one at a time, on a current-thread runtime.
pub struct EffectRunner {
    runtime: Runtime,
    harvester: Harvester,
    output_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(output_dir: PathBuf) -> anyhow::Result<Self> {
        let harvester = Harvester::new(FetchSettings::default(), CollectSettings::default());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start the async runtime")?;
        Ok(Self {
            runtime,
            harvester,
            output_dir,
        })
    }
}

impl OperationRunner for EffectRunner {
    fn run(&mut self, operation: &Operation, out: &mut (dyn Write + Send)) -> anyhow::Result<()> {
        let job = job_for(operation, &self.output_dir);
        let report = {
            let sink = ConsoleSink::new(&mut *out);
            self.runtime.block_on(self.harvester.run(&job, &sink))?
        };
        harvest_info!(
            "{:?}: {} record(s), exported to {:?}",
            operation,
            report.records.len(),
            report.exported
        );
        report_outcome(operation, &report, out)?;
        Ok(())
    }
}

/// Engine job for a menu operation; files land under `output_dir`.
pub fn job_for(operation: &Operation, output_dir: &Path) -> HarvestJob {
    match operation {
        Operation::ScrapeInternshala => HarvestJob::internshala(output_dir),
        Operation::ScrapeTimesJobs { pages } => HarvestJob::timesjobs(output_dir, *pages),
        Operation::FindBySkill { skill, pages } => {
            HarvestJob::timesjobs_by_skill(output_dir, skill, *pages)
        }
        Operation::ListTimesJobs { pages } => HarvestJob::timesjobs_listing(*pages),
        Operation::SkipUnfamiliarSkill { skill, pages } => {
            HarvestJob::timesjobs_without_skill(output_dir, skill, *pages)
        }
    }
}

fn report_outcome(
    operation: &Operation,
    report: &HarvestReport,
    out: &mut dyn Write,
) -> io::Result<()> {
    if let Operation::ListTimesJobs { .. } = operation {
        if report.records.is_empty() {
            return writeln!(out, "{NO_MATCHES}");
        }
        for record in &report.records {
            writeln!(
                out,
                "Company: {}\nSkills: {}\nMore Info: {}\n",
                record.title, record.skills, record.link
            )?;
        }
        return Ok(());
    }

    match &report.exported {
        Some(path) => writeln!(out, "File saved: {}", path.display()),
        None => writeln!(out, "{NO_MATCHES}"),
    }
}

/// Prints page progress to the shell output as it happens and mirrors it
/// to the log.
struct ConsoleSink<'a> {
    out: Mutex<&'a mut (dyn Write + Send)>,
}

impl<'a> ConsoleSink<'a> {
    fn new(out: &'a mut (dyn Write + Send)) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl ProgressSink for ConsoleSink<'_> {
    fn emit(&self, event: CollectEvent) {
        LogProgressSink.emit(event.clone());
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(err) = writeln!(out, "{event}").and_then(|()| out.flush()) {
            harvest_warn!("Cannot print progress: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_engine::{
        ExportFormat, ListingRecord, Normalization, POSTS_DIR, TIMESJOBS_CSV, TIMESJOBS_XLSX,
    };
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn keywords(job: &HarvestJob) -> Option<&str> {
        job.schema
            .query
            .iter()
            .find(|(key, _)| key == "txtKeywords")
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn skill_search_targets_posts_csv() {
        let temp = TempDir::new().unwrap();
        let job = job_for(
            &Operation::FindBySkill {
                skill: "rust".to_string(),
                pages: 3,
            },
            temp.path(),
        );

        assert_eq!(job.pages, 3);
        assert_eq!(keywords(&job), Some("rust"));
        assert!(job.filter.is_some());
        assert!(!job.write_empty);
        assert_eq!(job.schema.skills_normalization, Normalization::StripSpaces);
        let dest = job.destination.unwrap();
        assert_eq!(dest.path, temp.path().join(POSTS_DIR).join(TIMESJOBS_CSV));
        assert_eq!(dest.format, ExportFormat::Csv);
    }

    #[test]
    fn unfamiliar_skill_keeps_default_search() {
        let temp = TempDir::new().unwrap();
        let job = job_for(
            &Operation::SkipUnfamiliarSkill {
                skill: "java".to_string(),
                pages: 1,
            },
            temp.path(),
        );
        assert_eq!(keywords(&job), Some("internship computer science"));
        assert!(job.filter.is_some());
    }

    #[test]
    fn bulk_timesjobs_writes_spreadsheet_even_when_empty() {
        let temp = TempDir::new().unwrap();
        let job = job_for(&Operation::ScrapeTimesJobs { pages: 2 }, temp.path());
        assert!(job.write_empty);
        assert!(job.filter.is_none());
        assert_eq!(
            job.destination.map(|d| d.path),
            Some(temp.path().join(TIMESJOBS_XLSX))
        );
    }

    #[test]
    fn listing_has_no_destination() {
        let job = job_for(&Operation::ListTimesJobs { pages: 2 }, Path::new("."));
        assert!(job.destination.is_none());
    }

    #[test]
    fn listing_prints_every_record() {
        let report = HarvestReport {
            records: vec![
                ListingRecord::new("Acme", "python,sql", "https://jobs.example/1"),
                ListingRecord::default(),
            ],
            exported: None,
        };
        let mut out = Vec::new();
        report_outcome(&Operation::ListTimesJobs { pages: 1 }, &report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(
            "Company: Acme\nSkills: python,sql\nMore Info: https://jobs.example/1\n\n"
        ));
        assert!(text.contains("Company: N/A\n"));
    }

    #[test]
    fn progress_goes_to_shell_output() {
        let mut out = Vec::new();
        {
            let sink = ConsoleSink::new(&mut out);
            sink.emit(CollectEvent::PageStarted {
                page: 1,
                url: "https://jobs.example/search?sequence=1".to_string(),
            });
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Fetching page 1: https://jobs.example/search?sequence=1\n"
        );
    }

    #[test]
    fn saved_file_and_empty_result_messages() {
        let mut out = Vec::new();
        let saved = HarvestReport {
            records: Vec::new(),
            exported: Some(PathBuf::from("internshala_jobs.csv")),
        };
        report_outcome(&Operation::ScrapeInternshala, &saved, &mut out).unwrap();

        let empty = HarvestReport {
            records: Vec::new(),
            exported: None,
        };
        let op = Operation::FindBySkill {
            skill: "haskell".to_string(),
            pages: 1,
        };
        report_outcome(&op, &empty, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("File saved: internshala_jobs.csv\n{NO_MATCHES}\n")
        );
    }
}
