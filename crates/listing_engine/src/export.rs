use std::io;
use std::path::{Path, PathBuf};

use listing_logging::harvest_info;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::persist::{AtomicFileWriter, PersistError};
use crate::{ListingRecord, RecordField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

/// One output column: which record field, under which header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub field: RecordField,
    pub header: String,
}

impl Column {
    pub fn new(field: RecordField, header: impl Into<String>) -> Self {
        Self {
            field,
            header: header.into(),
        }
    }
}

/// `Job Name, More Info`
pub fn internshala_columns() -> Vec<Column> {
    vec![
        Column::new(RecordField::Title, "Job Name"),
        Column::new(RecordField::Link, "More Info"),
    ]
}

/// `Company, Skills, More Info`
pub fn timesjobs_columns() -> Vec<Column> {
    vec![
        Column::new(RecordField::Title, "Company"),
        Column::new(RecordField::Skills, "Skills"),
        Column::new(RecordField::Link, "More Info"),
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no columns to export")]
    NoColumns,
    #[error("destination {0:?} has no file name")]
    InvalidPath(PathBuf),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Writes `records` to `path`, replacing any existing file.
///
/// The whole file is rendered in memory and swapped into place in one step;
/// the parent directory is created when missing. Sentinel values are written
/// as-is.
pub fn export_records(
    records: &[ListingRecord],
    format: ExportFormat,
    columns: &[Column],
    path: &Path,
) -> Result<PathBuf, ExportError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ExportError::InvalidPath(path.to_path_buf()))?;

    let content = match format {
        ExportFormat::Csv => render_csv(records, columns)?,
        ExportFormat::Xlsx => render_xlsx(records, columns)?,
    };

    let written = AtomicFileWriter::for_path(path).write(filename, &content)?;
    harvest_info!(
        "Exported {} records to {:?} ({:?})",
        records.len(),
        written,
        format
    );
    Ok(written)
}

pub fn render_csv(records: &[ListingRecord], columns: &[Column]) -> Result<Vec<u8>, ExportError> {
    if columns.is_empty() {
        return Err(ExportError::NoColumns);
    }
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|c| c.header.as_str()))?;
    for record in records {
        writer.write_record(columns.iter().map(|c| record.field(c.field)))?;
    }
    writer.into_inner().map_err(|err| ExportError::Io(err.into_error()))
}

pub fn render_xlsx(records: &[ListingRecord], columns: &[Column]) -> Result<Vec<u8>, ExportError> {
    if columns.is_empty() {
        return Err(ExportError::NoColumns);
    }
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    {
        let sheet = workbook.add_worksheet();
        for (col, column) in (0u16..).zip(columns) {
            sheet.write_string_with_format(0, col, &column.header, &header_format)?;
        }
        for (row, record) in (1u32..).zip(records) {
            for (col, column) in (0u16..).zip(columns) {
                sheet.write_string(row, col, record.field(column.field))?;
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}
