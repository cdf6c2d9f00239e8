use std::fs;
use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};
use listing_engine::{
    export_records, internshala_columns, timesjobs_columns, ExportError, ExportFormat,
    ListingRecord, NOT_AVAILABLE,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn sample_records() -> Vec<ListingRecord> {
    vec![
        ListingRecord::new("Acme", "Python, SQL", "https://jobs.example/acme"),
        ListingRecord::new("Globex", NOT_AVAILABLE, "https://jobs.example/globex"),
        ListingRecord::new("Initech \"Labs\"", "rust", NOT_AVAILABLE),
    ]
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|row| row.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

fn read_xlsx(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn as_rows(records: &[ListingRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| vec![r.title.clone(), r.skills.clone(), r.link.clone()])
        .collect()
}

#[test]
fn csv_round_trip_preserves_order_and_sentinels() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("posts").join("timesjobs_jobs.csv");

    let written =
        export_records(&sample_records(), ExportFormat::Csv, &timesjobs_columns(), &path).unwrap();
    assert_eq!(written, path);

    let (headers, rows) = read_csv(&path);
    assert_eq!(headers, vec!["Company", "Skills", "More Info"]);
    assert_eq!(rows, as_rows(&sample_records()));
}

#[test]
fn xlsx_round_trip_preserves_order_and_sentinels() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("timesjobs_jobs.xlsx");

    export_records(&sample_records(), ExportFormat::Xlsx, &timesjobs_columns(), &path).unwrap();

    let rows = read_xlsx(&path);
    assert_eq!(rows[0], vec!["Company", "Skills", "More Info"]);
    assert_eq!(rows[1..].to_vec(), as_rows(&sample_records()));
}

#[test]
fn column_layout_selects_and_renames_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("internshala_jobs.csv");

    export_records(&sample_records(), ExportFormat::Csv, &internshala_columns(), &path).unwrap();

    let (headers, rows) = read_csv(&path);
    assert_eq!(headers, vec!["Job Name", "More Info"]);
    assert_eq!(
        rows[1],
        vec!["Globex".to_string(), "https://jobs.example/globex".to_string()]
    );
}

#[test]
fn empty_export_writes_header_only() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("internshala_jobs.csv");

    export_records(&[], ExportFormat::Csv, &internshala_columns(), &path).unwrap();

    let (headers, rows) = read_csv(&path);
    assert_eq!(headers, vec!["Job Name", "More Info"]);
    assert!(rows.is_empty());
}

#[test]
fn export_replaces_previous_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("jobs.csv");
    fs::write(&path, "stale,content\nfrom,before\nand,more\n").unwrap();

    let records = vec![ListingRecord::new("Acme", "go", "https://jobs.example/acme")];
    export_records(&records, ExportFormat::Csv, &timesjobs_columns(), &path).unwrap();

    let (_, rows) = read_csv(&path);
    assert_eq!(rows, as_rows(&records));
}

#[test]
fn destination_under_a_file_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("posts");
    fs::write(&blocker, "not a directory").unwrap();

    let err = export_records(
        &sample_records(),
        ExportFormat::Csv,
        &timesjobs_columns(),
        &blocker.join("jobs.csv"),
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::Persist(_)));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
}
