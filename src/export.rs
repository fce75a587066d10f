//! CSV exports of the timeline and the example publication table.

use crate::dataset::{DomainDataset, PublicationRecord, TimeSeries};
use crate::domain::Domain;
use crate::error::{Result, TechTrendsError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Timeline row; counts are truncated toward zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    #[serde(rename = "Дата")]
    pub date: NaiveDate,
    #[serde(rename = "Публикации")]
    pub publications: i64,
    #[serde(rename = "Патенты")]
    pub patents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationRow {
    #[serde(rename = "Дата")]
    pub date: NaiveDate,
    #[serde(rename = "Название")]
    pub title: String,
    #[serde(rename = "Цитирования")]
    pub citations: u32,
    #[serde(rename = "Авторы")]
    pub authors: String,
    #[serde(rename = "Тип")]
    pub kind: String,
}

impl From<&PublicationRecord> for PublicationRow {
    fn from(record: &PublicationRecord) -> Self {
        Self {
            date: record.date,
            title: record.title.clone(),
            citations: record.citations,
            authors: record.authors.clone(),
            kind: record.kind.clone(),
        }
    }
}

pub const TIMELINE_COLUMNS: [&str; 3] = ["Дата", "Публикации", "Патенты"];
pub const PUBLICATION_COLUMNS: [&str; 5] = ["Дата", "Название", "Цитирования", "Авторы", "Тип"];

pub fn timeline_file_name(domain: Domain) -> String {
    format!("{}_timeline.csv", domain.slug())
}

pub fn publications_file_name(domain: Domain) -> String {
    format!("{}_data.csv", domain.slug())
}

fn write_rows<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| TechTrendsError::Export {
            message: format!("CSV buffer flush failed: {}", e.error()),
        })
}

/// Full time series as UTF-8 CSV with a header row
pub fn timeline_csv(series: &TimeSeries) -> Result<Vec<u8>> {
    write_rows(series.points().iter().map(|p| TimelineRow {
        date: p.date,
        publications: p.publications.trunc() as i64,
        patents: p.patents.trunc() as i64,
    }))
}

/// Example publication table as UTF-8 CSV with a header row
pub fn publications_csv(records: &[PublicationRecord]) -> Result<Vec<u8>> {
    write_rows(records.iter().map(PublicationRow::from))
}

pub fn parse_timeline_csv(data: &[u8]) -> Result<Vec<TimelineRow>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn parse_publications_csv(data: &[u8]) -> Result<Vec<PublicationRow>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Header names of an exported CSV
pub fn csv_columns(data: &[u8]) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_reader(data);
    Ok(reader.headers()?.iter().map(str::to_string).collect())
}

/// Write `data` to `dir/name`, creating the directory if needed
pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, data)?;
    tracing::info!(path = %path.display(), bytes = data.len(), "export written");
    Ok(path)
}

pub fn export_timeline(dataset: &DomainDataset, dir: &Path) -> Result<PathBuf> {
    let data = timeline_csv(&dataset.series)?;
    write_file(dir, &timeline_file_name(dataset.domain), &data)
}

pub fn export_publications(dataset: &DomainDataset, dir: &Path) -> Result<PathBuf> {
    let data = publications_csv(&dataset.publications)?;
    write_file(dir, &publications_file_name(dataset.domain), &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SeriesPoint;

    #[test]
    fn timeline_truncates_counts() {
        let series = TimeSeries::new(vec![SeriesPoint {
            date: NaiveDate::from_ymd_opt(2018, 1, 31).unwrap(),
            publications: 41.97,
            patents: 20.2,
        }]);
        let csv = String::from_utf8(timeline_csv(&series).unwrap()).unwrap();
        assert_eq!(csv, "Дата,Публикации,Патенты\n2018-01-31,41,20\n");
    }

    #[test]
    fn file_names_use_slug() {
        assert_eq!(
            timeline_file_name(Domain::GeneEngineering),
            "генная_инженерия_timeline.csv"
        );
        assert_eq!(
            publications_file_name(Domain::Semiconductors),
            "полупроводники_data.csv"
        );
    }

    #[test]
    fn empty_series_exports_no_rows() {
        let data = timeline_csv(&TimeSeries::default()).unwrap();
        assert!(parse_timeline_csv(&data).unwrap().is_empty());
    }
}
