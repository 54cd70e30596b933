//! Output formatting and persistence for the country tally.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::atlas::Dataset;
use crate::country::CountryCount;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Serializable summary of one load.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub fetched_at: DateTime<Utc>,
    pub events: usize,
    pub skipped: usize,
    pub countries: Vec<CountryCount>,
}

impl Summary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            fetched_at: dataset.fetched_at(),
            events: dataset.events().len(),
            skipped: dataset.skipped(),
            countries: dataset.tally(),
        }
    }
}

/// One CSV row: a country's count at fetch time.
#[derive(Debug, Serialize)]
struct TallyRecord<'a> {
    fetched_at: DateTime<Utc>,
    country: &'a str,
    count: usize,
}

/// Logs the summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &Summary) {
    debug!("{:#?}", summary);
}

/// Logs the summary as pretty-printed JSON.
pub fn print_json(summary: &Summary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Appends one row per country of `summary` to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_tally(path: &str, summary: &Summary) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = summary.countries.len(), "Appending tally rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // header only on a fresh file
        .from_writer(file);

    for row in &summary.countries {
        writer.serialize(TallyRecord {
            fetched_at: summary.fetched_at,
            country: &row.country,
            count: row.count,
        })?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EarthquakeEvent;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn summary() -> Summary {
        let events = ["x, Chile", "y, Chile", "z, Peru"]
            .iter()
            .enumerate()
            .map(|(i, place)| EarthquakeEvent {
                id: i.to_string(),
                longitude: 0.0,
                latitude: 0.0,
                magnitude: None,
                place: Some(place.to_string()),
                time_millis: None,
            })
            .collect();
        Summary::from_dataset(&Dataset::from_events(events))
    }

    #[test]
    fn test_summary_from_dataset() {
        let s = summary();
        assert_eq!(s.events, 3);
        assert_eq!(s.skipped, 0);
        assert_eq!(s.countries[0].country, "Chile");
        assert_eq!(s.countries[0].count, 2);
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&summary());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&summary()).unwrap();
    }

    #[test]
    fn test_append_tally_writes_header_once() {
        let path = temp_path("quake_atlas_test_header.csv");
        let _ = fs::remove_file(&path);

        let s = summary();
        append_tally(&path, &s).unwrap();
        append_tally(&path, &s).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.contains("fetched_at")).count();
        assert_eq!(header_count, 1);
        // 1 header + 2 rows per append
        assert_eq!(content.lines().count(), 5);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_tally_row_content() {
        let path = temp_path("quake_atlas_test_rows.csv");
        let _ = fs::remove_file(&path);

        append_tally(&path, &summary()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "fetched_at,country,count");
        assert!(lines[1].ends_with(",Chile,2"));
        assert!(lines[2].ends_with(",Peru,1"));

        fs::remove_file(&path).unwrap();
    }
}
