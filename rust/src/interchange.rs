//! CSV persistence of activity records.
//!
//! Layout: a header row `Name,Start Event,End Event,Duration` followed by one
//! row per activity. Loading is lenient: rows that do not have exactly four
//! fields, or whose numeric fields are not non-negative integers, are skipped.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

use crate::log_checks;
use crate::models::Activity;

/// Column labels of the header row.
pub const HEADER: [&str; 4] = ["Name", "Start Event", "End Event", "Duration"];

#[derive(Error, Debug)]
pub enum InterchangeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write activities with a leading header row.
pub fn write_activities<W: Write>(
    writer: W,
    activities: &[Activity],
) -> Result<(), InterchangeError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for activity in activities {
        wtr.write_record([
            activity.name.clone(),
            activity.start_event.to_string(),
            activity.end_event.to_string(),
            activity.duration.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save activities to a CSV file, replacing its contents.
pub fn save_activities(
    path: impl AsRef<Path>,
    activities: &[Activity],
) -> Result<(), InterchangeError> {
    let file = File::create(path)?;
    write_activities(file, activities)
}

fn parse_record(record: &csv::StringRecord) -> Option<Activity> {
    if record.len() != HEADER.len() {
        return None;
    }
    let number = |i: usize| record.get(i).and_then(|s| s.trim().parse::<u64>().ok());
    Some(Activity::new(
        record.get(0)?.to_string(),
        number(1)?,
        number(2)?,
        number(3)?,
    ))
}

/// Read activities from CSV. The first row is taken as the header whatever it
/// contains. Event order is not checked here.
pub fn read_activities<R: Read>(
    reader: R,
    verbosity: u8,
) -> Result<Vec<Activity>, InterchangeError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut activities = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        match parse_record(&record) {
            Some(activity) => activities.push(activity),
            None => {
                // Header is row 1
                log_checks!(verbosity, "[cpm] skipping CSV row {}: {:?}", row + 2, record);
            }
        }
    }
    Ok(activities)
}

/// Load activities from a CSV file.
pub fn load_activities(
    path: impl AsRef<Path>,
    verbosity: u8,
) -> Result<Vec<Activity>, InterchangeError> {
    let file = File::open(path)?;
    read_activities(file, verbosity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(name: &str, start: u64, end: u64, duration: u64) -> Activity {
        Activity::new(name.to_string(), start, end, duration)
    }

    #[test]
    fn test_write_layout() {
        let mut buf = Vec::new();
        write_activities(
            &mut buf,
            &[make_activity("A", 1, 2, 3), make_activity("Pour, cure", 2, 3, 4)],
        )
        .unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Name,Start Event,End Event,Duration\nA,1,2,3\n\"Pour, cure\",2,3,4\n"
        );
    }

    #[test]
    fn test_read_skips_malformed_rows() {
        let input = "Name,Start Event,End Event,Duration\n\
                     A,1,2,3\n\
                     short,1,2\n\
                     B,x,3,4\n\
                     C,2,3,-1\n\
                     D, 2 ,4,5\n\
                     E,1,2,3,extra\n";
        let activities = read_activities(input.as_bytes(), 0).unwrap();

        assert_eq!(
            activities,
            vec![make_activity("A", 1, 2, 3), make_activity("D", 2, 4, 5)]
        );
    }

    #[test]
    fn test_read_does_not_check_event_order() {
        let input = "Name,Start Event,End Event,Duration\nBack,5,2,1\n";
        let activities = read_activities(input.as_bytes(), 0).unwrap();
        assert_eq!(activities, vec![make_activity("Back", 5, 2, 1)]);
    }

    #[test]
    fn test_read_header_only_and_empty() {
        assert!(read_activities(&b"Name,Start Event,End Event,Duration\n"[..], 0)
            .unwrap()
            .is_empty());
        assert!(read_activities(&b""[..], 0).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.csv");
        let activities = vec![
            make_activity("A", 1, 2, 5),
            make_activity("B", 1, 3, 2),
            make_activity("B", 1, 3, 2),
        ];

        save_activities(&path, &activities).unwrap();
        let loaded = load_activities(&path, 0).unwrap();

        assert_eq!(loaded, activities);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_activities(dir.path().join("missing.csv"), 0).unwrap_err();
        assert!(matches!(err, InterchangeError::Io(_)));
    }
}
