use std::path::Path;

use chrono::NaiveDateTime;
use csv::WriterBuilder;
use entities::locations::Coordinates;
use entities::outages::{OutageCount, OutageRecord};
use serde::Serialize;
use tempfile::NamedTempFile;
use use_cases::import_outages::NormalizeError;

use crate::raw::{csv_error, AFFECTED_REGIONS, CITY, DATE, DISTRICT, END, START};

const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const OUTAGE_COUNT: &str = "Kesinti Sayısı";
const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";

pub(crate) const PLANNED_HEADERS: [&str; 8] = [
    CITY,
    DISTRICT,
    DATE,
    START,
    END,
    AFFECTED_REGIONS,
    LATITUDE,
    LONGITUDE,
];

pub(crate) const UNPLANNED_HEADERS: [&str; 6] =
    [CITY, DISTRICT, DATE, OUTAGE_COUNT, LATITUDE, LONGITUDE];

#[derive(Serialize)]
pub(crate) struct PlannedRow<'a> {
    city: &'a str,
    district: &'a str,
    date: &'a str,
    start: Option<String>,
    end: Option<String>,
    affected_regions: &'a str,
    latitude: Option<&'a str>,
    longitude: Option<&'a str>,
}

impl<'a> PlannedRow<'a> {
    pub(crate) fn new(record: &'a OutageRecord, coordinates: Option<&'a Coordinates>) -> Self {
        Self {
            city: record.city.as_ref(),
            district: record.district.as_ref(),
            date: &record.date,
            start: record.start.map(format_timestamp),
            end: record.end.map(format_timestamp),
            affected_regions: &record.affected_regions,
            latitude: coordinates.map(Coordinates::latitude),
            longitude: coordinates.map(Coordinates::longitude),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct UnplannedRow<'a> {
    city: &'a str,
    district: &'a str,
    date: &'a str,
    count: usize,
    latitude: Option<&'a str>,
    longitude: Option<&'a str>,
}

impl<'a> UnplannedRow<'a> {
    pub(crate) fn new(outages: &'a OutageCount, coordinates: Option<&'a Coordinates>) -> Self {
        Self {
            city: outages.key.city.as_ref(),
            district: outages.key.district.as_ref(),
            date: &outages.key.date,
            count: outages.count,
            latitude: coordinates.map(Coordinates::latitude),
            longitude: coordinates.map(Coordinates::longitude),
        }
    }
}

fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string()
}

/// Writes a comma separated file next to `destination` and moves it into place
/// once every row is written, so a failure leaves the previous file untouched.
pub(crate) fn persist_rows<R: Serialize>(
    destination: &Path,
    headers: &[&str],
    rows: &[R],
) -> Result<(), NormalizeError> {
    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(directory)?;
    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(staged.as_file_mut());
        writer.write_record(headers).map_err(csv_error)?;
        for row in rows {
            writer.serialize(row).map_err(csv_error)?;
        }
        writer.flush()?;
    }
    staged
        .persist(destination)
        .map_err(|err| NormalizeError::Io(err.error))?;
    Ok(())
}
