use std::path::{Path, PathBuf};

use anyhow::Context;
use csv::StringRecord;
use itertools::Itertools;
use tracing::warn;

pub const CITY_COLUMN: &str = "Şehir";
pub const DISTRICT_COLUMN: &str = "İlçe Adı";

/// Every cleaned file of a directory stacked into one table. Columns are the
/// union of all files' headers; cells a file does not have are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(|row| {
            (0..self.columns.len())
                .map(|index| row.get(index).map(String::as_str).unwrap_or_default())
                .collect()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    fn append(&mut self, headers: &StringRecord, records: Vec<StringRecord>) {
        let positions: Vec<usize> = headers
            .iter()
            .map(|header| match self.column_index(header) {
                Some(index) => index,
                None => {
                    self.columns.push(header.to_string());
                    self.columns.len() - 1
                }
            })
            .collect();

        for record in records {
            let mut row = vec![String::new(); self.columns.len()];
            for (position, value) in positions.iter().zip(record.iter()) {
                row[*position] = value.to_string();
            }
            self.rows.push(row);
        }
    }

    fn values(&self, column: &str) -> Vec<String> {
        match self.column_index(column) {
            Some(index) => self
                .rows
                .iter()
                .filter_map(|row| row.get(index))
                .filter(|value| !value.is_empty())
                .cloned()
                .sorted()
                .dedup()
                .collect(),
            None => vec![],
        }
    }

    fn filter(&self, column: &str, expected: &str) -> Dataset {
        let rows = match self.column_index(column) {
            Some(index) => self
                .rows
                .iter()
                .filter(|row| row.get(index).map(String::as_str) == Some(expected))
                .cloned()
                .collect(),
            None => vec![],
        };
        Dataset {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Sorted distinct cities.
    pub fn cities(&self) -> Vec<String> {
        self.values(CITY_COLUMN)
    }

    pub fn in_city(&self, city: &str) -> Dataset {
        self.filter(CITY_COLUMN, city)
    }

    pub fn districts(&self) -> Vec<String> {
        self.values(DISTRICT_COLUMN)
    }

    pub fn in_district(&self, district: &str) -> Dataset {
        self.filter(DISTRICT_COLUMN, district)
    }
}

fn csv_files(directory: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("Failed to list {}", directory.display()))?;
    let mut files = vec![];
    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads every `.csv` file of `directory`. Files without the city and district
/// columns are skipped.
pub fn load_dataset(directory: &Path) -> anyhow::Result<Dataset> {
    let mut dataset = Dataset::default();
    for path in csv_files(directory)? {
        let mut reader = csv::Reader::from_path(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read headers of {}", path.display()))?
            .clone();
        let has_location = [CITY_COLUMN, DISTRICT_COLUMN]
            .iter()
            .all(|column| headers.iter().any(|header| header == *column));
        if !has_location {
            warn!(path = %path.display(), "Skipping file without city and district columns");
            continue;
        }

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read {}", path.display()))?;
        dataset.append(&headers, records);
    }
    Ok(dataset)
}
