use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use entities::locations::LocationQuery;
use entities::outages::{OutageCategory, OutageRecord};
use use_cases::geocoding::{geocode_many, Geocoder};
use use_cases::import_outages::{NormalizeError, NormalizedFile, OutageNormalizer};

use crate::aggregation::count_outages;
use crate::cleaning::{clean_outages, AliasTable};
use crate::config::NormalizerSettings;
use crate::raw::read_raw_outages;
use crate::writer::{persist_rows, PlannedRow, UnplannedRow, PLANNED_HEADERS, UNPLANNED_HEADERS};

/// Rewrites a raw semicolon separated export in place as a cleaned, geocoded
/// comma separated file.
pub struct CsvOutageNormalizer {
    geocoder: Arc<dyn Geocoder>,
    aliases: AliasTable,
}

impl CsvOutageNormalizer {
    pub fn new(geocoder: Arc<dyn Geocoder>, settings: NormalizerSettings) -> Self {
        Self {
            geocoder,
            aliases: AliasTable::new(settings.central_district_aliases),
        }
    }

    async fn write_planned(
        &self,
        destination: &Path,
        records: &[OutageRecord],
    ) -> Result<usize, NormalizeError> {
        let coordinates =
            geocode_many(self.geocoder.as_ref(), records.iter().map(LocationQuery::from)).await;
        let rows: Vec<_> = records
            .iter()
            .map(|record| {
                let point = coordinates
                    .get(&LocationQuery::from(record))
                    .and_then(Option::as_ref);
                PlannedRow::new(record, point)
            })
            .collect();
        persist_rows(destination, &PLANNED_HEADERS, &rows)?;
        Ok(rows.len())
    }

    async fn write_unplanned(
        &self,
        destination: &Path,
        records: &[OutageRecord],
    ) -> Result<usize, NormalizeError> {
        let counts = count_outages(records);
        let coordinates = geocode_many(
            self.geocoder.as_ref(),
            counts.iter().map(|count| LocationQuery::from(&count.key)),
        )
        .await;
        let rows: Vec<_> = counts
            .iter()
            .map(|count| {
                let point = coordinates
                    .get(&LocationQuery::from(&count.key))
                    .and_then(Option::as_ref);
                UnplannedRow::new(count, point)
            })
            .collect();
        persist_rows(destination, &UNPLANNED_HEADERS, &rows)?;
        Ok(rows.len())
    }
}

#[async_trait]
impl OutageNormalizer for CsvOutageNormalizer {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn normalize(
        &self,
        raw_file: &Path,
        category: OutageCategory,
    ) -> Result<NormalizedFile, NormalizeError> {
        let raw = read_raw_outages(raw_file, category)?;
        let records = clean_outages(raw, &self.aliases);
        tracing::debug!(rows = records.len(), "Cleaned raw export");

        let rows = match category {
            OutageCategory::Planned => self.write_planned(raw_file, &records).await?,
            OutageCategory::Unplanned => self.write_unplanned(raw_file, &records).await?,
        };
        Ok(NormalizedFile {
            path: raw_file.to_path_buf(),
            rows,
        })
    }
}
