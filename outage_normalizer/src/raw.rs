use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use entities::outages::OutageCategory;
use use_cases::import_outages::NormalizeError;

pub(crate) const CITY: &str = "Şehir";
pub(crate) const DISTRICT: &str = "İlçe Adı";
pub(crate) const DATE: &str = "Tarih";
pub(crate) const START: &str = "Başlangıç Tarih - Saati";
pub(crate) const END: &str = "Bitiş Tarih - Saati";
pub(crate) const AFFECTED_REGIONS: &str = "Bölgeler(Semt-Mahalle)";

/// One row of an export, projected to the columns we keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawOutage {
    pub city: String,
    pub district: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub affected_regions: String,
}

struct ColumnIndexes {
    city: usize,
    district: usize,
    date: usize,
    start: Option<usize>,
    end: Option<usize>,
    affected_regions: Option<usize>,
}

impl ColumnIndexes {
    /// Planned exports must carry all six columns. Unplanned exports only need
    /// city, district and date; the window and region columns are read when
    /// present and left empty otherwise.
    fn resolve(headers: &StringRecord, category: OutageCategory) -> Result<Self, NormalizeError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim_start_matches('\u{feff}').trim() == name)
        };
        let required =
            |name: &str| find(name).ok_or_else(|| NormalizeError::MissingColumn(name.to_string()));
        let planned_only = |name: &str| match category {
            OutageCategory::Planned => required(name).map(Some),
            OutageCategory::Unplanned => Ok(find(name)),
        };
        Ok(Self {
            city: required(CITY)?,
            district: required(DISTRICT)?,
            date: required(DATE)?,
            start: planned_only(START)?,
            end: planned_only(END)?,
            affected_regions: planned_only(AFFECTED_REGIONS)?,
        })
    }

    fn project(&self, record: &StringRecord) -> RawOutage {
        let field = |index: usize| record.get(index).unwrap_or_default().to_string();
        let optional = |index: Option<usize>| index.map(field).unwrap_or_default();
        RawOutage {
            city: field(self.city),
            district: field(self.district),
            date: field(self.date),
            start: optional(self.start),
            end: optional(self.end),
            affected_regions: optional(self.affected_regions),
        }
    }
}

/// Reads a semicolon separated export. Any malformed row fails the whole file.
pub(crate) fn read_raw_outages(
    path: &Path,
    category: OutageCategory,
) -> Result<Vec<RawOutage>, NormalizeError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = ColumnIndexes::resolve(&headers, category)?;

    reader
        .records()
        .map(|record| record.map(|record| columns.project(&record)).map_err(csv_error))
        .collect()
}

pub(crate) fn csv_error(err: csv::Error) -> NormalizeError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io_error) => NormalizeError::Io(io_error),
        _ => NormalizeError::Malformed(message),
    }
}

#[cfg(test)]
mod tests {
    use super::{read_raw_outages, RawOutage};
    use entities::outages::OutageCategory;
    use rstest::rstest;
    use use_cases::import_outages::NormalizeError;

    fn write(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    const HEADER: &str = "Şehir;İlçe Adı;Tarih;Başlangıç Tarih - Saati;Bitiş Tarih - Saati;Bölgeler(Semt-Mahalle);Dağıtım Şirketi";

    #[test]
    fn test_columns_are_projected_by_name() {
        let file = write(&format!(
            "{HEADER}\nANKARA;Çankaya;01.02.2024;01.02.2024 09:00;01.02.2024 17:00;Kızılay;BAŞKENT EDAŞ\n"
        ));
        let rows = read_raw_outages(file.path(), OutageCategory::Planned).unwrap();

        assert_eq!(
            rows,
            vec![RawOutage {
                city: "ANKARA".to_string(),
                district: "Çankaya".to_string(),
                date: "01.02.2024".to_string(),
                start: "01.02.2024 09:00".to_string(),
                end: "01.02.2024 17:00".to_string(),
                affected_regions: "Kızılay".to_string(),
            }]
        );
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let file = write(&format!("\u{feff}{HEADER}\n"));
        assert!(read_raw_outages(file.path(), OutageCategory::Planned)
            .unwrap()
            .is_empty());
    }

    #[rstest]
    #[case(OutageCategory::Planned)]
    #[case(OutageCategory::Unplanned)]
    fn test_missing_column_is_reported_by_name(#[case] category: OutageCategory) {
        let file = write("Şehir;Tarih;Başlangıç Tarih - Saati;Bitiş Tarih - Saati;Bölgeler(Semt-Mahalle)\n");
        match read_raw_outages(file.path(), category) {
            Err(NormalizeError::MissingColumn(column)) => assert_eq!(column, "İlçe Adı"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[rstest]
    #[case("Şehir;İlçe Adı;Tarih;Başlangıç Tarih - Saati", "Bitiş Tarih - Saati")]
    #[case(
        "Şehir;İlçe Adı;Tarih;Başlangıç Tarih - Saati;Bitiş Tarih - Saati",
        "Bölgeler(Semt-Mahalle)"
    )]
    fn test_planned_exports_need_the_outage_window_and_regions(
        #[case] header: &str,
        #[case] missing: &str,
    ) {
        let file = write(&format!("{header}\n"));
        match read_raw_outages(file.path(), OutageCategory::Planned) {
            Err(NormalizeError::MissingColumn(column)) => assert_eq!(column, missing),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn test_unplanned_exports_only_need_location_and_date() {
        let file = write("Şehir;İlçe Adı;Tarih\nİSTANBUL-ASYA;Kadıköy;01.02.2024\n");
        let rows = read_raw_outages(file.path(), OutageCategory::Unplanned).unwrap();

        assert_eq!(
            rows,
            vec![RawOutage {
                city: "İSTANBUL-ASYA".to_string(),
                district: "Kadıköy".to_string(),
                date: "01.02.2024".to_string(),
                start: String::new(),
                end: String::new(),
                affected_regions: String::new(),
            }]
        );
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let file = write(&format!("{HEADER}\nANKARA;Çankaya\n"));
        assert!(matches!(
            read_raw_outages(file.path(), OutageCategory::Planned),
            Err(NormalizeError::Malformed(_))
        ));
    }
}
