use chrono::NaiveDateTime;
use entities::outages::{CityName, DistrictName, OutageRecord};

use crate::config::CentralDistrictAlias;
use crate::raw::RawOutage;

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";
const ISTANBUL_SIDES: [&str; 2] = ["İSTANBUL-AVRUPA", "İSTANBUL-ASYA"];
const ISTANBUL: &str = "ISTANBUL";
const CENTRAL_DISTRICT: &str = "Merkez";

/// Unparseable timestamps become `None` instead of failing the row.
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}

/// `"Çankaya / Kızılay"` style values keep the trimmed part before the first `/`.
pub(crate) fn clean_district(district: &str) -> String {
    match district.split_once('/') {
        Some((first, _)) => first.trim().to_string(),
        None => district.to_string(),
    }
}

pub(crate) fn transliterate_city(city: &str) -> String {
    city.replace('Ç', "C").replace('İ', "I").replace('Ş', "S")
}

fn fold_istanbul(value: String) -> String {
    if ISTANBUL_SIDES.contains(&value.as_str()) {
        ISTANBUL.to_string()
    } else {
        value
    }
}

pub(crate) struct AliasTable {
    central_districts: Vec<CentralDistrictAlias>,
}

impl AliasTable {
    pub(crate) fn new(central_districts: Vec<CentralDistrictAlias>) -> Self {
        Self { central_districts }
    }

    /// Folds the two Istanbul sides into one city and known central district
    /// labels into `Merkez`. Values must match exactly.
    fn fold(&self, city: String, district: String) -> (String, String) {
        let is_central = self
            .central_districts
            .iter()
            .any(|alias| alias.city == city && alias.district == district);
        let district = if is_central {
            CENTRAL_DISTRICT.to_string()
        } else {
            fold_istanbul(district)
        };
        (fold_istanbul(city), district)
    }
}

fn clean_outage(raw: RawOutage, aliases: &AliasTable) -> OutageRecord {
    let district = clean_district(&raw.district);
    let (city, district) = aliases.fold(raw.city, district);
    OutageRecord {
        city: CityName::from(transliterate_city(&city)),
        district: DistrictName::from(district),
        date: raw.date,
        start: parse_timestamp(&raw.start),
        end: parse_timestamp(&raw.end),
        affected_regions: raw.affected_regions,
    }
}

/// Cleans every row and orders them by city, keeping the export order within a
/// city.
pub(crate) fn clean_outages(raw: Vec<RawOutage>, aliases: &AliasTable) -> Vec<OutageRecord> {
    let mut records: Vec<_> = raw
        .into_iter()
        .map(|outage| clean_outage(outage, aliases))
        .collect();
    records.sort_by(|left, right| left.city.cmp(&right.city));
    records
}

#[cfg(test)]
mod tests {
    use super::{clean_district, clean_outages, parse_timestamp, transliterate_city, AliasTable};
    use crate::config::NormalizerSettings;
    use crate::raw::RawOutage;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn raw(city: &str, district: &str) -> RawOutage {
        RawOutage {
            city: city.to_string(),
            district: district.to_string(),
            date: "03.01.2024".to_string(),
            start: "03.01.2024 09:30".to_string(),
            end: "not a time".to_string(),
            affected_regions: "Merkez Mahallesi".to_string(),
        }
    }

    fn default_aliases() -> AliasTable {
        AliasTable::new(NormalizerSettings::default().central_district_aliases)
    }

    #[rstest]
    #[case("Çankaya / Kızılay", "Çankaya")]
    #[case(" Keçiören/Etlik/Ovacık", "Keçiören")]
    #[case("/Etlik", "")]
    #[case("Kadıköy", "Kadıköy")]
    #[case("  Üsküdar ", "  Üsküdar ")]
    fn test_district_keeps_first_segment(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean_district(input), expected)
    }

    #[rstest]
    #[case("ÇANAKKALE", "CANAKKALE")]
    #[case("ŞANLIURFA", "SANLIURFA")]
    #[case("İZMİR", "IZMIR")]
    #[case("MUĞLA", "MUĞLA")]
    fn test_city_transliteration(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(transliterate_city(input), expected)
    }

    #[test]
    fn test_timestamps_parse_or_become_none() {
        assert_eq!(
            parse_timestamp("03.01.2024 09:30"),
            NaiveDate::from_ymd_opt(2024, 1, 3)
                .unwrap()
                .and_hms_opt(9, 30, 0)
        );
        assert_eq!(parse_timestamp("2024-01-03 09:30"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_istanbul_sides_fold_into_one_city() {
        let records = clean_outages(
            vec![
                raw("İSTANBUL-AVRUPA", "Beşiktaş"),
                raw("İSTANBUL-ASYA", "Kadıköy"),
            ],
            &default_aliases(),
        );

        assert!(records.iter().all(|record| record.city == *"ISTANBUL"));
        assert_eq!(records[0].district, *"Beşiktaş");
        assert_eq!(records[1].district, *"Kadıköy");
    }

    #[test]
    fn test_central_district_alias_becomes_merkez() {
        let records = clean_outages(
            vec![raw("BOLU", "BOLU MERKEZ"), raw("DÜZCE", "BOLU MERKEZ")],
            &default_aliases(),
        );

        assert_eq!(records[0].district, *"Merkez");
        assert_eq!(records[1].district, *"BOLU MERKEZ");
    }

    #[test]
    fn test_rows_are_sorted_by_city_and_stable_within_a_city() {
        let records = clean_outages(
            vec![
                raw("İZMİR", "Konak"),
                raw("ANKARA", "Çankaya"),
                raw("İZMİR", "Bornova"),
                raw("ANKARA", "Keçiören"),
            ],
            &default_aliases(),
        );
        let order: Vec<_> = records
            .iter()
            .map(|record| format!("{}/{}", record.city, record.district))
            .collect();

        assert_eq!(
            order,
            vec![
                "ANKARA/Çankaya",
                "ANKARA/Keçiören",
                "IZMIR/Konak",
                "IZMIR/Bornova"
            ]
        );
    }

    #[test]
    fn test_unparseable_end_does_not_drop_the_row() {
        let records = clean_outages(vec![raw("ANKARA", "Çankaya")], &default_aliases());

        assert!(records[0].start.is_some());
        assert_eq!(records[0].end, None);
    }
}
