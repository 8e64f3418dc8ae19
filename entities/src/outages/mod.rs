use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared_kernel::string_key;
use strum_macros::{Display, EnumIter, EnumString};

string_key!(CityName);
string_key!(DistrictName);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OutageCategory {
    Planned,
    Unplanned,
}

impl OutageCategory {
    /// The unplanned export lags behind, so it is requested a couple of days
    /// before the reference date.
    pub fn period_lag(&self) -> Duration {
        match self {
            OutageCategory::Planned => Duration::zero(),
            OutageCategory::Unplanned => Duration::days(2),
        }
    }

    /// Raw downloads and their cleaned replacement share this name.
    pub fn file_name(&self) -> String {
        format!("data_{self}.csv")
    }
}

/// A single outage row after cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutageRecord {
    pub city: CityName,
    pub district: DistrictName,
    /// Kept exactly as exported, it is only used as a grouping key.
    pub date: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub affected_regions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutageGroupKey {
    pub city: CityName,
    pub district: DistrictName,
    pub date: String,
}

impl From<&OutageRecord> for OutageGroupKey {
    fn from(record: &OutageRecord) -> Self {
        OutageGroupKey {
            city: record.city.clone(),
            district: record.district.clone(),
            date: record.date.clone(),
        }
    }
}

/// Number of unplanned outages recorded for one (city, district, date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutageCount {
    pub key: OutageGroupKey,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::OutageCategory;
    use chrono::Duration;
    use rstest::rstest;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case(OutageCategory::Planned, "data_planned.csv")]
    #[case(OutageCategory::Unplanned, "data_unplanned.csv")]
    fn test_file_name_is_keyed_by_category(#[case] category: OutageCategory, #[case] expected: &str) {
        assert_eq!(category.file_name(), expected)
    }

    #[test]
    fn test_only_unplanned_exports_lag() {
        assert_eq!(OutageCategory::Planned.period_lag(), Duration::zero());
        assert_eq!(OutageCategory::Unplanned.period_lag(), Duration::days(2));
    }

    #[test]
    fn test_categories_are_iterated_planned_first() {
        let categories = OutageCategory::iter().collect::<Vec<_>>();
        assert_eq!(
            categories,
            vec![OutageCategory::Planned, OutageCategory::Unplanned]
        );
        assert_eq!(
            OutageCategory::from_str("unplanned").unwrap(),
            OutageCategory::Unplanned
        );
    }
}
