use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use chrono_tz::Europe::Istanbul;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Turkey has stayed on UTC+3 all year round since 2016; the export API expects
/// this offset literally.
pub const TURKEY_UTC_OFFSET_SECS: i32 = 3 * 3600;

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
/// IstanbulTZDateTime stores the time as `DateTime<UTC>` for easier serialization
/// and deserialization
pub struct IstanbulTZDateTime(DateTime<Utc>);

impl IstanbulTZDateTime {
    pub fn now() -> Self {
        IstanbulTZDateTime(Utc::now())
    }

    /// Calendar date as seen in Istanbul.
    pub fn date(&self) -> NaiveDate {
        self.to_date_time().date_naive()
    }

    pub fn to_date_time(&self) -> DateTime<Tz> {
        Istanbul.from_utc_datetime(&self.0.naive_utc())
    }

    pub fn date_with_offset(&self, days: i64) -> NaiveDate {
        self.date() + Duration::days(days)
    }
}

impl From<DateTime<Utc>> for IstanbulTZDateTime {
    fn from(data: DateTime<Utc>) -> IstanbulTZDateTime {
        IstanbulTZDateTime(data)
    }
}

/// Midnight of `date` at UTC+03:00.
pub fn turkey_midnight(date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(TURKEY_UTC_OFFSET_SECS)?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    offset.from_local_datetime(&midnight).single()
}

#[cfg(test)]
mod tests {
    use super::{turkey_midnight, IstanbulTZDateTime};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_date_rolls_over_at_istanbul_midnight() {
        let late_utc = Utc.with_ymd_and_hms(2024, 1, 1, 22, 30, 0).unwrap();
        let date_time = IstanbulTZDateTime::from(late_utc);

        assert_eq!(date_time.date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_date_with_offset() {
        let date_time = IstanbulTZDateTime::from(Utc.with_ymd_and_hms(2024, 2, 28, 9, 0, 0).unwrap());

        assert_eq!(
            date_time.date_with_offset(1),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_turkey_midnight_is_rendered_with_plus_three_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let midnight = turkey_midnight(date).unwrap();

        assert_eq!(
            midnight.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
            "2024-05-17T00:00:00+03:00"
        );
    }
}
