use entities::outages::{OutageCount, OutageGroupKey, OutageRecord};
use itertools::Itertools;

/// Number of outage rows per city, district and date, ordered by that key.
pub(crate) fn count_outages(records: &[OutageRecord]) -> Vec<OutageCount> {
    records
        .iter()
        .map(OutageGroupKey::from)
        .counts()
        .into_iter()
        .sorted()
        .map(|(key, count)| OutageCount { key, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::count_outages;
    use entities::outages::OutageRecord;

    fn record(city: &str, district: &str, date: &str) -> OutageRecord {
        OutageRecord {
            city: city.into(),
            district: district.into(),
            date: date.to_string(),
            start: None,
            end: None,
            affected_regions: String::new(),
        }
    }

    #[test]
    fn test_counts_are_grouped_by_city_district_and_date() {
        let records = vec![
            record("ISTANBUL", "Kadıköy", "03.01.2024"),
            record("ANKARA", "Çankaya", "03.01.2024"),
            record("ISTANBUL", "Kadıköy", "03.01.2024"),
            record("ISTANBUL", "Kadıköy", "04.01.2024"),
            record("ISTANBUL", "Beşiktaş", "03.01.2024"),
        ];
        let counts: Vec<_> = count_outages(&records)
            .into_iter()
            .map(|count| {
                (
                    count.key.city.to_string(),
                    count.key.district.to_string(),
                    count.key.date,
                    count.count,
                )
            })
            .collect();

        assert_eq!(
            counts,
            vec![
                ("ANKARA".into(), "Çankaya".into(), "03.01.2024".into(), 1),
                ("ISTANBUL".into(), "Beşiktaş".into(), "03.01.2024".into(), 1),
                ("ISTANBUL".into(), "Kadıköy".into(), "03.01.2024".into(), 2),
                ("ISTANBUL".into(), "Kadıköy".into(), "04.01.2024".into(), 1),
            ]
        );
    }

    #[test]
    fn test_counts_sum_to_row_count() {
        let records = vec![
            record("ANKARA", "Çankaya", "03.01.2024"),
            record("ANKARA", "Çankaya", "03.01.2024"),
            record("BURSA", "Nilüfer", "03.01.2024"),
        ];
        let total: usize = count_outages(&records).iter().map(|count| count.count).sum();

        assert_eq!(total, records.len());
    }

    #[test]
    fn test_no_rows_give_no_groups() {
        assert!(count_outages(&[]).is_empty())
    }
}
