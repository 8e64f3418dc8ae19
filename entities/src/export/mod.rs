use crate::outages::OutageCategory;
use chrono::{DateTime, FixedOffset, NaiveDate};
use shared_kernel::date_time::istanbul_date_time::turkey_midnight;
use shared_kernel::non_empty_string;

non_empty_string!(Ticket);

impl Ticket {
    /// The ticket id is the last path segment of the `Location` header.
    pub fn from_location(location: &str) -> Result<Self, String> {
        let segment = location.trim().rsplit('/').next().unwrap_or_default();
        Ticket::try_from(segment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPeriod(DateTime<FixedOffset>);

impl ExportPeriod {
    pub fn for_category(category: OutageCategory, reference_date: NaiveDate) -> Option<Self> {
        let date = reference_date.checked_sub_signed(category.period_lag())?;
        turkey_midnight(date).map(ExportPeriod)
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl std::fmt::Display for ExportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%:z"))
    }
}

/// Everything an export request needs, built once per run after the ticket
/// has been issued.
#[derive(Debug, Clone)]
pub struct ExportSession {
    ticket: Ticket,
    reference_date: NaiveDate,
}

impl ExportSession {
    pub fn new(ticket: Ticket, reference_date: NaiveDate) -> Self {
        Self {
            ticket,
            reference_date,
        }
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn period(&self, category: OutageCategory) -> Option<ExportPeriod> {
        ExportPeriod::for_category(category, self.reference_date)
    }
}

#[cfg(test)]
mod tests {
    use super::{ExportPeriod, ExportSession, Ticket};
    use crate::outages::OutageCategory;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case(
        "https://giris.epias.com.tr/cas/v1/tickets/TGT-4711-abcDEF-cas",
        "TGT-4711-abcDEF-cas"
    )]
    #[case("TGT-only", "TGT-only")]
    fn test_ticket_is_last_path_segment(#[case] location: &str, #[case] expected: &str) {
        let ticket = Ticket::from_location(location).unwrap();
        assert_eq!(ticket.as_ref(), expected)
    }

    #[test]
    fn test_empty_location_is_not_a_ticket() {
        assert!(Ticket::from_location("").is_err());
        assert!(Ticket::from_location("https://giris.epias.com.tr/cas/v1/tickets/").is_err());
    }

    #[rstest]
    #[case(OutageCategory::Planned, "2024-03-10T00:00:00+03:00")]
    #[case(OutageCategory::Unplanned, "2024-03-08T00:00:00+03:00")]
    fn test_period_for_category(#[case] category: OutageCategory, #[case] expected: &str) {
        let reference_date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let period = ExportPeriod::for_category(category, reference_date).unwrap();
        assert_eq!(period.to_string(), expected)
    }

    #[test]
    fn test_unplanned_period_crosses_month_boundary() {
        let ticket = Ticket::try_from("TGT-1").unwrap();
        let session = ExportSession::new(ticket, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let period = session.period(OutageCategory::Unplanned).unwrap();

        assert_eq!(period.date(), NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
    }
}
