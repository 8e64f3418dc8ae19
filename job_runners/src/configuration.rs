use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use shared_kernel::configuration::config;
use shared_kernel::date_time::istanbul_date_time::IstanbulTZDateTime;

fn default_reference_date_offset_days() -> i64 {
    1
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportSettings {
    /// Days added to today's Istanbul date to get the run's reference date.
    #[serde(default = "default_reference_date_offset_days")]
    pub reference_date_offset_days: i64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            reference_date_offset_days: default_reference_date_offset_days(),
        }
    }
}

impl ImportSettings {
    pub fn reference_date(&self, now: &IstanbulTZDateTime) -> NaiveDate {
        now.date_with_offset(self.reference_date_offset_days)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub import: ImportSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to load import settings")
    }
}
