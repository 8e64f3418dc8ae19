use anyhow::Context;
use serde::Deserialize;
use shared_kernel::configuration::config;

/// A district label some distribution companies use for a province's central
/// district.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CentralDistrictAlias {
    pub city: String,
    pub district: String,
}

fn default_central_district_aliases() -> Vec<CentralDistrictAlias> {
    vec![CentralDistrictAlias {
        city: "BOLU".to_string(),
        district: "BOLU MERKEZ".to_string(),
    }]
}

#[derive(Debug, Deserialize, Clone)]
pub struct NormalizerSettings {
    #[serde(default = "default_central_district_aliases")]
    pub central_district_aliases: Vec<CentralDistrictAlias>,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            central_district_aliases: default_central_district_aliases(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub normalizer: NormalizerSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to load normalizer settings")
    }
}
