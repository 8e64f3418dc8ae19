use anyhow::Context;
use serde::Deserialize;
use shared_kernel::configuration::config;
use shared_kernel::http_client::HttpClientSettings;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderSettings {
    pub enabled: bool,
    pub host: Url,
    pub country: String,
    pub user_agent: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_retries: u32,
}

impl GeocoderSettings {
    pub fn http_client_settings(&self) -> HttpClientSettings {
        HttpClientSettings {
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub geocoder: GeocoderSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to load geocoder settings")
    }
}
