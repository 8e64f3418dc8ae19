use anyhow::{bail, Context};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use shared_kernel::configuration::config;
use std::path::PathBuf;
use url::Url;

use entities::outages::OutageCategory;

fn default_pause_after_download_secs() -> u64 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct EpiasSettings {
    pub ticket_url: Url,
    pub planned_export_url: Url,
    pub unplanned_export_url: Url,
    #[serde(default = "default_pause_after_download_secs")]
    pub pause_after_download_secs: u64,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl EpiasSettings {
    pub fn export_url(&self, category: OutageCategory) -> &Url {
        match category {
            OutageCategory::Planned => &self.planned_export_url,
            OutageCategory::Unplanned => &self.unplanned_export_url,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub output_directory: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub epias: EpiasSettings,
    pub storage: StorageSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to load epias settings")
    }
}

pub struct Credentials {
    pub(crate) username: Secret<String>,
    pub(crate) password: Secret<String>,
}

impl Credentials {
    pub fn new(username: String, password: String) -> anyhow::Result<Self> {
        if username.trim().is_empty() || password.is_empty() {
            bail!("Username and password must both be provided");
        }
        Ok(Self {
            username: Secret::new(username),
            password: Secret::new(password),
        })
    }

    /// Reads `USERNAME` and `PASSWORD` once at startup.
    pub fn from_env() -> anyhow::Result<Self> {
        let username = std::env::var("USERNAME").context("USERNAME is not set")?;
        let password = std::env::var("PASSWORD").context("PASSWORD is not set")?;
        Self::new(username, password)
    }

    pub(crate) fn as_form(&self) -> [(&'static str, &str); 2] {
        [
            ("username", self.username.expose_secret().as_str()),
            ("password", self.password.expose_secret().as_str()),
        ]
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password)
            .finish()
    }
}
