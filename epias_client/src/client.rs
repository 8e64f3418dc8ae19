use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use shared_kernel::http_client::{HttpClient, HttpClientSettings};

use crate::config::{Credentials, EpiasSettings};

/// HTTP client for the EPİAŞ transparency platform: issues the session ticket
/// and downloads the outage exports.
#[derive(Clone)]
pub struct EpiasClient {
    pub(crate) http: HttpClient,
    pub(crate) settings: EpiasSettings,
    pub(crate) credentials: Arc<Credentials>,
    pub(crate) output_directory: PathBuf,
}

impl EpiasClient {
    pub fn new(
        settings: EpiasSettings,
        credentials: Credentials,
        output_directory: PathBuf,
    ) -> anyhow::Result<Self> {
        // Nothing against this API is ever retried.
        let http = HttpClient::new(&HttpClientSettings {
            timeout_secs: settings.timeout_secs,
            max_retries: 0,
        })
        .context("Failed to build EPİAŞ http client")?;
        Ok(Self {
            http,
            settings,
            credentials: Arc::new(credentials),
            output_directory,
        })
    }

    pub(crate) fn pause_after_download(&self) -> Duration {
        Duration::from_secs(self.settings.pause_after_download_secs)
    }
}
