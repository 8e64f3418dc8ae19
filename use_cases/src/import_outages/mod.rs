use async_trait::async_trait;
use chrono::NaiveDate;
use entities::export::{ExportSession, Ticket};
use entities::outages::OutageCategory;
#[cfg(test)]
use mockall::automock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Ticket request was rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Ticket response did not carry a usable Location header: {0}")]
    MissingTicket(String),
    #[error("Ticket request failed: {0:#}")]
    Network(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Export request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("No export period can be derived from {0}")]
    InvalidPeriod(NaiveDate),
    #[error("Export request failed: {0:#}")]
    Network(#[from] anyhow::Error),
    #[error("Failed to save export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Required column `{0}` is missing")]
    MissingColumn(String),
    #[error("Malformed CSV: {0}")]
    Malformed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFile {
    pub path: PathBuf,
    pub rows: usize,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TicketAuthenticator: Send + Sync {
    async fn acquire_ticket(&self) -> Result<Ticket, AuthError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExportFetcher: Send + Sync {
    /// Downloads the category's export and returns the path of the raw file.
    async fn fetch(
        &self,
        session: &ExportSession,
        category: OutageCategory,
    ) -> Result<PathBuf, FetchError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait OutageNormalizer: Send + Sync {
    async fn normalize(
        &self,
        raw_file: &Path,
        category: OutageCategory,
    ) -> Result<NormalizedFile, NormalizeError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    Normalized(NormalizedFile),
    FetchFailed(String),
    NormalizeFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub outcomes: Vec<(OutageCategory, CategoryOutcome)>,
}

impl ImportReport {
    pub fn outcome(&self, category: OutageCategory) -> Option<&CategoryOutcome> {
        self.outcomes
            .iter()
            .find(|(key, _)| *key == category)
            .map(|(_, outcome)| outcome)
    }

    pub fn all_normalized(&self) -> bool {
        self.outcomes
            .iter()
            .all(|(_, outcome)| matches!(outcome, CategoryOutcome::Normalized(_)))
    }
}

pub struct ImportOutages {
    authenticator: Arc<dyn TicketAuthenticator>,
    fetcher: Arc<dyn ExportFetcher>,
    normalizer: Arc<dyn OutageNormalizer>,
}

impl ImportOutages {
    pub fn new(
        authenticator: Arc<dyn TicketAuthenticator>,
        fetcher: Arc<dyn ExportFetcher>,
        normalizer: Arc<dyn OutageNormalizer>,
    ) -> Self {
        Self {
            authenticator,
            fetcher,
            normalizer,
        }
    }

    /// One pass over every category. Only a failed ticket request aborts the
    /// run; everything else is reported per category.
    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn import(&self, reference_date: NaiveDate) -> Result<ImportReport, AuthError> {
        let ticket = self.authenticator.acquire_ticket().await?;
        info!("Ticket acquired");
        let session = ExportSession::new(ticket, reference_date);

        let mut outcomes = vec![];
        for category in OutageCategory::iter() {
            let outcome = self.import_category(&session, category).await;
            outcomes.push((category, outcome));
        }
        Ok(ImportReport { outcomes })
    }

    async fn import_category(
        &self,
        session: &ExportSession,
        category: OutageCategory,
    ) -> CategoryOutcome {
        let raw_file = match self.fetcher.fetch(session, category).await {
            Ok(raw_file) => raw_file,
            Err(err) => {
                error!(%category, "Failed to fetch export: {err}");
                return CategoryOutcome::FetchFailed(err.to_string());
            }
        };

        match self.normalizer.normalize(&raw_file, category).await {
            Ok(file) => {
                info!(%category, rows = file.rows, path = ?file.path, "Saved cleaned export");
                CategoryOutcome::Normalized(file)
            }
            Err(err) => {
                error!(%category, path = ?raw_file, "Skipping file: {err}");
                CategoryOutcome::NormalizeFailed(err.to_string())
            }
        }
    }
}
