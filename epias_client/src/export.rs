use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use entities::export::{ExportPeriod, ExportSession};
use entities::outages::OutageCategory;
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use shared_kernel::http_client::next_chunk;
use tokio::io::AsyncWriteExt;
use tracing::info;
use use_cases::import_outages::{ExportFetcher, FetchError};

use crate::client::EpiasClient;

const CHUNK_SIZE: usize = 1024;

#[async_trait]
impl ExportFetcher for EpiasClient {
    #[tracing::instrument(err, skip(self, session), level = "info")]
    async fn fetch(
        &self,
        session: &ExportSession,
        category: OutageCategory,
    ) -> Result<PathBuf, FetchError> {
        let period = session
            .period(category)
            .ok_or(FetchError::InvalidPeriod(session.reference_date()))?;
        info!(%period, "Requesting export");

        let headers = HashMap::from([
            ("Content-Type", "application/json".to_string()),
            ("TGT", session.ticket().inner()),
        ]);
        let response = self
            .http
            .post_json(
                self.settings.export_url(category).clone(),
                headers,
                &export_request_body(&period),
            )
            .await
            .map_err(|err| FetchError::Network(err.into()))?;
        let response = ensure_ok(response).await?;

        tokio::fs::create_dir_all(&self.output_directory).await?;
        let destination = self.output_directory.join(category.file_name());
        let written = save_response_to_file(response, &destination).await?;
        info!(bytes = written, path = ?destination, "Export saved");

        tokio::time::sleep(self.pause_after_download()).await;
        Ok(destination)
    }
}

pub(crate) fn export_request_body(period: &ExportPeriod) -> Value {
    json!({
        "exportType": "CSV",
        "period": period.to_string(),
    })
}

pub(crate) async fn ensure_ok(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(FetchError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Streams the body into `<destination>.part` and moves it over `destination`
/// once complete, so an interrupted download never replaces the previous file.
pub(crate) async fn save_response_to_file(
    mut response: Response,
    destination: &Path,
) -> Result<u64, FetchError> {
    let partial = partial_path(destination);
    let result = async {
        let mut file = tokio::fs::File::create(&partial).await?;
        let mut written = 0u64;
        while let Some(chunk) = next_chunk(&mut response)
            .await
            .map_err(|err| FetchError::Network(err.into()))?
        {
            for piece in chunk.chunks(CHUNK_SIZE) {
                file.write_all(piece).await?;
                written += piece.len() as u64;
            }
        }
        file.flush().await?;
        Ok::<_, FetchError>(written)
    }
    .await;

    match result {
        Ok(written) => {
            tokio::fs::rename(&partial, destination).await?;
            Ok(written)
        }
        Err(err) => {
            let _ = tokio::fs::remove_file(&partial).await;
            Err(err)
        }
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
