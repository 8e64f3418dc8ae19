use std::sync::Arc;

use anyhow::Context;
use epias_client::client::EpiasClient;
use epias_client::config::{Credentials, Settings as EpiasSettings};
use location_geocoder::cache::CachedGeocoder;
use location_geocoder::config::{GeocoderSettings, Settings as GeocoderConfig};
use location_geocoder::noop::NoopGeocoder;
use location_geocoder::searcher::Searcher;
use outage_normalizer::config::Settings as NormalizerConfig;
use outage_normalizer::normalizer::CsvOutageNormalizer;
use shared_kernel::date_time::istanbul_date_time::IstanbulTZDateTime;
use tracing::{error, info, warn};
use use_cases::geocoding::Geocoder;
use use_cases::import_outages::{CategoryOutcome, ImportOutages, ImportReport};

use crate::configuration::Settings as ImportConfig;

pub fn geocoder(settings: GeocoderSettings) -> anyhow::Result<Arc<dyn Geocoder>> {
    if !settings.enabled {
        info!("Geocoding is disabled, coordinates will be left empty");
        return Ok(Arc::new(NoopGeocoder));
    }
    let searcher = Searcher::new(settings).context("Failed to build geocoder")?;
    Ok(Arc::new(CachedGeocoder::new(searcher)))
}

/// Reads every configuration section and the credentials, then runs one import.
pub async fn run() -> anyhow::Result<ImportReport> {
    let epias = EpiasSettings::parse()?;
    let geocoder_config = GeocoderConfig::parse()?;
    let normalizer_config = NormalizerConfig::parse()?;
    let import_config = ImportConfig::parse()?;
    let credentials = Credentials::from_env()?;

    let client = Arc::new(EpiasClient::new(
        epias.epias,
        credentials,
        epias.storage.output_directory,
    )?);
    let normalizer = CsvOutageNormalizer::new(
        geocoder(geocoder_config.geocoder)?,
        normalizer_config.normalizer,
    );
    let importer = ImportOutages::new(client.clone(), client, Arc::new(normalizer));

    let reference_date = import_config
        .import
        .reference_date(&IstanbulTZDateTime::now());
    info!(%reference_date, "Starting outage import");
    let report = importer
        .import(reference_date)
        .await
        .context("Failed to authenticate against EPİAŞ")?;
    log_report(&report);
    Ok(report)
}

pub fn log_report(report: &ImportReport) {
    for (category, outcome) in &report.outcomes {
        match outcome {
            CategoryOutcome::Normalized(file) => {
                info!(%category, rows = file.rows, path = ?file.path, "Category imported")
            }
            CategoryOutcome::FetchFailed(reason) => {
                error!(%category, %reason, "Category was not downloaded")
            }
            CategoryOutcome::NormalizeFailed(reason) => {
                warn!(%category, %reason, "Raw export was kept but not cleaned")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::geocoder;
    use entities::locations::LocationQuery;
    use location_geocoder::config::GeocoderSettings;
    use url::Url;

    fn settings(enabled: bool) -> GeocoderSettings {
        GeocoderSettings {
            enabled,
            host: Url::parse("http://127.0.0.1:9/").unwrap(),
            country: "Turkey".to_string(),
            user_agent: "outage-importer-tests".to_string(),
            timeout_secs: Some(1),
            max_retries: 0,
        }
    }

    #[tokio::test]
    async fn test_disabled_geocoder_never_resolves() {
        let geocoder = geocoder(settings(false)).unwrap();

        assert_eq!(
            geocoder
                .geocode(&LocationQuery::new("ANKARA", "Çankaya"))
                .await,
            None
        );
    }

    #[tokio::test]
    async fn test_unreachable_geocoder_is_a_miss() {
        let geocoder = geocoder(settings(true)).unwrap();

        assert_eq!(
            geocoder
                .geocode(&LocationQuery::new("ANKARA", "Çankaya"))
                .await,
            None
        );
    }
}
