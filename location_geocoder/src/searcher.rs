use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use entities::locations::{Coordinates, LocationQuery};
use serde::Deserialize;
use shared_kernel::http_client::HttpClient;
use tracing::warn;
use url::Url;
use use_cases::geocoding::Geocoder;

use crate::config::GeocoderSettings;

const SEARCH_PATH: &str = "search";

/// Geocoder backed by a Nominatim compatible `/search` endpoint.
#[derive(Clone)]
pub struct Searcher {
    http: HttpClient,
    config: GeocoderSettings,
}

impl Searcher {
    pub fn new(config: GeocoderSettings) -> anyhow::Result<Self> {
        let http = HttpClient::new(&config.http_client_settings())
            .context("Failed to build geocoder http client")?;
        Ok(Self { http, config })
    }

    /// Districts are searched as `city` and provinces as `state`, which is how
    /// OpenStreetMap tags Turkish administrative areas.
    pub(crate) fn search_url(&self, query: &LocationQuery) -> anyhow::Result<Url> {
        let mut url = self
            .config
            .host
            .join(SEARCH_PATH)
            .context("Failed to parse url")?;
        url.query_pairs_mut()
            .append_pair("city", query.district.as_ref())
            .append_pair("state", query.city.as_ref())
            .append_pair("country", &self.config.country)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        Ok(url)
    }
}

#[async_trait]
impl Geocoder for Searcher {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn geocode(&self, query: &LocationQuery) -> Option<Coordinates> {
        let url = match self.search_url(query) {
            Ok(url) => url,
            Err(err) => {
                warn!("{err:?}");
                return None;
            }
        };
        let headers = HashMap::from([("User-Agent", self.config.user_agent.clone())]);
        let response = self
            .http
            .get_json_with_headers::<serde_json::Value>(url, headers)
            .await;

        match response
            .map_err(anyhow::Error::from)
            .and_then(first_coordinates)
        {
            Ok(coordinates) => coordinates,
            Err(err) => {
                warn!(city = %query.city, district = %query.district, "Geocoding failed: {err:#}");
                None
            }
        }
    }
}

fn first_coordinates(response: serde_json::Value) -> anyhow::Result<Option<Coordinates>> {
    #[derive(Deserialize, Debug)]
    struct Place {
        lat: String,
        lon: String,
    }

    let places: Vec<Place> = serde_json::from_value(response.clone())
        .with_context(|| format!("Invalid response {response:?}"))?;
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    Coordinates::parse(&place.lat, &place.lon)
        .map(Some)
        .map_err(anyhow::Error::msg)
}
