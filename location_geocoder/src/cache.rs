use std::collections::HashMap;

use async_trait::async_trait;
use entities::locations::{Coordinates, LocationQuery};
use tokio::sync::Mutex;
use use_cases::geocoding::Geocoder;

/// Remembers every answer, misses included, for the lifetime of the process.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: Mutex<HashMap<LocationQuery, Option<Coordinates>>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }
}

#[async_trait]
impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, query: &LocationQuery) -> Option<Coordinates> {
        if let Some(cached) = self.cache.lock().await.get(query) {
            return cached.clone();
        }
        let coordinates = self.inner.geocode(query).await;
        self.cache
            .lock()
            .await
            .insert(query.clone(), coordinates.clone());
        coordinates
    }
}
