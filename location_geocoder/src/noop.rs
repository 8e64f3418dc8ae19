use async_trait::async_trait;
use entities::locations::{Coordinates, LocationQuery};
use use_cases::geocoding::Geocoder;

/// Used when geocoding is switched off; every row keeps empty coordinates.
pub struct NoopGeocoder;

#[async_trait]
impl Geocoder for NoopGeocoder {
    async fn geocode(&self, _query: &LocationQuery) -> Option<Coordinates> {
        None
    }
}
