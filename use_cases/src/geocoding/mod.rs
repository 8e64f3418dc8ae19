use async_trait::async_trait;
use entities::locations::{Coordinates, LocationQuery};
#[cfg(test)]
use mockall::automock;
use std::collections::{BTreeSet, HashMap};

/// Resolves a (city, district) pair to coordinates. A miss, whatever its cause,
/// is `None` and never an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &LocationQuery) -> Option<Coordinates>;
}

/// Looks every distinct query up exactly once, in sorted order.
pub async fn geocode_many<I>(
    geocoder: &dyn Geocoder,
    queries: I,
) -> HashMap<LocationQuery, Option<Coordinates>>
where
    I: IntoIterator<Item = LocationQuery>,
{
    let unique_queries = queries.into_iter().collect::<BTreeSet<_>>();
    let mut resolved = HashMap::with_capacity(unique_queries.len());
    for query in unique_queries {
        let coordinates = geocoder.geocode(&query).await;
        resolved.insert(query, coordinates);
    }
    resolved
}
