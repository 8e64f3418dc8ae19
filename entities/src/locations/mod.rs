use crate::outages::{CityName, DistrictName, OutageGroupKey, OutageRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationQuery {
    pub city: CityName,
    pub district: DistrictName,
}

impl LocationQuery {
    pub fn new(city: impl Into<CityName>, district: impl Into<DistrictName>) -> Self {
        Self {
            city: city.into(),
            district: district.into(),
        }
    }
}

impl From<&OutageRecord> for LocationQuery {
    fn from(record: &OutageRecord) -> Self {
        LocationQuery::new(record.city.clone(), record.district.clone())
    }
}

impl From<&OutageGroupKey> for LocationQuery {
    fn from(key: &OutageGroupKey) -> Self {
        LocationQuery::new(key.city.clone(), key.district.clone())
    }
}

/// Latitude and longitude exactly as the geocoder returned them. Both must
/// read as finite numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: String,
    longitude: String,
}

impl Coordinates {
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, String> {
        let latitude = latitude.trim();
        let longitude = longitude.trim();
        for (name, value) in [("latitude", latitude), ("longitude", longitude)] {
            match value.parse::<f64>() {
                Ok(number) if number.is_finite() => {}
                _ => return Err(format!("Invalid {name} `{value}`")),
            }
        }
        Ok(Self {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        })
    }

    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::Coordinates;
    use rstest::rstest;

    #[test]
    fn test_coordinates_keep_the_returned_text() {
        let coordinates = Coordinates::parse("40.9903", " 29.0290 ").unwrap();

        assert_eq!(coordinates.latitude(), "40.9903");
        assert_eq!(coordinates.longitude(), "29.0290");
    }

    #[rstest]
    #[case("north", "29.0")]
    #[case("40.9", "")]
    #[case("NaN", "29.0")]
    #[case("40.9", "inf")]
    fn test_non_numeric_coordinates_are_rejected(#[case] latitude: &str, #[case] longitude: &str) {
        assert!(Coordinates::parse(latitude, longitude).is_err())
    }
}
