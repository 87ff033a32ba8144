use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use url::Url;

const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";
const UNKNOWN: &str = "N/A";

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct PlaceName(String);

crate::string_newtype!(PlaceName);

/// Category tag understood by the places service, e.g. `sushi_restaurant`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct PlaceType(String);

crate::string_newtype!(PlaceType);

/// Synthetic identity of a record within one search. Display names are not unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct PlaceId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A venue as the places service reported it, before ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
    pub name: PlaceName,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub business_status: Option<String>,
    pub types: Vec<PlaceType>,
}

impl Place {
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn rating_count_or_zero(&self) -> u32 {
        self.rating_count.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: PlaceId,
    pub name: PlaceName,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub selected: bool,
}

impl Restaurant {
    pub fn from_place(id: PlaceId, place: Place) -> Self {
        Self {
            id,
            name: place.name,
            rating: place.rating,
            rating_count: place.rating_count,
            address: place
                .address
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            coordinates: place.coordinates,
            selected: false,
        }
    }

    /// One decimal, or "N/A" when the venue is unrated. A zero rating means
    /// no reviews yet.
    pub fn rating_label(&self) -> String {
        self.rating
            .filter(|r| *r > 0.0)
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Driving directions to the venue, when its location is known.
    pub fn directions_url(&self) -> Option<Url> {
        let coords = self.coordinates?;
        let destination = format!("{},{}", coords.lat, coords.lng);
        Url::parse_with_params(
            DIRECTIONS_URL,
            [("api", "1"), ("destination", destination.as_str())],
        )
        .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(coordinates: Option<Coordinates>) -> Restaurant {
        Restaurant::from_place(
            PlaceId::from(0),
            Place {
                name: PlaceName::from("Sushi Bar"),
                coordinates,
                ..Place::default()
            },
        )
    }

    #[test]
    fn test_directions_url_uses_coordinates() {
        let url = restaurant(Some(Coordinates::new(35.5, -120.25)))
            .directions_url()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.google.com/maps/dir/?api=1&destination=35.5%2C-120.25"
        );
    }

    #[test]
    fn test_directions_url_missing_without_coordinates() {
        assert!(restaurant(None).directions_url().is_none());
    }

    #[test]
    fn test_unknown_fields_render_as_na() {
        let r = restaurant(None);
        assert_eq!(r.address, "N/A");
        assert_eq!(r.rating_label(), "N/A");
        assert!(!r.selected);
    }

    #[test]
    fn test_zero_rating_is_unrated() {
        let mut r = restaurant(None);
        r.rating = Some(0.0);
        assert_eq!(r.rating_label(), "N/A");
        r.rating = Some(4.0);
        assert_eq!(r.rating_label(), "4.0");
    }
}
