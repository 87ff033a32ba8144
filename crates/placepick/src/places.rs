use crate::place::{Coordinates, Place, PlaceName, PlaceType};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const MAX_RESULT_COUNT: u32 = 20;
const FIELD_MASK: &str = "places.displayName,places.location,places.rating,\
places.userRatingCount,places.formattedAddress,places.businessStatus,places.types";
const MAX_ERROR_BODY_BYTES: usize = 4 * 1024;

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("no places API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("places service returned {status}: {message}")]
    Upstream { status: StatusCode, message: String },
}

#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub timeout: Duration,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyRequest {
    pub included_primary_types: Vec<PlaceType>,
    pub max_result_count: u32,
    pub rank_preference: RankPreference,
    pub language_code: String,
    pub location_restriction: LocationRestriction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankPreference {
    Popularity,
    Distance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRestriction {
    pub circle: Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: LatLng,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for LatLng {
    fn from(c: Coordinates) -> Self {
        Self {
            latitude: c.lat,
            longitude: c.lng,
        }
    }
}

impl From<LatLng> for Coordinates {
    fn from(l: LatLng) -> Self {
        Coordinates::new(l.latitude, l.longitude)
    }
}

impl NearbyRequest {
    pub fn new(center: Coordinates, radius_m: u32, place_type: PlaceType, language: &str) -> Self {
        Self {
            included_primary_types: vec![place_type],
            max_result_count: MAX_RESULT_COUNT,
            rank_preference: RankPreference::Popularity,
            language_code: language.to_string(),
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: center.into(),
                    radius: radius_m as f64,
                },
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    places: Vec<WirePlace>,
}

#[derive(Debug, Default, Deserialize)]
struct LocalizedText {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WirePlace {
    display_name: Option<LocalizedText>,
    rating: Option<f64>,
    user_rating_count: Option<u32>,
    formatted_address: Option<String>,
    location: Option<LatLng>,
    business_status: Option<String>,
    types: Vec<String>,
}

impl From<WirePlace> for Place {
    fn from(w: WirePlace) -> Self {
        Place {
            name: PlaceName::new(w.display_name.map(|d| d.text).unwrap_or_default()),
            rating: w.rating,
            rating_count: w.user_rating_count,
            address: w.formatted_address,
            coordinates: w.location.map(Coordinates::from),
            business_status: w.business_status,
            types: w.types.into_iter().map(PlaceType::new).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl NearbyResponse {
    fn into_places(self) -> Vec<Place> {
        self.places.into_iter().map(Place::from).collect()
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body
            .char_indices()
            .take_while(|(i, _)| *i < MAX_ERROR_BODY_BYTES)
            .map(|(_, c)| c)
            .collect(),
    }
}

/// Client for the nearby search endpoint of the places service.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    config: PlacesConfig,
    http: reqwest::Client,
}

impl PlacesClient {
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("placepick/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &PlacesConfig {
        &self.config
    }

    /// Shared HTTP client, reused for location lookups.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/places:searchNearby",
            self.config.base_url.trim_end_matches('/')
        )
    }

    pub fn request(&self, center: Coordinates, radius_m: u32, place_type: PlaceType) -> NearbyRequest {
        NearbyRequest::new(center, radius_m, place_type, &self.config.language)
    }

    pub async fn search_nearby(&self, request: &NearbyRequest) -> Result<Vec<Place>, PlacesError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(PlacesError::MissingApiKey)?;

        let response = self
            .http
            .post(self.endpoint())
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Upstream {
                status,
                message: error_message(&body),
            });
        }

        let nearby: NearbyResponse = response.json().await?;
        Ok(nearby.into_places())
    }
}
