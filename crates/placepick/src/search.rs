use crate::cuisine::Keyword;
use crate::geo::{GeoError, Locator};
use crate::place::{Coordinates, Place, Restaurant};
use crate::places::{PlacesClient, PlacesError};
use crate::rank::{self, RankError};
use thiserror::Error;

pub const MIN_RADIUS: u32 = 100;
pub const MAX_RADIUS: u32 = 5000;
pub const DEFAULT_RADIUS: u32 = 1500;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Error getting location: {0}")]
    Location(#[from] GeoError),
    #[error("Error searching for restaurants: {0}")]
    Places(#[from] PlacesError),
    #[error(transparent)]
    NoMatches(#[from] RankError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keyword: String,
    pub radius_m: u32,
}

impl SearchRequest {
    pub fn new(keyword: impl Into<String>, radius_m: u32) -> Self {
        Self {
            keyword: keyword.into(),
            radius_m: clamp_radius(radius_m),
        }
    }
}

pub fn clamp_radius(radius_m: u32) -> u32 {
    radius_m.clamp(MIN_RADIUS, MAX_RADIUS)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub center: Coordinates,
    pub raw_count: usize,
    pub restaurants: Vec<Restaurant>,
}

/// Runs one search end to end: locate, query, filter and rank.
#[derive(Debug, Clone)]
pub struct Finder {
    locator: Locator,
    places: PlacesClient,
}

impl Finder {
    pub fn new(locator: Locator, places: PlacesClient) -> Self {
        Self { locator, places }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub async fn find(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let keyword = Keyword::parse(&request.keyword);
        let center = self.locator.locate(self.places.http()).await?;

        log::info!(
            "Searching {}m around ({:.4}, {:.4}) for \"{}\"",
            request.radius_m,
            center.lat,
            center.lng,
            keyword
        );

        let nearby = self
            .places
            .request(center, clamp_radius(request.radius_m), keyword.place_type());
        let places = self.places.search_nearby(&nearby).await?;

        Ok(finish(center, places, &keyword)?)
    }
}

/// Ranks whatever the service returned for `keyword`.
pub fn finish(
    center: Coordinates,
    places: Vec<Place>,
    keyword: &Keyword,
) -> Result<SearchOutcome, RankError> {
    let raw_count = places.len();
    let restaurants = rank::rank(places, keyword)?;
    Ok(SearchOutcome {
        center,
        raw_count,
        restaurants,
    })
}
