//! Wire types for the upstream observation provider.
//!
//! These model the raw JSON as loosely as the provider actually sends it:
//! every field that has ever been observed missing is an explicit `Option`
//! or defaulted container. Validation happens in the normalizer, not here.

use serde::Deserialize;

/// Paged envelope wrapping every list endpoint.
#[derive(Debug, Deserialize)]
pub struct ObservationPage {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub per_page: u64,
    #[serde(default)]
    pub results: Vec<RawObservation>,
}

/// One raw sighting record, before validation.
#[derive(Debug, Deserialize)]
pub struct RawObservation {
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
    #[serde(default)]
    pub geojson: Option<RawGeoJson>,
    #[serde(default)]
    pub user: Option<RawUser>,
    #[serde(default)]
    pub observed_on_details: Option<RawObservedOn>,
    #[serde(default)]
    pub species_guess: Option<String>,
    #[serde(default)]
    pub taxon: Option<RawTaxon>,
    #[serde(default)]
    pub place_guess: Option<String>,
    #[serde(default)]
    pub quality_grade: Option<String>,
}

/// A photo attachment. `url` points at the `square` size variant; other
/// sizes are derived by substituting that token.
#[derive(Debug, Deserialize)]
pub struct RawPhoto {
    #[serde(default)]
    pub url: String,
}

/// GeoJSON point as the provider sends it: a bare coordinate pair.
#[derive(Debug, Deserialize)]
pub struct RawGeoJson {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// The contributor attached to a record or leaderboard row.
#[derive(Debug, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawObservedOn {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawTaxon {
    #[serde(default)]
    pub preferred_common_name: Option<String>,
}

/// Paged envelope for the per-role leaderboard endpoints.
#[derive(Debug, Deserialize)]
pub struct LeaderPage {
    #[serde(default)]
    pub results: Vec<RawLeaderEntry>,
}

/// One ranked contributor. The count field differs by role: observers carry
/// `observation_count`, identifiers carry a generic `count`.
#[derive(Debug, Deserialize)]
pub struct RawLeaderEntry {
    #[serde(default)]
    pub user: Option<RawUser>,
    #[serde(default)]
    pub observation_count: Option<u32>,
    #[serde(default)]
    pub count: Option<u32>,
}
