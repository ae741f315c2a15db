//! Domain model shared across the workspace.
//!
//! All public bundle types serialize with the camelCase field names the
//! map client consumes, so a `ResultBundle` can go straight onto the wire.

use serde::{Deserialize, Serialize};

/// Where the map centers when nothing else has picked a point, and where it
/// falls back to when geolocation fails.
pub const DEFAULT_COORDINATE: Coordinate = Coordinate {
    lat: 39.35,
    lng: -120.26,
};

/// Served in place of a contributor avatar when the upstream record has none.
pub const PLACEHOLDER_ICON: &str = "/img/blankIcon.jpg";

/// Hard ceiling on `display_amount`; the input form enforces this too, but
/// the core clamps defensively.
pub const MAX_DISPLAY_AMOUNT: u32 = 30;

/// Hard ceiling on the search radius in kilometers.
pub const MAX_RADIUS_KM: f64 = 75.0;

/// A WGS84 point. Matches the `{lat, lng}` literal used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// True when both components are finite and inside the valid WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// User-controlled filter and limit parameters governing one search cycle.
///
/// `since_date` and `before_date` are `"YYYY-MM-DD"` strings; the empty
/// string means "no bound", never "now" or "epoch". `grade_type` is a
/// comma-joined subset of `needs_id`, `research`, `casual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    #[serde(rename = "radius")]
    pub radius_km: f64,
    #[serde(rename = "displayAmount")]
    pub display_amount: u32,
    #[serde(rename = "sinceDate")]
    pub since_date: String,
    #[serde(rename = "beforeDate")]
    pub before_date: String,
    #[serde(rename = "gradeType")]
    pub grade_type: String,
    #[serde(rename = "useCurrentLocation")]
    pub use_current_location: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            radius_km: 75.0,
            display_amount: 20,
            since_date: String::new(),
            before_date: String::new(),
            grade_type: "needs_id,research,casual".to_string(),
            use_current_location: false,
        }
    }
}

impl DisplayOptions {
    /// Returns a copy with `display_amount` forced into its documented
    /// bounds and `radius_km` capped at its ceiling. Any positive radius
    /// below the ceiling passes through untouched; non-positive and
    /// non-finite radii are left for the query builder to reject. The input
    /// form already enforces these, so this only matters for callers that
    /// bypass it.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            radius_km: if self.radius_km > MAX_RADIUS_KM {
                MAX_RADIUS_KM
            } else {
                self.radius_km
            },
            display_amount: self.display_amount.clamp(1, MAX_DISPLAY_AMOUNT),
            ..self.clone()
        }
    }
}

/// Everything needed to run one aggregation cycle. Built fresh per fetch,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDescriptor {
    #[serde(rename = "specimenName")]
    pub specimen_name: String,
    pub coordinate: Coordinate,
    #[serde(rename = "searchOptions")]
    pub options: DisplayOptions,
}

/// A contributor on the upstream site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "userIcon")]
    pub user_icon: String,
}

/// The three size variants derived from an observation's first photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    pub original: String,
    pub thumbnail: String,
    pub small: String,
}

/// One validated sighting record. Immutable once constructed; the whole
/// collection is replaced on every fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub user: UserRef,
    #[serde(rename = "observedDate")]
    pub observed_date: String,
    pub species_guess: String,
    pub taxon_name: String,
    pub place_guess: String,
    pub coordinates: Coordinate,
    #[serde(rename = "gradeType")]
    pub grade_type: String,
    pub images: ImageSet,
}

/// One row of a leaderboard. `count` is observations or identifications
/// depending on the role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadingUser {
    pub user: UserRef,
    pub count: u32,
}

impl LeadingUser {
    /// Zero-count filler row used to pad a leaderboard to its fixed height.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            user: UserRef {
                user_name: String::new(),
                user_id: -1,
                user_icon: String::new(),
            },
            count: 0,
        }
    }
}

/// Both leaderboards for the searched area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadingUsers {
    pub identifiers: Vec<LeadingUser>,
    pub observers: Vec<LeadingUser>,
}

/// The complete output of one aggregation cycle. Replaces the prior bundle
/// wholesale; nothing is ever merged into an existing bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub observations: Vec<Observation>,
    pub images: Vec<ImageSet>,
    #[serde(rename = "leadingUsers")]
    pub leading_users: LeadingUsers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_validity() {
        assert!(DEFAULT_COORDINATE.is_valid());
        assert!(!Coordinate {
            lat: f64::NAN,
            lng: 0.0
        }
        .is_valid());
        assert!(!Coordinate {
            lat: 91.0,
            lng: 0.0
        }
        .is_valid());
        assert!(!Coordinate {
            lat: 0.0,
            lng: -181.0
        }
        .is_valid());
    }

    #[test]
    fn display_options_clamped_bounds() {
        let opts = DisplayOptions {
            radius_km: 500.0,
            display_amount: 99,
            ..DisplayOptions::default()
        };
        let clamped = opts.clamped();
        assert_eq!(clamped.display_amount, MAX_DISPLAY_AMOUNT);
        assert!((clamped.radius_km - MAX_RADIUS_KM).abs() < f64::EPSILON);
    }

    #[test]
    fn display_options_clamped_leaves_valid_values_alone() {
        let opts = DisplayOptions::default();
        assert_eq!(opts.clamped(), opts);
    }

    #[test]
    fn display_options_clamped_preserves_sub_kilometer_radius() {
        let opts = DisplayOptions {
            radius_km: 0.5,
            ..DisplayOptions::default()
        };
        assert!(
            (opts.clamped().radius_km - 0.5).abs() < f64::EPSILON,
            "a valid sub-kilometer radius must pass through untouched"
        );
    }

    #[test]
    fn display_options_clamped_keeps_non_finite_radius_for_rejection() {
        let opts = DisplayOptions {
            radius_km: f64::NAN,
            ..DisplayOptions::default()
        };
        assert!(opts.clamped().radius_km.is_nan());
    }

    #[test]
    fn result_bundle_serializes_wire_names() {
        let json = serde_json::to_value(ResultBundle::default()).unwrap();
        assert!(json.get("observations").is_some());
        assert!(json.get("images").is_some());
        assert!(json.get("leadingUsers").is_some());
    }

    #[test]
    fn search_descriptor_deserializes_post_body() {
        let body = serde_json::json!({
            "specimenName": "Poppy",
            "coordinate": {"lat": 39.35, "lng": -120.26},
            "searchOptions": {
                "radius": 75,
                "displayAmount": 20,
                "sinceDate": "",
                "beforeDate": "",
                "gradeType": "needs_id,research,casual",
                "useCurrentLocation": false
            }
        });
        let descriptor: SearchDescriptor = serde_json::from_value(body).unwrap();
        assert_eq!(descriptor.specimen_name, "Poppy");
        assert_eq!(descriptor.options.display_amount, 20);
        assert!(!descriptor.options.use_current_location);
    }
}
