//! Query construction for the upstream observation provider.
//!
//! Pure string/URL building; no network access. All parameter values go
//! through `query_pairs_mut`, so they are percent-encoded exactly once.

use chrono::{NaiveDate, NaiveTime, SecondsFormat, Utc};
use reqwest::Url;
use specimap_core::SearchDescriptor;

use crate::error::InatError;

/// The two leaderboard roles, each served under its own path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderRole {
    Observers,
    Identifiers,
}

impl LeaderRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LeaderRole::Observers => "observers",
            LeaderRole::Identifiers => "identifiers",
        }
    }
}

/// Builds the primary observation query URL.
///
/// Always sets `taxon_name`, `lat`, `lng`, `radius`, and `quality_grade`.
/// `d1`/`d2` appear only when the corresponding date option is non-empty;
/// an absent date means "no bound", never "now" or "epoch".
///
/// # Errors
///
/// Returns [`InatError::InvalidQuery`] if the specimen name is blank, the
/// coordinate is non-finite or out of range, the radius is not a positive
/// finite number, or a set date string does not parse.
pub fn observation_url(base: &Url, descriptor: &SearchDescriptor) -> Result<Url, InatError> {
    build_query(base, descriptor, &["observations"])
}

/// Builds the leaderboard query URL for one role.
///
/// Same parameters and validation as [`observation_url`], with the role
/// appended as a path segment.
///
/// # Errors
///
/// Returns [`InatError::InvalidQuery`] under the same conditions as
/// [`observation_url`].
pub fn leaderboard_url(
    base: &Url,
    descriptor: &SearchDescriptor,
    role: LeaderRole,
) -> Result<Url, InatError> {
    build_query(base, descriptor, &["observations", role.as_str()])
}

fn build_query(
    base: &Url,
    descriptor: &SearchDescriptor,
    segments: &[&str],
) -> Result<Url, InatError> {
    let name = descriptor.specimen_name.trim();
    if name.is_empty() {
        return Err(InatError::InvalidQuery(
            "specimen name must not be empty".to_string(),
        ));
    }
    if !descriptor.coordinate.is_valid() {
        return Err(InatError::InvalidQuery(format!(
            "coordinate out of range: lat={}, lng={}",
            descriptor.coordinate.lat, descriptor.coordinate.lng
        )));
    }
    let options = &descriptor.options;
    if !options.radius_km.is_finite() || options.radius_km <= 0.0 {
        return Err(InatError::InvalidQuery(format!(
            "radius must be a positive number, got {}",
            options.radius_km
        )));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| InatError::InvalidQuery("base URL cannot be a base".to_string()))?
        .extend(segments);

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("taxon_name", name);
        pairs.append_pair("lat", &descriptor.coordinate.lat.to_string());
        pairs.append_pair("lng", &descriptor.coordinate.lng.to_string());
        pairs.append_pair("radius", &options.radius_km.to_string());
        pairs.append_pair("quality_grade", &options.grade_type);

        if !options.since_date.is_empty() {
            pairs.append_pair("d1", &normalize_date_param(&options.since_date, "d1")?);
        }
        if !options.before_date.is_empty() {
            pairs.append_pair("d2", &normalize_date_param(&options.before_date, "d2")?);
        }
    }

    Ok(url)
}

/// Converts a `"YYYY-MM-DD"` option string into the RFC3339 millisecond UTC
/// timestamp the provider expects (`2024-01-01T00:00:00.000Z`). Full RFC3339
/// input is passed through re-normalized.
fn normalize_date_param(raw: &str, param: &str) -> Result<String, InatError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let ts = date.and_time(NaiveTime::MIN).and_utc();
        return Ok(ts.to_rfc3339_opts(SecondsFormat::Millis, true));
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(ts
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true));
    }
    Err(InatError::InvalidQuery(format!(
        "unparsable date for {param}: '{raw}'"
    )))
}

#[cfg(test)]
mod tests {
    use specimap_core::{Coordinate, DisplayOptions};

    use super::*;

    fn base() -> Url {
        Url::parse("https://api.inaturalist.org/v1").unwrap()
    }

    fn poppy_descriptor() -> SearchDescriptor {
        SearchDescriptor {
            specimen_name: "Poppy".to_string(),
            coordinate: Coordinate {
                lat: 39.35,
                lng: -120.26,
            },
            options: DisplayOptions::default(),
        }
    }

    #[test]
    fn observation_url_matches_reference_query() {
        let url = observation_url(&base(), &poppy_descriptor()).unwrap();
        assert!(url.as_str().contains(
            "taxon_name=Poppy&lat=39.35&lng=-120.26&radius=75&quality_grade=needs_id%2Cresearch%2Ccasual"
        ));
        assert!(!url.as_str().contains("d1="));
        assert!(!url.as_str().contains("d2="));
    }

    #[test]
    fn observation_url_includes_normalized_dates_when_set() {
        let mut descriptor = poppy_descriptor();
        descriptor.options.since_date = "2024-01-01".to_string();
        descriptor.options.before_date = "2024-06-15".to_string();
        let url = observation_url(&base(), &descriptor).unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("d1=2024-01-01T00%3A00%3A00.000Z"));
        assert!(query.contains("d2=2024-06-15T00%3A00%3A00.000Z"));
    }

    #[test]
    fn observation_url_rejects_blank_specimen() {
        let mut descriptor = poppy_descriptor();
        descriptor.specimen_name = "  ".to_string();
        let err = observation_url(&base(), &descriptor).unwrap_err();
        assert!(matches!(err, InatError::InvalidQuery(_)));
    }

    #[test]
    fn observation_url_rejects_non_finite_coordinate() {
        let mut descriptor = poppy_descriptor();
        descriptor.coordinate.lat = f64::NAN;
        let err = observation_url(&base(), &descriptor).unwrap_err();
        assert!(matches!(err, InatError::InvalidQuery(_)));
    }

    #[test]
    fn observation_url_rejects_unparsable_date() {
        let mut descriptor = poppy_descriptor();
        descriptor.options.since_date = "last tuesday".to_string();
        let err = observation_url(&base(), &descriptor).unwrap_err();
        assert!(matches!(err, InatError::InvalidQuery(_)));
    }

    #[test]
    fn leaderboard_url_appends_role_segment() {
        let observers =
            leaderboard_url(&base(), &poppy_descriptor(), LeaderRole::Observers).unwrap();
        assert!(observers.path().ends_with("/observations/observers"));

        let identifiers =
            leaderboard_url(&base(), &poppy_descriptor(), LeaderRole::Identifiers).unwrap();
        assert!(identifiers.path().ends_with("/observations/identifiers"));
    }

    #[test]
    fn query_encodes_specimen_name_once() {
        let mut descriptor = poppy_descriptor();
        descriptor.specimen_name = "California Poppy".to_string();
        let url = observation_url(&base(), &descriptor).unwrap();
        let query = url.query().unwrap();
        assert!(
            query.contains("taxon_name=California+Poppy")
                || query.contains("taxon_name=California%20Poppy"),
            "specimen name should be encoded once: {query}"
        );
    }
}
