//! Validation and mapping of raw upstream records into [`Observation`]s.

use specimap_core::{Coordinate, ImageSet, Observation, UserRef, PLACEHOLDER_ICON};

use crate::types::RawObservation;

/// Maps one raw record into an [`Observation`], or `None` if the record is
/// not displayable.
///
/// A record is rejected when it lacks a first photo or a geographic
/// coordinate pair; everything else gets an explicit default. The searched
/// specimen name fills in for a missing species guess or taxon common name.
#[must_use]
pub fn normalize(raw: &RawObservation, fallback_specimen: &str) -> Option<Observation> {
    let photo_url = raw.photos.first().map(|p| p.url.as_str())?;
    if photo_url.is_empty() {
        return None;
    }

    // The provider sends the point as a bare pair with latitude first.
    let coords = raw.geojson.as_ref().map(|g| &g.coordinates)?;
    let (&lat, &lng) = (coords.first()?, coords.get(1)?);

    let user = raw.user.as_ref();
    let observation = Observation {
        user: UserRef {
            user_name: user
                .and_then(|u| u.login.clone())
                .unwrap_or_default(),
            user_id: user.and_then(|u| u.id).unwrap_or(-1),
            user_icon: user
                .and_then(|u| u.icon.clone())
                .unwrap_or_else(|| PLACEHOLDER_ICON.to_string()),
        },
        observed_date: raw
            .observed_on_details
            .as_ref()
            .and_then(|o| o.date.clone())
            .unwrap_or_default(),
        species_guess: raw
            .species_guess
            .clone()
            .unwrap_or_else(|| fallback_specimen.to_string()),
        taxon_name: raw
            .taxon
            .as_ref()
            .and_then(|t| t.preferred_common_name.clone())
            .unwrap_or_else(|| fallback_specimen.to_string()),
        place_guess: raw.place_guess.clone().unwrap_or_default(),
        coordinates: Coordinate { lat, lng },
        grade_type: raw.quality_grade.clone().unwrap_or_default(),
        // Only the first size token is substituted; the token may also
        // appear elsewhere in the path.
        images: ImageSet {
            original: photo_url.replacen("square", "large", 1),
            thumbnail: photo_url.to_string(),
            small: photo_url.replacen("square", "small", 1),
        },
    };

    Some(observation)
}
