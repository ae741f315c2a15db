//! The session state container and its pure transition function.
//!
//! All three display surfaces (map markers, image gallery, leaderboard)
//! read from one [`SessionState`]; because every mutation goes through
//! [`reduce`] one action at a time, they can never observe a half-applied
//! update.

use specimap_core::{
    Coordinate, DisplayOptions, ImageSet, LeadingUsers, Observation, DEFAULT_COORDINATE,
    PLACEHOLDER_ICON,
};

use crate::action::{ActivePanel, SessionAction};

/// The derived display fields for whichever observation the gallery is
/// focused on. Always recomputed from `observations[gallery_index]`, never
/// set field-by-field, so the gallery caption cannot drift from the marker
/// set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationCredentials {
    pub observer: String,
    pub title: String,
    pub date: String,
    pub place: String,
    pub icon: String,
}

impl Default for ObservationCredentials {
    fn default() -> Self {
        Self {
            observer: String::new(),
            title: String::new(),
            date: String::new(),
            place: String::new(),
            icon: PLACEHOLDER_ICON.to_string(),
        }
    }
}

/// Derives the gallery credentials for one index. Out-of-range indexes get
/// the defined-empty credentials rather than stale or panicking access.
#[must_use]
pub fn credentials_at(observations: &[Observation], index: usize) -> ObservationCredentials {
    observations
        .get(index)
        .map_or_else(ObservationCredentials::default, |observation| {
            ObservationCredentials {
                observer: observation.user.user_name.clone(),
                title: observation.species_guess.clone(),
                date: observation.observed_date.clone(),
                place: observation.place_guess.clone(),
                icon: observation.user.user_icon.clone(),
            }
        })
}

/// The complete per-tab session state. Created once at mount, replaced
/// field-by-field through [`reduce`], torn down only on reload.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub specimen_name: String,
    pub coordinates: Coordinate,
    pub display_options: DisplayOptions,
    pub active_panel: ActivePanel,
    pub loading: bool,
    pub observations: Vec<Observation>,
    pub images: Vec<ImageSet>,
    pub leading_users: LeadingUsers,
    pub gallery_index: usize,
    pub credentials: ObservationCredentials,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            specimen_name: "Poppy".to_string(),
            coordinates: DEFAULT_COORDINATE,
            display_options: DisplayOptions::default(),
            active_panel: ActivePanel::default(),
            loading: false,
            observations: Vec::new(),
            images: Vec::new(),
            leading_users: LeadingUsers::default(),
            gallery_index: 0,
            credentials: ObservationCredentials::default(),
        }
    }
}

/// Pure transition function: applies one action to the state and returns
/// the next state. No I/O, no side effects; the orchestration layer owns
/// deciding when to dispatch what.
#[must_use]
pub fn reduce(state: &SessionState, action: &SessionAction) -> SessionState {
    let mut next = state.clone();
    match action {
        SessionAction::SetCoordinates(coordinate) => {
            next.coordinates = *coordinate;
        }
        SessionAction::SetDisplayOptions(options) => {
            next.display_options = options.clone();
        }
        SessionAction::SetActivePanel(panel) => {
            next.active_panel = *panel;
        }
        SessionAction::SetLoading(loading) => {
            next.loading = *loading;
        }
        SessionAction::SetFetchResult(bundle) => {
            next.observations = bundle.observations.clone();
            next.images = bundle.images.clone();
            next.leading_users = bundle.leading_users.clone();
            next.loading = false;
            next.gallery_index = 0;
            next.credentials = credentials_at(&next.observations, 0);
        }
        SessionAction::SetCredentials(index) => {
            next.gallery_index = *index;
            next.credentials = credentials_at(&next.observations, *index);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use specimap_core::{LeadingUser, ResultBundle, UserRef};

    use super::*;

    fn observation(name: &str, species: &str) -> Observation {
        Observation {
            user: UserRef {
                user_name: name.to_string(),
                user_id: 1,
                user_icon: format!("https://static.example/icons/{name}.png"),
            },
            observed_date: "2024-05-01".to_string(),
            species_guess: species.to_string(),
            taxon_name: species.to_string(),
            place_guess: "Truckee, CA".to_string(),
            coordinates: DEFAULT_COORDINATE,
            grade_type: "research".to_string(),
            images: ImageSet {
                original: format!("https://static.example/photos/{name}/large.jpg"),
                thumbnail: format!("https://static.example/photos/{name}/square.jpg"),
                small: format!("https://static.example/photos/{name}/small.jpg"),
            },
        }
    }

    fn bundle_of(names: &[&str]) -> ResultBundle {
        let observations: Vec<Observation> =
            names.iter().map(|n| observation(n, "Poppy")).collect();
        let images = observations.iter().map(|o| o.images.clone()).collect();
        ResultBundle {
            observations,
            images,
            leading_users: LeadingUsers {
                identifiers: vec![LeadingUser::placeholder()],
                observers: vec![LeadingUser::placeholder()],
            },
        }
    }

    #[test]
    fn default_state_matches_mount_defaults() {
        let state = SessionState::default();
        assert_eq!(state.specimen_name, "Poppy");
        assert_eq!(state.coordinates, DEFAULT_COORDINATE);
        assert_eq!(state.active_panel, ActivePanel::Images);
        assert!(!state.loading);
        assert!(state.observations.is_empty());
        assert_eq!(state.credentials.icon, PLACEHOLDER_ICON);
    }

    #[test]
    fn set_coordinates_only_touches_coordinates() {
        let state = SessionState::default();
        let clicked = Coordinate {
            lat: 45.0,
            lng: -110.0,
        };
        let next = reduce(&state, &SessionAction::SetCoordinates(clicked));
        assert_eq!(next.coordinates, clicked);
        assert_eq!(next.display_options, state.display_options);
        assert_eq!(next.observations, state.observations);
    }

    #[test]
    fn set_display_options_replaces_wholesale() {
        let state = SessionState::default();
        let options = DisplayOptions {
            display_amount: 5,
            since_date: "2024-01-01".to_string(),
            ..DisplayOptions::default()
        };
        let next = reduce(&state, &SessionAction::SetDisplayOptions(options.clone()));
        assert_eq!(next.display_options, options);
    }

    #[test]
    fn set_fetch_result_replaces_bundle_and_resets_gallery() {
        let mut state = SessionState::default();
        state.loading = true;
        state.gallery_index = 7;

        let next = reduce(&state, &SessionAction::SetFetchResult(bundle_of(&["a", "b"])));
        assert!(!next.loading);
        assert_eq!(next.gallery_index, 0);
        assert_eq!(next.observations.len(), 2);
        assert_eq!(next.images.len(), 2);
        assert_eq!(next.credentials.observer, "a");
        assert_eq!(next.credentials.icon, "https://static.example/icons/a.png");
    }

    #[test]
    fn set_fetch_result_with_empty_bundle_yields_empty_credentials() {
        let state = reduce(
            &SessionState::default(),
            &SessionAction::SetFetchResult(bundle_of(&["a"])),
        );
        let next = reduce(&state, &SessionAction::SetFetchResult(ResultBundle::default()));
        assert!(next.observations.is_empty());
        assert_eq!(next.credentials, ObservationCredentials::default());
    }

    #[test]
    fn set_credentials_follows_gallery_slides() {
        let state = reduce(
            &SessionState::default(),
            &SessionAction::SetFetchResult(bundle_of(&["a", "b", "c"])),
        );
        let next = reduce(&state, &SessionAction::SetCredentials(2));
        assert_eq!(next.gallery_index, 2);
        assert_eq!(next.credentials.observer, "c");
    }

    #[test]
    fn set_credentials_out_of_range_is_defined_empty() {
        let state = reduce(
            &SessionState::default(),
            &SessionAction::SetFetchResult(bundle_of(&["a"])),
        );
        let next = reduce(&state, &SessionAction::SetCredentials(5));
        assert_eq!(next.credentials, ObservationCredentials::default());
    }

    #[test]
    fn set_active_panel_is_pure_routing() {
        let state = SessionState::default();
        let next = reduce(&state, &SessionAction::SetActivePanel(ActivePanel::Leaderboard));
        assert_eq!(next.active_panel, ActivePanel::Leaderboard);
        assert!(!next.loading);
        assert_eq!(next.observations, state.observations);
    }

    #[test]
    fn credentials_always_derived_from_current_index() {
        // The derived-view function is the single source for the caption
        // fields; spot-check the mapping.
        let observations = vec![observation("a", "California poppy")];
        let creds = credentials_at(&observations, 0);
        assert_eq!(creds.title, "California poppy");
        assert_eq!(creds.place, "Truckee, CA");
        assert_eq!(creds.date, "2024-05-01");
    }
}
