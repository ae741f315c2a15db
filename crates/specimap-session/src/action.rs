use specimap_core::{Coordinate, DisplayOptions, ResultBundle};

/// The display surface currently routed to in the map navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    Locations,
    #[default]
    Images,
    Leaderboard,
}

/// Every mutation of [`crate::SessionState`] funnels through one of these.
#[derive(Debug, Clone)]
pub enum SessionAction {
    /// The authoritative coordinate changed (map click, geolocation, fallback).
    SetCoordinates(Coordinate),
    /// Full replacement of the display options (filter form submission).
    SetDisplayOptions(DisplayOptions),
    /// Pure UI routing; never triggers a fetch.
    SetActivePanel(ActivePanel),
    /// Fetch-in-flight indicator for the display surfaces.
    SetLoading(bool),
    /// Replaces observations, images, and leaderboards wholesale; implies
    /// `loading = false`, resets the gallery index to 0, and re-derives the
    /// credentials.
    SetFetchResult(ResultBundle),
    /// Re-derives the gallery credentials from the observation at this
    /// index (fired on every gallery slide).
    SetCredentials(usize),
}
