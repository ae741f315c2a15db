//! Orchestration of the resolve-then-fetch cycle around the pure reducer.
//!
//! The engine owns the [`SessionState`] and the stale-cycle policy. A cycle
//! is split into an explicit begin/finish pair so overlapping triggers have
//! a defined outcome: each begin stamps a generation number, and a finish
//! whose generation has been superseded is dropped. Latest trigger wins;
//! in-flight fetches are never cancelled, only ignored.

use specimap_core::{Coordinate, ResultBundle, SearchDescriptor};
use specimap_inat::{InatClient, InatError};

use crate::action::SessionAction;
use crate::location::{resolve_coordinate, GeolocationProvider};
use crate::state::{reduce, SessionState};

/// Handle for one in-flight cycle: the stamped generation plus the
/// descriptor the fetch must use.
#[derive(Debug, Clone)]
pub struct CycleTicket {
    generation: u64,
    pub descriptor: SearchDescriptor,
}

/// Owns the session state and funnels every mutation through the reducer.
#[derive(Debug, Default)]
pub struct SessionEngine {
    state: SessionState,
    generation: u64,
}

impl SessionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state,
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Applies one action to the state.
    pub fn dispatch(&mut self, action: SessionAction) {
        self.state = reduce(&self.state, &action);
    }

    /// Records a map click as the new authoritative coordinate.
    pub fn map_clicked(&mut self, coordinate: Coordinate) {
        self.dispatch(SessionAction::SetCoordinates(coordinate));
    }

    /// Starts a search cycle: marks the session loading, resolves the
    /// authoritative coordinate (spending the one-shot geolocation flag),
    /// and returns the ticket the eventual [`finish_cycle`] must present.
    ///
    /// [`finish_cycle`]: SessionEngine::finish_cycle
    pub async fn begin_cycle<G: GeolocationProvider>(&mut self, geo: &G) -> CycleTicket {
        self.generation += 1;
        let generation = self.generation;

        self.dispatch(SessionAction::SetLoading(true));

        let use_current = self.state.display_options.use_current_location;
        let coordinate = resolve_coordinate(use_current, self.state.coordinates, geo).await;
        self.dispatch(SessionAction::SetCoordinates(coordinate));

        if use_current {
            let mut options = self.state.display_options.clone();
            options.use_current_location = false;
            self.dispatch(SessionAction::SetDisplayOptions(options));
        }

        CycleTicket {
            generation,
            descriptor: SearchDescriptor {
                specimen_name: self.state.specimen_name.clone(),
                coordinate: self.state.coordinates,
                options: self.state.display_options.clone(),
            },
        }
    }

    /// Applies a completed cycle's outcome.
    ///
    /// A superseded ticket is dropped without touching the state — the newer
    /// cycle's begin already owns the loading flag. A failed primary fetch
    /// clears `loading` but leaves the prior results intact; it must never
    /// collapse valid results into an ambiguous empty state.
    pub fn finish_cycle(&mut self, ticket: &CycleTicket, outcome: Result<ResultBundle, InatError>) {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping result of superseded fetch cycle"
            );
            return;
        }

        match outcome {
            Ok(bundle) => self.dispatch(SessionAction::SetFetchResult(bundle)),
            Err(e) => {
                tracing::error!(error = %e, "observation fetch failed");
                self.dispatch(SessionAction::SetLoading(false));
            }
        }
    }

    /// Convenience wrapper running one full cycle end to end: resolve,
    /// fetch, apply. Triggered on any coordinate or display-option change.
    pub async fn run_search_cycle<G: GeolocationProvider>(
        &mut self,
        client: &InatClient,
        geo: &G,
    ) {
        let ticket = self.begin_cycle(geo).await;
        let outcome = client.fetch_specimen_observations(&ticket.descriptor).await;
        self.finish_cycle(&ticket, outcome);
    }

    /// Replaces the display options (filter form submission). Callers start
    /// a new cycle after every option change; panel routing never does.
    pub fn submit_options(&mut self, options: specimap_core::DisplayOptions) {
        self.dispatch(SessionAction::SetDisplayOptions(options));
    }

    /// Replaces the searched specimen (autocomplete selection).
    pub fn set_specimen(&mut self, name: impl Into<String>) {
        self.state.specimen_name = name.into();
    }
}
