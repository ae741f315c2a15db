//! Session state machine for the observation map: the reducer all display
//! surfaces consume, the coordinate resolver, and the engine that drives
//! resolve-then-fetch cycles against the upstream client.

mod action;
mod engine;
mod location;
mod state;

pub use action::{ActivePanel, SessionAction};
pub use engine::{CycleTicket, SessionEngine};
pub use location::{resolve_coordinate, GeolocationError, GeolocationProvider, NoGeolocation};
pub use state::{credentials_at, reduce, ObservationCredentials, SessionState};
