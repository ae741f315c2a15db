//! Client and aggregation pipeline for the upstream observation provider:
//! query construction, raw-record normalization, admission filtering, and
//! leaderboard assembly.

mod client;
mod error;
mod filter;
mod normalize;
mod query;
mod types;

pub use client::{InatClient, LEADER_POSITIONS};
pub use error::InatError;
pub use filter::admit;
pub use normalize::normalize;
pub use query::{leaderboard_url, observation_url, LeaderRole};
pub use types::{
    LeaderPage, ObservationPage, RawGeoJson, RawLeaderEntry, RawObservation, RawObservedOn,
    RawPhoto, RawTaxon, RawUser,
};
