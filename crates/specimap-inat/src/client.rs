//! HTTP client for the upstream observation provider.
//!
//! Wraps `reqwest` with typed response deserialization and the aggregation
//! pipeline: query building, per-record normalization, admission filtering,
//! and leaderboard assembly. The base URL is overridable so tests can point
//! at a wiremock server.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use specimap_core::{LeadingUser, LeadingUsers, ResultBundle, SearchDescriptor};

use crate::error::InatError;
use crate::filter::admit;
use crate::normalize::normalize;
use crate::query::{leaderboard_url, observation_url, LeaderRole};
use crate::types::{LeaderPage, ObservationPage};

const DEFAULT_BASE_URL: &str = "https://api.inaturalist.org/v1";

/// Number of rows each leaderboard is padded or truncated to.
pub const LEADER_POSITIONS: usize = 10;

/// Client for the observation provider's REST API.
///
/// Use [`InatClient::new`] for production or [`InatClient::with_base_url`]
/// to point at a mock server in tests.
pub struct InatClient {
    client: Client,
    base_url: Url,
}

impl InatClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`InatError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, InatError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InatError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InatError::InvalidQuery`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, InatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("specimap/0.1 (observation-aggregation)")
            .build()?;

        // Normalise: no trailing slash, so path_segments_mut appends clean
        // segments instead of leaving an empty one in the middle.
        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| InatError::InvalidQuery(format!("invalid base URL '{trimmed}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Runs one full aggregation cycle for a search descriptor.
    ///
    /// A blank specimen name is a defined "empty query": the call returns an
    /// empty bundle without touching the network. Otherwise the primary
    /// observation page and both leaderboards are fetched concurrently; raw
    /// records are normalized and admitted in arrival order until the
    /// display cap is reached.
    ///
    /// # Errors
    ///
    /// - [`InatError::InvalidQuery`] if the descriptor cannot form a query.
    /// - [`InatError::Http`] on primary-fetch network failure or non-2xx.
    /// - [`InatError::Deserialize`] if the primary page is not the expected
    ///   shape.
    ///
    /// A leaderboard failure is absorbed: the bundle carries empty
    /// leaderboards and the error is logged, never surfaced.
    pub async fn fetch_specimen_observations(
        &self,
        descriptor: &SearchDescriptor,
    ) -> Result<ResultBundle, InatError> {
        if descriptor.specimen_name.trim().is_empty() {
            return Ok(ResultBundle::default());
        }

        let descriptor = SearchDescriptor {
            options: descriptor.options.clamped(),
            ..descriptor.clone()
        };

        let url = observation_url(&self.base_url, &descriptor)?;
        tracing::debug!(url = %url, "fetching observation page");

        let (page, leading_users) = tokio::join!(
            self.get::<ObservationPage>(url),
            self.fetch_leading_users(&descriptor)
        );
        let page = page?;

        let mut observations = Vec::new();
        for raw in &page.results {
            let Some(observation) = normalize(raw, &descriptor.specimen_name) else {
                tracing::debug!("skipping malformed record (missing photo or coordinates)");
                continue;
            };
            if admit(&observation, &descriptor.options, observations.len()) {
                observations.push(observation);
            }
        }

        let images = observations.iter().map(|o| o.images.clone()).collect();

        Ok(ResultBundle {
            observations,
            images,
            leading_users,
        })
    }

    /// Fetches the top contributors for both roles.
    ///
    /// Exactly [`LEADER_POSITIONS`] rows per role, padded with zero-count
    /// placeholders when the provider returns fewer. If either role's fetch
    /// fails, both come back empty: an inconsistent leaderboard is worse
    /// than an empty one.
    pub async fn fetch_leading_users(&self, descriptor: &SearchDescriptor) -> LeadingUsers {
        let urls = leaderboard_url(&self.base_url, descriptor, LeaderRole::Observers)
            .and_then(|o| {
                leaderboard_url(&self.base_url, descriptor, LeaderRole::Identifiers)
                    .map(|i| (o, i))
            });
        let (observers_url, identifiers_url) = match urls {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!(error = %e, "leaderboard query construction failed");
                return LeadingUsers::default();
            }
        };

        let (observers, identifiers) = tokio::join!(
            self.get::<LeaderPage>(observers_url),
            self.get::<LeaderPage>(identifiers_url)
        );

        match (observers, identifiers) {
            (Ok(observers), Ok(identifiers)) => LeadingUsers {
                observers: ranked_rows(&observers, LeaderRole::Observers),
                identifiers: ranked_rows(&identifiers, LeaderRole::Identifiers),
            },
            (observers, identifiers) => {
                if let Err(e) = observers {
                    tracing::warn!(error = %e, "observer leaderboard fetch failed");
                }
                if let Err(e) = identifiers {
                    tracing::warn!(error = %e, "identifier leaderboard fetch failed");
                }
                LeadingUsers::default()
            }
        }
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, InatError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| InatError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// Maps a leader page into exactly [`LEADER_POSITIONS`] rows in upstream
/// rank order. The count source differs by role: observers carry
/// `observation_count`, identifiers a generic `count`.
fn ranked_rows(page: &LeaderPage, role: LeaderRole) -> Vec<LeadingUser> {
    (0..LEADER_POSITIONS)
        .map(|rank| {
            page.results.get(rank).map_or_else(LeadingUser::placeholder, |entry| {
                let user = entry.user.as_ref();
                LeadingUser {
                    user: specimap_core::UserRef {
                        user_name: user.and_then(|u| u.login.clone()).unwrap_or_default(),
                        user_id: user.and_then(|u| u.id).unwrap_or(-1),
                        user_icon: user.and_then(|u| u.icon.clone()).unwrap_or_default(),
                    },
                    count: match role {
                        LeaderRole::Observers => entry.observation_count.unwrap_or(0),
                        LeaderRole::Identifiers => entry.count.unwrap_or(0),
                    },
                }
            })
        })
        .collect()
}
