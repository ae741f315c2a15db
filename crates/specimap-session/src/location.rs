//! Coordinate resolution across the three competing sources: device
//! geolocation, the explicit map-click coordinate, and the default fallback.

use specimap_core::{Coordinate, DEFAULT_COORDINATE};
use thiserror::Error;

/// Why a device position could not be obtained. Always absorbed: the
/// resolver falls back to the default coordinate and logs, never throws.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("geolocation permission denied")]
    Denied,

    #[error("geolocation request timed out")]
    Timeout,

    #[error("geolocation is not supported in this environment")]
    Unsupported,

    #[error("geolocation unavailable: {0}")]
    Unavailable(String),
}

/// Source of the device position. The map UI backs this with the browser
/// geolocation permission prompt; headless contexts use [`NoGeolocation`].
pub trait GeolocationProvider {
    fn current_position(
        &self,
    ) -> impl std::future::Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

/// Provider for environments without a positioning device.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl GeolocationProvider for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Reconciles the coordinate sources into one authoritative point.
///
/// With `use_current_location` set, the device position wins; on any
/// geolocation failure the default coordinate is adopted instead and the
/// error is logged. With the flag unset, the existing coordinate stands.
/// Either way the flag is spent: callers clear `use_current_location`
/// unconditionally after the call — it is a one-shot trigger, not a mode.
pub async fn resolve_coordinate<G: GeolocationProvider>(
    use_current_location: bool,
    current: Coordinate,
    geo: &G,
) -> Coordinate {
    if !use_current_location {
        return current;
    }

    match geo.current_position().await {
        Ok(position) => position,
        Err(e) => {
            tracing::warn!(error = %e, "geolocation failed, falling back to default coordinate");
            DEFAULT_COORDINATE
        }
    }
}
