//! Origin selection: device geolocation or a point picked on the map.
//!
//! The two modes are mutually exclusive. [`OriginMode`] carries the active
//! mode together with the state that belongs to it, so switching modes drops
//! whatever the previous mode had collected.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

/// Timeout applied to one-shot geolocation requests.
pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(8);

/// Active origin mode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum OriginMode {
    /// No origin source selected.
    #[default]
    Unset,
    /// Ask the device for its position when a route is calculated.
    Geolocation,
    /// Use the last point clicked on the map.
    MapPick {
        /// Most recent map click, if any.
        picked: Option<Coord<f64>>,
    },
}

impl OriginMode {
    /// Whether geolocation mode is active.
    pub const fn is_geolocation(&self) -> bool {
        matches!(self, Self::Geolocation)
    }

    /// Whether map-pick mode is active.
    pub const fn is_map_pick(&self) -> bool {
        matches!(self, Self::MapPick { .. })
    }

    /// The map-picked coordinate, if one has been set.
    pub const fn picked(&self) -> Option<Coord<f64>> {
        match self {
            Self::MapPick { picked } => *picked,
            _ => None,
        }
    }
}

/// Options for a one-shot position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Prefer an accurate fix over a fast one.
    pub high_accuracy: bool,
    /// Give up after this long.
    pub timeout: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: DEFAULT_GEOLOCATION_TIMEOUT,
        }
    }
}

/// Errors from [`PositionSource::current_position`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The user refused location access.
    #[error("location permission denied")]
    PermissionDenied,
    /// The host has no way to determine its position.
    #[error("geolocation is not available")]
    Unavailable,
    /// No fix arrived in time.
    #[error("geolocation timed out after {timeout_secs}s")]
    Timeout {
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The position lookup failed for another reason.
    #[error("geolocation lookup failed: {message}")]
    Lookup {
        /// Failure description.
        message: String,
    },
}

/// One-shot device position.
pub trait PositionSource {
    /// Return the current position or fail; implementations must honour
    /// `options.timeout`.
    fn current_position(&self, options: &PositionOptions) -> Result<Coord<f64>, GeolocationError>;
}

/// A device whose position is known up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPositionSource {
    position: Coord<f64>,
}

impl FixedPositionSource {
    /// Always report `position`.
    pub const fn new(position: Coord<f64>) -> Self {
        Self { position }
    }
}

impl PositionSource for FixedPositionSource {
    fn current_position(&self, _options: &PositionOptions) -> Result<Coord<f64>, GeolocationError> {
        Ok(self.position)
    }
}

/// A device without geolocation capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPositionSource;

impl PositionSource for NoPositionSource {
    fn current_position(&self, _options: &PositionOptions) -> Result<Coord<f64>, GeolocationError> {
        Err(GeolocationError::Unavailable)
    }
}
