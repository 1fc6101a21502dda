//! Error types for the routing core and its store adapters.

use thiserror::Error;

/// Errors raised by the routing core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// A depot or target id that is not part of the port graph.
    #[error("unknown port: {0}")]
    UnknownPort(String),

    /// Neither an edge nor both coordinates exist for this pair.
    #[error("no distance available between {from} and {to}")]
    NoDistanceAvailable { from: String, to: String },

    #[error("payload capacity exceeded: {used} crates requested, capacity is {max}")]
    CapacityExceeded { used: u64, max: u64 },

    #[error("fuel capacity exceeded: itinerary needs {required:.2}, tank holds {capacity:.2}")]
    FuelExceeded { required: f64, capacity: f64 },

    /// No aircraft spec exists for the requested id.
    #[error("aircraft {0} cannot be resolved")]
    AircraftUnresolvable(String),
}

/// Errors raised while reading snapshots from the backing stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// Statement error reported by the graph store.
    #[error("query failed ({code}): {message}")]
    Query { code: String, message: String },
}

/// Errors surfaced by [`crate::service::ItineraryService`].
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}
