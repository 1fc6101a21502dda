//! Read-only seams to the two backing stores.
//!
//! The routing core never talks to a store; the orchestrator pulls fresh
//! snapshots through these traits on every request. Implementations are
//! injected, so tests can substitute in-memory doubles.

use crate::error::StoreError;
use crate::model::{AircraftSpec, AircraftState, Edge, Island, RawPort};

/// Spatial and dynamic data: ports, inter-port edges, aircraft positions.
pub trait GraphSource {
    fn ports(&self) -> Result<Vec<RawPort>, StoreError>;

    fn edges(&self) -> Result<Vec<Edge>, StoreError>;

    fn aircraft_states(&self) -> Result<Vec<AircraftState>, StoreError>;
}

/// Static business data: aircraft specs and island reference data.
pub trait DocumentSource {
    fn aircraft_specs(&self) -> Result<Vec<AircraftSpec>, StoreError>;

    fn islands(&self) -> Result<Vec<Island>, StoreError>;
}
