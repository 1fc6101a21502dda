//! Test fixtures for seaplane-router.
//!
//! Provides realistic test data including:
//! - Real Galapagos harbour positions
//! - Builders for ports, aircraft and in-memory store doubles

#![allow(dead_code)]

pub mod galapagos_ports;

pub use galapagos_ports::*;

use seaplane_router::error::StoreError;
use seaplane_router::model::{
    Aircraft, AircraftSpec, AircraftState, AircraftStatus, Coordinate, Edge, Island, IslandRef,
    Port, Position, RawPort,
};
use seaplane_router::traits::{DocumentSource, GraphSource};

/// Builder for resolved ports.
pub fn port(id: &str, position: Option<(f64, f64)>) -> Port {
    Port {
        id: id.to_string(),
        name: id.to_string(),
        coordinate: position.map(|(latitude, longitude)| Coordinate {
            latitude,
            longitude,
        }),
        island: None,
        aircraft_capacity: 0,
        aircraft_capacity_max: 4,
    }
}

/// Builder for raw ports as the graph store returns them.
pub fn raw_port(harbour: &Harbour) -> RawPort {
    RawPort {
        id: harbour.id.to_string(),
        name: harbour.name.to_string(),
        coordinate: Some(Coordinate {
            latitude: harbour.lat,
            longitude: harbour.lng,
        }),
        island: Some(IslandRef::Id(harbour.island_id.to_string())),
        aircraft_capacity: 0,
        aircraft_capacity_max: 3,
    }
}

pub fn spec(id: &str, payload_capacity: u32, consumption_per_km: f64) -> AircraftSpec {
    AircraftSpec {
        id: id.to_string(),
        model: "DHC-6 Twin Otter".to_string(),
        payload_capacity,
        fuel_capacity: 10_000.0,
        consumption_per_km,
    }
}

/// A resolved aircraft docked at the depot.
pub fn aircraft(consumption_per_km: f64) -> Aircraft {
    Aircraft {
        spec: spec("h1", 20, consumption_per_km),
        status: AircraftStatus::AtDepot,
        position: Position::Docked("depot".to_string()),
    }
}

pub fn docked_state(id: &str, status: AircraftStatus, port_id: &str) -> AircraftState {
    AircraftState {
        id: id.to_string(),
        status,
        current_port_id: Some(port_id.to_string()),
        current_coordinate: None,
    }
}

pub fn ids(targets: &[&str]) -> Vec<String> {
    targets.iter().map(|id| id.to_string()).collect()
}

/// In-memory double for both stores.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub ports: Vec<RawPort>,
    pub edges: Vec<Edge>,
    pub states: Vec<AircraftState>,
    pub specs: Vec<AircraftSpec>,
    pub islands: Vec<Island>,
    /// When set, every graph read fails with this message.
    pub graph_failure: Option<String>,
}

impl MemoryStore {
    /// The Galapagos network with Baltra as depot.
    pub fn galapagos() -> Self {
        Self {
            ports: HARBOURS.iter().map(raw_port).collect(),
            edges: galapagos_edges(),
            islands: galapagos_islands(),
            ..Self::default()
        }
    }

    fn graph_read<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, StoreError> {
        match &self.graph_failure {
            Some(message) => Err(StoreError::Query {
                code: "Neo.TransientError.General.DatabaseUnavailable".to_string(),
                message: message.clone(),
            }),
            None => Ok(items.to_vec()),
        }
    }
}

impl GraphSource for MemoryStore {
    fn ports(&self) -> Result<Vec<RawPort>, StoreError> {
        self.graph_read(&self.ports)
    }

    fn edges(&self) -> Result<Vec<Edge>, StoreError> {
        self.graph_read(&self.edges)
    }

    fn aircraft_states(&self) -> Result<Vec<AircraftState>, StoreError> {
        self.graph_read(&self.states)
    }
}

impl DocumentSource for MemoryStore {
    fn aircraft_specs(&self) -> Result<Vec<AircraftSpec>, StoreError> {
        Ok(self.specs.clone())
    }

    fn islands(&self) -> Result<Vec<Island>, StoreError> {
        Ok(self.islands.clone())
    }
}
