//! seaplane-router core
//!
//! Itinerary planning for a seaplane delivery network: a port graph with
//! geometric fallback, cross-store entity resolution, payload checks and a
//! nearest-neighbor itinerary optimizer.

pub mod error;
pub mod model;
pub mod geometry;
pub mod graph;
pub mod resolver;
pub mod capacity;
pub mod solver;
pub mod traits;
pub mod neo4j;
pub mod documents;
pub mod config;
pub mod service;

pub use capacity::{validate_capacity, validate_fuel};
pub use error::{PlanError, RoutingError, StoreError};
pub use graph::PortGraph;
pub use resolver::{resolve_aircraft, resolve_port, resolve_ports};
pub use solver::{compute_itinerary, SolveOptions};
