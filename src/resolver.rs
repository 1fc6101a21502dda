//! Merges entity data split across the document store and the graph store.
//!
//! Aircraft specs (document store) are joined with aircraft states (graph
//! store) by id. Ports have their island reference resolved and their
//! coordinates validated. A bad record never aborts the batch: it is
//! downgraded or skipped and reported as a [`ResolutionWarning`].

use std::collections::HashMap;

use tracing::warn;

use crate::model::{
    Aircraft, AircraftSpec, AircraftState, AircraftStatus, Island, IslandRef, Port, Position,
    RawPort,
};

/// Data-quality problems found while resolving a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionWarning {
    /// A state exists but no spec; the aircraft was dropped.
    OrphanState { aircraft_id: String },
    /// A spec exists but no state; resolved with unknown status.
    MissingState { aircraft_id: String },
    /// Fuel capacity or consumption negative or non-finite; the aircraft
    /// was dropped along with its state.
    InvalidSpec { aircraft_id: String },
    /// More than one state for the same id; the last one was kept.
    DuplicateState { aircraft_id: String },
    /// Status and position disagree; resolved with unknown status.
    InconsistentPosition {
        aircraft_id: String,
        status: AircraftStatus,
    },
    /// Island id not found; the port resolved without an island.
    UnknownIsland { port_id: String, island_id: String },
    /// Port coordinate out of range or non-finite; dropped.
    InvalidCoordinate { port_id: String },
    /// Port record without an id; skipped.
    BlankPortId { name: String },
}

/// Resolved records plus the warnings raised while producing them.
#[derive(Debug, Clone)]
pub struct Resolution<T> {
    pub resolved: Vec<T>,
    pub warnings: Vec<ResolutionWarning>,
}

/// Joins specs with states by aircraft id, in spec order. Specs whose fuel
/// figures cannot price a route are dropped.
pub fn resolve_aircraft(specs: &[AircraftSpec], states: &[AircraftState]) -> Resolution<Aircraft> {
    let mut warnings = Vec::new();

    let mut states_by_id: HashMap<&str, &AircraftState> = HashMap::new();
    for state in states {
        if states_by_id.insert(state.id.as_str(), state).is_some() {
            warn!(aircraft_id = %state.id, "duplicate aircraft state, keeping the last one");
            warnings.push(ResolutionWarning::DuplicateState {
                aircraft_id: state.id.clone(),
            });
        }
    }

    let mut resolved = Vec::with_capacity(specs.len());
    for spec in specs {
        if !spec.has_usable_fuel_figures() {
            warn!(
                aircraft_id = %spec.id,
                fuel_capacity = spec.fuel_capacity,
                consumption_per_km = spec.consumption_per_km,
                "aircraft spec has unusable fuel figures, dropped"
            );
            warnings.push(ResolutionWarning::InvalidSpec {
                aircraft_id: spec.id.clone(),
            });
            states_by_id.remove(spec.id.as_str());
            continue;
        }
        let aircraft = match states_by_id.remove(spec.id.as_str()) {
            Some(state) => merge(spec, state, &mut warnings),
            None => {
                warn!(aircraft_id = %spec.id, "aircraft spec has no state, status unknown");
                warnings.push(ResolutionWarning::MissingState {
                    aircraft_id: spec.id.clone(),
                });
                Aircraft {
                    spec: spec.clone(),
                    status: AircraftStatus::Unknown,
                    position: Position::Unknown,
                }
            }
        };
        resolved.push(aircraft);
    }

    // Whatever is left has no spec. Walk `states` to report in input order.
    for state in states {
        if states_by_id.remove(state.id.as_str()).is_some() {
            warn!(aircraft_id = %state.id, "aircraft state has no spec, dropped");
            warnings.push(ResolutionWarning::OrphanState {
                aircraft_id: state.id.clone(),
            });
        }
    }

    Resolution { resolved, warnings }
}

fn merge(
    spec: &AircraftSpec,
    state: &AircraftState,
    warnings: &mut Vec<ResolutionWarning>,
) -> Aircraft {
    let docked = state
        .current_port_id
        .as_ref()
        .filter(|id| !id.trim().is_empty())
        .cloned();
    let airborne = state.current_coordinate.filter(|c| c.is_valid());

    let placed = match state.status {
        AircraftStatus::AtPort | AircraftStatus::AtDepot => docked.map(Position::Docked),
        AircraftStatus::InFlight => airborne.map(Position::Airborne),
        AircraftStatus::Maintenance => Some(docked.map_or(Position::Unknown, Position::Docked)),
        AircraftStatus::Unknown => Some(Position::Unknown),
    };

    match placed {
        Some(position) => Aircraft {
            spec: spec.clone(),
            status: state.status,
            position,
        },
        None => {
            warn!(
                aircraft_id = %spec.id,
                status = ?state.status,
                "aircraft status does not match its position"
            );
            warnings.push(ResolutionWarning::InconsistentPosition {
                aircraft_id: spec.id.clone(),
                status: state.status,
            });
            Aircraft {
                spec: spec.clone(),
                status: AircraftStatus::Unknown,
                position: Position::Unknown,
            }
        }
    }
}

/// Resolves a single port. Missing islands and invalid coordinates are
/// logged and dropped rather than failing the record.
pub fn resolve_port(raw: &RawPort, islands_by_id: &HashMap<String, Island>) -> Port {
    build_port(raw, islands_by_id, &mut Vec::new())
}

/// Resolves a batch of ports. Records with a blank id are skipped.
pub fn resolve_ports(raws: &[RawPort], islands: &[Island]) -> Resolution<Port> {
    let islands_by_id = index_islands(islands);
    let mut warnings = Vec::new();
    let mut resolved = Vec::with_capacity(raws.len());

    for raw in raws {
        if raw.id.trim().is_empty() {
            warn!(name = %raw.name, "port record without id, skipped");
            warnings.push(ResolutionWarning::BlankPortId {
                name: raw.name.clone(),
            });
            continue;
        }
        resolved.push(build_port(raw, &islands_by_id, &mut warnings));
    }

    Resolution { resolved, warnings }
}

pub fn index_islands(islands: &[Island]) -> HashMap<String, Island> {
    islands
        .iter()
        .map(|island| (island.id.clone(), island.clone()))
        .collect()
}

fn build_port(
    raw: &RawPort,
    islands_by_id: &HashMap<String, Island>,
    warnings: &mut Vec<ResolutionWarning>,
) -> Port {
    let island = match &raw.island {
        Some(IslandRef::Embedded(island)) => Some(island.clone()),
        Some(IslandRef::Id(island_id)) => {
            let found = islands_by_id.get(island_id).cloned();
            if found.is_none() {
                warn!(port_id = %raw.id, island_id = %island_id, "unknown island reference");
                warnings.push(ResolutionWarning::UnknownIsland {
                    port_id: raw.id.clone(),
                    island_id: island_id.clone(),
                });
            }
            found
        }
        None => None,
    };

    let coordinate = match raw.coordinate {
        Some(coordinate) if coordinate.is_valid() => Some(coordinate),
        Some(_) => {
            warn!(port_id = %raw.id, "invalid port coordinate, ignoring it");
            warnings.push(ResolutionWarning::InvalidCoordinate {
                port_id: raw.id.clone(),
            });
            None
        }
        None => None,
    };

    Port {
        id: raw.id.clone(),
        name: raw.name.clone(),
        coordinate,
        island,
        aircraft_capacity: raw.aircraft_capacity,
        aircraft_capacity_max: raw.aircraft_capacity_max,
    }
}
