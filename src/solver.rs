//! Itinerary optimizer (nearest-neighbor baseline).
//!
//! Starting at the depot, repeatedly fly to the closest unvisited target,
//! then return to the depot. O(n²) in the number of targets and fully
//! deterministic: ties go to the target listed first.

use tracing::{debug, warn};

use crate::error::RoutingError;
use crate::graph::PortGraph;
use crate::model::{Aircraft, Itinerary, PortId};

/// Distance charged for a leg when neither an edge nor both coordinates
/// are available. Large enough to push the leg last, finite so totals stay
/// comparable.
pub const UNREACHABLE_DISTANCE_KM: f64 = 1_000_000.0;

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Sentinel distance for legs with no distance data.
    pub unreachable_distance_km: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            unreachable_distance_km: UNREACHABLE_DISTANCE_KM,
        }
    }
}

/// Computes an itinerary with default options.
pub fn compute_itinerary(
    graph: &PortGraph,
    depot_id: &str,
    target_port_ids: &[PortId],
    aircraft: &Aircraft,
) -> Result<Itinerary, RoutingError> {
    compute_itinerary_with(graph, depot_id, target_port_ids, aircraft, &SolveOptions::default())
}

/// Computes a depot-to-depot itinerary visiting every target port once.
///
/// Duplicate targets and the depot itself are dropped from the target list.
/// Fails with `UnknownPort` before any routing if the depot or a target is
/// missing from the graph.
pub fn compute_itinerary_with(
    graph: &PortGraph,
    depot_id: &str,
    target_port_ids: &[PortId],
    aircraft: &Aircraft,
    options: &SolveOptions,
) -> Result<Itinerary, RoutingError> {
    graph.port(depot_id)?;

    let mut remaining: Vec<&str> = Vec::with_capacity(target_port_ids.len());
    for id in target_port_ids {
        if id == depot_id || remaining.contains(&id.as_str()) {
            continue;
        }
        graph.port(id)?;
        remaining.push(id.as_str());
    }

    let mut visited: Vec<&str> = vec![depot_id];
    let mut leg_distances = Vec::with_capacity(remaining.len() + 1);
    let mut unresolved_legs = Vec::new();
    let mut total_distance = 0.0;
    let mut current = depot_id;

    while !remaining.is_empty() {
        let mut best_index = 0;
        let mut best_leg: Option<Leg> = None;

        for (index, candidate) in remaining.iter().enumerate() {
            let leg = price_leg(graph, current, candidate, options)?;
            // Strict comparison keeps the first-listed target on ties.
            if best_leg.is_none_or(|best| leg.distance < best.distance) {
                best_index = index;
                best_leg = Some(leg);
            }
        }

        let next = remaining.remove(best_index);
        if let Some(leg) = best_leg {
            record_leg(current, next, leg, &mut leg_distances, &mut unresolved_legs);
            total_distance += leg.distance;
        }
        visited.push(next);
        current = next;
    }

    if current != depot_id {
        let leg = price_leg(graph, current, depot_id, options)?;
        record_leg(current, depot_id, leg, &mut leg_distances, &mut unresolved_legs);
        total_distance += leg.distance;
        visited.push(depot_id);
    }

    let ordered_ports = visited
        .iter()
        .map(|id| graph.port(id).cloned())
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        aircraft_id = %aircraft.id(),
        stops = ordered_ports.len(),
        total_distance_km = total_distance,
        "itinerary computed"
    );

    Ok(Itinerary {
        ordered_ports,
        total_distance_km: total_distance,
        fuel_required: aircraft.fuel_for(total_distance),
        leg_distances,
        unresolved_legs,
    })
}

#[derive(Debug, Clone, Copy)]
struct Leg {
    distance: f64,
    resolved: bool,
}

/// Prices a leg, substituting the sentinel when no distance data exists.
fn price_leg(
    graph: &PortGraph,
    from: &str,
    to: &str,
    options: &SolveOptions,
) -> Result<Leg, RoutingError> {
    match graph.distance_between(from, to) {
        Ok(distance) => Ok(Leg {
            distance,
            resolved: true,
        }),
        Err(RoutingError::NoDistanceAvailable { .. }) => Ok(Leg {
            distance: options.unreachable_distance_km,
            resolved: false,
        }),
        Err(err) => Err(err),
    }
}

fn record_leg(
    from: &str,
    to: &str,
    leg: Leg,
    leg_distances: &mut Vec<f64>,
    unresolved_legs: &mut Vec<(PortId, PortId)>,
) {
    if !leg.resolved {
        warn!(from = %from, to = %to, "no distance data for leg, using sentinel distance");
        unresolved_legs.push((from.to_string(), to.to_string()));
    }
    leg_distances.push(leg.distance);
}
