//! Payload and fuel checks around the optimizer.
//!
//! Payload is checked before any route is computed; an over-capacity batch
//! never produces a partial itinerary. Fuel can only be checked once the
//! itinerary distance is known, and only over legs with real distance data.

use crate::error::RoutingError;
use crate::model::{Aircraft, DeliveryRequest, Itinerary, PortId};

/// Total crates in a delivery batch.
pub fn total_crates(requests: &[DeliveryRequest]) -> u64 {
    requests.iter().map(|r| u64::from(r.crate_count)).sum()
}

/// Rejects a batch whose crate count exceeds the aircraft payload capacity.
/// A batch that fills the aircraft exactly is accepted.
pub fn validate_capacity(
    aircraft: &Aircraft,
    requests: &[DeliveryRequest],
) -> Result<(), RoutingError> {
    let used = total_crates(requests);
    let max = u64::from(aircraft.payload_capacity());
    if used > max {
        return Err(RoutingError::CapacityExceeded { used, max });
    }
    Ok(())
}

/// Destination ports of a batch, deduplicated in first-seen order.
pub fn target_ports(requests: &[DeliveryRequest]) -> Vec<PortId> {
    let mut targets: Vec<PortId> = Vec::with_capacity(requests.len());
    for request in requests {
        if !targets.contains(&request.destination_port_id) {
            targets.push(request.destination_port_id.clone());
        }
    }
    targets
}

/// Rejects an itinerary that burns more fuel than the aircraft can carry.
///
/// Sentinel legs carry no real distance, so they are left out of the check;
/// such an itinerary is accepted as long as its priced legs fit the tank.
pub fn validate_fuel(aircraft: &Aircraft, itinerary: &Itinerary) -> Result<(), RoutingError> {
    let capacity = aircraft.spec.fuel_capacity;
    let required = if itinerary.is_fully_resolved() {
        itinerary.fuel_required
    } else {
        aircraft.fuel_for(itinerary.resolved_distance_km())
    };
    if required > capacity {
        return Err(RoutingError::FuelExceeded { required, capacity });
    }
    Ok(())
}
