//! Domain records for the seaplane network.
//!
//! Raw records (`RawPort`, `AircraftState`) mirror what the stores return and
//! may be incomplete or inconsistent. Resolved records (`Port`, `Aircraft`)
//! are produced by [`crate::resolver`] and uphold their invariants.

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// Port identifier as stored in both stores.
pub type PortId = String;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, RoutingError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(RoutingError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Island {
    pub id: String,
    #[serde(alias = "nom")]
    pub name: String,
}

/// Island reference on a raw port: either an id or the embedded record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IslandRef {
    Id(String),
    Embedded(Island),
}

/// Port record as read from a store, before island lookup and validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPort {
    pub id: PortId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub island: Option<IslandRef>,
    #[serde(default)]
    pub aircraft_capacity: u32,
    #[serde(default)]
    pub aircraft_capacity_max: u32,
}

/// A resolved port. `coordinate` is `None` when the record carried no
/// usable position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub id: PortId,
    pub name: String,
    pub coordinate: Option<Coordinate>,
    pub island: Option<Island>,
    pub aircraft_capacity: u32,
    pub aircraft_capacity_max: u32,
}

/// Direct connection between two ports as stored in the graph.
///
/// Stored with a direction, but routing treats it as undirected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from_port_id: PortId,
    pub to_port_id: PortId,
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
}

impl Edge {
    pub fn new(from: impl Into<PortId>, to: impl Into<PortId>, distance_km: f64) -> Self {
        Self {
            from_port_id: from.into(),
            to_port_id: to.into(),
            distance_km: Some(distance_km),
            duration_minutes: None,
        }
    }

    pub fn with_duration(mut self, minutes: f64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// The distance, if present and usable for routing.
    pub fn usable_distance(&self) -> Option<f64> {
        self.distance_km.filter(|d| d.is_finite() && *d >= 0.0)
    }
}

/// Static aircraft data held by the document store.
///
/// Accepts both the camelCase names and the keys of the fleet collection
/// (`modele`, `capaciteMax`, `niveauCarburantMax`, `consommationKm`).
/// Live fields stored next to them (`etat`, `positionPortId`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftSpec {
    pub id: String,
    #[serde(alias = "modele")]
    pub model: String,
    /// Maximum number of crates carried per trip.
    #[serde(alias = "capaciteMax")]
    pub payload_capacity: u32,
    #[serde(alias = "niveauCarburantMax")]
    pub fuel_capacity: f64,
    #[serde(alias = "consommationKm")]
    pub consumption_per_km: f64,
}

impl AircraftSpec {
    /// Fuel figures must be finite and non-negative to price a route.
    pub fn has_usable_fuel_figures(&self) -> bool {
        self.fuel_capacity.is_finite()
            && self.fuel_capacity >= 0.0
            && self.consumption_per_km.is_finite()
            && self.consumption_per_km >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AircraftStatus {
    AtPort,
    InFlight,
    AtDepot,
    Maintenance,
    Unknown,
}

impl AircraftStatus {
    /// Maps a stored status label. Unrecognised labels become `Unknown`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "AT_PORT" | "PORT" => Self::AtPort,
            "AT_DEPOT" | "DEPOT" | "ENTREPOT" => Self::AtDepot,
            "IN_FLIGHT" | "FLYING" | "EN_VOL" => Self::InFlight,
            "MAINTENANCE" => Self::Maintenance,
            _ => Self::Unknown,
        }
    }
}

/// Dynamic aircraft data held by the graph store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftState {
    pub id: String,
    pub status: AircraftStatus,
    #[serde(default)]
    pub current_port_id: Option<PortId>,
    #[serde(default)]
    pub current_coordinate: Option<Coordinate>,
}

/// Where a resolved aircraft is. At most one kind of location is ever set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Position {
    Docked(PortId),
    Airborne(Coordinate),
    Unknown,
}

/// Spec and state merged into one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub spec: AircraftSpec,
    pub status: AircraftStatus,
    pub position: Position,
}

impl Aircraft {
    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn payload_capacity(&self) -> u32 {
        self.spec.payload_capacity
    }

    pub fn consumption_per_km(&self) -> f64 {
        self.spec.consumption_per_km
    }

    /// Fuel burnt flying `distance_km`.
    pub fn fuel_for(&self, distance_km: f64) -> f64 {
        distance_km * self.spec.consumption_per_km
    }

    /// Docked at a port or the depot and ready to be dispatched.
    pub fn is_available(&self) -> bool {
        matches!(self.status, AircraftStatus::AtPort | AircraftStatus::AtDepot)
    }

    pub fn current_port_id(&self) -> Option<&str> {
        match &self.position {
            Position::Docked(port_id) => Some(port_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    pub destination_port_id: PortId,
    pub crate_count: u32,
}

impl DeliveryRequest {
    pub fn new(destination_port_id: impl Into<PortId>, crate_count: u32) -> Self {
        Self {
            destination_port_id: destination_port_id.into(),
            crate_count,
        }
    }
}

/// Computed visit order with distance and fuel totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Starts and ends at the depot (a single depot entry when empty).
    pub ordered_ports: Vec<Port>,
    pub total_distance_km: f64,
    pub fuel_required: f64,
    /// One entry per flown leg, in visit order.
    pub leg_distances: Vec<f64>,
    /// Legs priced with the unreachable sentinel distance.
    pub unresolved_legs: Vec<(PortId, PortId)>,
}

impl Itinerary {
    pub fn port_ids(&self) -> Vec<&str> {
        self.ordered_ports.iter().map(|port| port.id.as_str()).collect()
    }

    /// True when every leg was priced from an edge or from geometry.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved_legs.is_empty()
    }

    /// Distance over the legs priced from an edge or from geometry, leaving
    /// out sentinel legs.
    pub fn resolved_distance_km(&self) -> f64 {
        self.ordered_ports
            .windows(2)
            .zip(&self.leg_distances)
            .filter(|(pair, _)| {
                !self
                    .unresolved_legs
                    .iter()
                    .any(|(from, to)| *from == pair[0].id && *to == pair[1].id)
            })
            .map(|(_, distance)| *distance)
            .sum()
    }
}
