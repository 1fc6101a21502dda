//! Per-request orchestration around the routing core.
//!
//! Each call pulls fresh snapshots from both stores concurrently, resolves
//! them into a consistent view and hands that to the pure routing functions.
//! Nothing is cached between calls.

use tracing::{debug, info};

use crate::capacity::{target_ports, validate_capacity, validate_fuel};
use crate::config::RouterConfig;
use crate::documents::JsonDocumentStore;
use crate::error::{PlanError, RoutingError, StoreError};
use crate::graph::PortGraph;
use crate::model::{
    Aircraft, AircraftSpec, AircraftState, DeliveryRequest, Edge, Island, Itinerary, Port,
    PortId, Position, RawPort,
};
use crate::neo4j::Neo4jClient;
use crate::resolver::{resolve_aircraft, resolve_ports, Resolution};
use crate::solver::{compute_itinerary_with, SolveOptions};
use crate::traits::{DocumentSource, GraphSource};

/// Raw data from both stores, fetched for one request.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub ports: Vec<RawPort>,
    pub edges: Vec<Edge>,
    pub states: Vec<AircraftState>,
    pub specs: Vec<AircraftSpec>,
    pub islands: Vec<Island>,
}

impl Snapshot {
    pub fn fleet(&self) -> Resolution<Aircraft> {
        resolve_aircraft(&self.specs, &self.states)
    }

    pub fn port_graph(&self) -> PortGraph {
        let ports = resolve_ports(&self.ports, &self.islands);
        PortGraph::build(ports.resolved, self.edges.clone())
    }
}

pub struct ItineraryService<G, D> {
    graph_source: G,
    documents: D,
    depot_id: PortId,
    options: SolveOptions,
}

impl ItineraryService<Neo4jClient, JsonDocumentStore> {
    /// Wires the production adapters: Neo4j over HTTP for the graph and
    /// the JSON dataset directory for documents.
    pub fn from_config(config: &RouterConfig) -> Result<Self, StoreError> {
        let graph_source = Neo4jClient::new(config.graph.clone())?;
        let documents = JsonDocumentStore::open(config.documents_dir.clone());
        Ok(Self::new(graph_source, documents, config))
    }
}

impl<G, D> ItineraryService<G, D>
where
    G: GraphSource + Sync,
    D: DocumentSource + Sync,
{
    pub fn new(graph_source: G, documents: D, config: &RouterConfig) -> Self {
        Self {
            graph_source,
            documents,
            depot_id: config.depot_id.clone(),
            options: config.solve_options(),
        }
    }

    pub fn depot_id(&self) -> &str {
        &self.depot_id
    }

    /// Fetches every collection the core needs. The reads are independent,
    /// so they run in parallel.
    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let (graph_side, document_side) = rayon::join(
            || {
                let ((ports, edges), states) = rayon::join(
                    || rayon::join(|| self.graph_source.ports(), || self.graph_source.edges()),
                    || self.graph_source.aircraft_states(),
                );
                Ok::<_, StoreError>((ports?, edges?, states?))
            },
            || {
                let (specs, islands) = rayon::join(
                    || self.documents.aircraft_specs(),
                    || self.documents.islands(),
                );
                Ok::<_, StoreError>((specs?, islands?))
            },
        );

        let (ports, edges, states) = graph_side?;
        let (specs, islands) = document_side?;

        debug!(
            ports = ports.len(),
            edges = edges.len(),
            aircraft = specs.len(),
            "snapshot fetched"
        );

        Ok(Snapshot {
            ports,
            edges,
            states,
            specs,
            islands,
        })
    }

    /// Plans a depot-to-depot itinerary for one aircraft and its batch.
    ///
    /// Capacity is checked before any routing. The finished itinerary is
    /// rejected if it needs more fuel than the aircraft carries.
    pub fn plan(
        &self,
        aircraft_id: &str,
        requests: &[DeliveryRequest],
    ) -> Result<Itinerary, PlanError> {
        let snapshot = self.snapshot()?;
        let aircraft = find_aircraft(snapshot.fleet(), aircraft_id)?;

        validate_capacity(&aircraft, requests)?;

        let graph = snapshot.port_graph();
        debug!(
            ports = graph.port_count(),
            edges = graph.edge_count(),
            depot_id = %self.depot_id(),
            "port graph built"
        );
        let targets = target_ports(requests);
        let itinerary =
            compute_itinerary_with(&graph, &self.depot_id, &targets, &aircraft, &self.options)?;

        validate_fuel(&aircraft, &itinerary)?;

        info!(
            aircraft_id = %aircraft_id,
            stops = itinerary.ordered_ports.len(),
            total_distance_km = itinerary.total_distance_km,
            fuel_required = itinerary.fuel_required,
            "itinerary planned"
        );
        Ok(itinerary)
    }

    /// Aircraft docked at a port or the depot, in spec order.
    pub fn available_aircraft(&self) -> Result<Vec<Aircraft>, PlanError> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .fleet()
            .resolved
            .into_iter()
            .filter(Aircraft::is_available)
            .collect())
    }

    /// The port an aircraft is at, or the closest port to an airborne
    /// aircraft, with the distance to it. `None` when the position is
    /// unknown or no port has a position.
    pub fn locate(&self, aircraft_id: &str) -> Result<Option<(Port, f64)>, PlanError> {
        let snapshot = self.snapshot()?;
        let aircraft = find_aircraft(snapshot.fleet(), aircraft_id)?;
        let graph = snapshot.port_graph();

        let located = match &aircraft.position {
            Position::Docked(port_id) => Some((graph.port(port_id)?.clone(), 0.0)),
            Position::Airborne(coordinate) => graph
                .nearest_port(*coordinate)
                .map(|(port, distance)| (port.clone(), distance)),
            Position::Unknown => None,
        };
        Ok(located)
    }
}

fn find_aircraft(fleet: Resolution<Aircraft>, aircraft_id: &str) -> Result<Aircraft, RoutingError> {
    fleet
        .resolved
        .into_iter()
        .find(|aircraft| aircraft.id() == aircraft_id)
        .ok_or_else(|| RoutingError::AircraftUnresolvable(aircraft_id.to_string()))
}
