//! In-memory port graph built from a store snapshot.
//!
//! Edges are keyed by the unordered port pair so lookups are
//! direction-agnostic. When no usable edge exists for a pair, distances fall
//! back to great-circle geometry over the two port coordinates.

use std::collections::HashMap;

use tracing::debug;

use crate::error::RoutingError;
use crate::geometry::haversine_km;
use crate::model::{Coordinate, Edge, Port, PortId};

/// Ports plus direct inter-port edges for one routing request.
#[derive(Debug, Clone, Default)]
pub struct PortGraph {
    ports: HashMap<PortId, Port>,
    /// Port ids in first-seen input order.
    order: Vec<PortId>,
    edges: HashMap<(PortId, PortId), Edge>,
}

impl PortGraph {
    /// Builds the graph from resolved ports and raw edges.
    ///
    /// Duplicates are last-write-wins in input order: a port id seen twice
    /// keeps its first position but the later record, and an unordered pair
    /// seen twice (both directions or repeated rows) keeps the later edge.
    /// Edges without a usable distance are ignored.
    pub fn build(ports: Vec<Port>, edges: Vec<Edge>) -> Self {
        let mut graph = Self::default();

        for port in ports {
            if !graph.ports.contains_key(&port.id) {
                graph.order.push(port.id.clone());
            }
            graph.ports.insert(port.id.clone(), port);
        }

        for edge in edges {
            if edge.usable_distance().is_none() {
                debug!(
                    from = %edge.from_port_id,
                    to = %edge.to_port_id,
                    "ignoring edge without usable distance"
                );
                continue;
            }
            if edge.from_port_id == edge.to_port_id {
                continue;
            }
            let key = pair_key(&edge.from_port_id, &edge.to_port_id);
            graph.edges.insert(key, edge);
        }

        graph
    }

    pub fn port_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn port(&self, id: &str) -> Result<&Port, RoutingError> {
        self.ports
            .get(id)
            .ok_or_else(|| RoutingError::UnknownPort(id.to_string()))
    }

    /// Ports in first-seen input order.
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.order.iter().filter_map(|id| self.ports.get(id))
    }

    /// The stored edge for this pair, in either direction.
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
        self.edges.get(&pair_key(a, b))
    }

    /// Travel distance in kilometers.
    ///
    /// Returns 0 for identical ids, the edge distance when an edge exists,
    /// otherwise the haversine distance between the two ports. Fails with
    /// `NoDistanceAvailable` when there is no edge and a coordinate is
    /// missing.
    pub fn distance_between(&self, a: &str, b: &str) -> Result<f64, RoutingError> {
        if a == b {
            return Ok(0.0);
        }
        let from = self.port(a)?;
        let to = self.port(b)?;

        if let Some(distance) = self.edge_between(a, b).and_then(Edge::usable_distance) {
            return Ok(distance);
        }

        match (from.coordinate, to.coordinate) {
            (Some(from_coord), Some(to_coord)) => haversine_km(from_coord, to_coord),
            _ => Err(RoutingError::NoDistanceAvailable {
                from: a.to_string(),
                to: b.to_string(),
            }),
        }
    }

    /// Edge travel time in minutes, when the graph records one.
    pub fn duration_between(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(0.0);
        }
        self.edge_between(a, b)
            .and_then(|edge| edge.duration_minutes)
            .filter(|minutes| minutes.is_finite() && *minutes >= 0.0)
    }

    /// Closest port with a known position, with its distance in kilometers.
    /// Ties go to the port seen first.
    pub fn nearest_port(&self, coordinate: Coordinate) -> Option<(&Port, f64)> {
        let mut best: Option<(&Port, f64)> = None;
        for (port, distance) in self.distances_from(coordinate) {
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((port, distance));
            }
        }
        best
    }

    /// Ports within `radius_km` of `coordinate`, closest first.
    pub fn ports_within(&self, coordinate: Coordinate, radius_km: f64) -> Vec<(&Port, f64)> {
        let mut within: Vec<(&Port, f64)> = self
            .distances_from(coordinate)
            .filter(|(_, distance)| *distance <= radius_km)
            .collect();
        // Stable sort keeps input order for equal distances.
        within.sort_by(|a, b| a.1.total_cmp(&b.1));
        within
    }

    fn distances_from(&self, coordinate: Coordinate) -> impl Iterator<Item = (&Port, f64)> {
        self.ports().filter_map(move |port| {
            let position = port.coordinate?;
            haversine_km(coordinate, position)
                .ok()
                .map(|distance| (port, distance))
        })
    }
}

fn pair_key(a: &str, b: &str) -> (PortId, PortId) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(id: &str, position: Option<(f64, f64)>) -> Port {
        Port {
            id: id.to_string(),
            name: id.to_uppercase(),
            coordinate: position.map(|(latitude, longitude)| Coordinate {
                latitude,
                longitude,
            }),
            island: None,
            aircraft_capacity: 0,
            aircraft_capacity_max: 4,
        }
    }

    #[test]
    fn test_same_port_is_zero() {
        let graph = PortGraph::build(vec![port("a", Some((0.0, 0.0)))], vec![]);
        assert_eq!(graph.distance_between("a", "a").unwrap(), 0.0);
    }

    #[test]
    fn test_edge_lookup_is_direction_agnostic() {
        let graph = PortGraph::build(
            vec![port("a", None), port("b", None)],
            vec![Edge::new("a", "b", 42.0)],
        );
        assert_eq!(graph.distance_between("a", "b").unwrap(), 42.0);
        assert_eq!(graph.distance_between("b", "a").unwrap(), 42.0);
    }

    #[test]
    fn test_edge_takes_precedence_over_geometry() {
        // Haversine here is ~48km.
        let graph = PortGraph::build(
            vec![port("d", Some((0.0, 0.0))), port("a", Some((0.0, 0.4317)))],
            vec![Edge::new("d", "a", 50.0)],
        );
        let geometric = haversine_km(
            Coordinate { latitude: 0.0, longitude: 0.0 },
            Coordinate { latitude: 0.0, longitude: 0.4317 },
        )
        .unwrap();
        assert!((geometric - 48.0).abs() < 0.1);
        assert_eq!(graph.distance_between("d", "a").unwrap(), 50.0);
    }

    #[test]
    fn test_falls_back_to_geometry() {
        let graph = PortGraph::build(
            vec![port("a", Some((0.0, 0.0))), port("b", Some((0.0, 1.0)))],
            vec![],
        );
        assert_eq!(graph.distance_between("a", "b").unwrap(), 111.19);
    }

    #[test]
    fn test_missing_coordinate_without_edge() {
        let graph = PortGraph::build(
            vec![port("a", Some((0.0, 0.0))), port("b", None)],
            vec![],
        );
        let err = graph.distance_between("a", "b").unwrap_err();
        assert!(matches!(err, RoutingError::NoDistanceAvailable { .. }));
    }

    #[test]
    fn test_unknown_port() {
        let graph = PortGraph::build(vec![port("a", Some((0.0, 0.0)))], vec![]);
        assert_eq!(
            graph.distance_between("a", "zz").unwrap_err(),
            RoutingError::UnknownPort("zz".to_string())
        );
        assert!(graph.port("zz").is_err());
    }

    #[test]
    fn test_duplicate_pair_last_write_wins() {
        let graph = PortGraph::build(
            vec![port("a", None), port("b", None)],
            vec![Edge::new("a", "b", 10.0), Edge::new("b", "a", 12.0)],
        );
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.distance_between("a", "b").unwrap(), 12.0);
    }

    #[test]
    fn test_edge_without_distance_is_ignored() {
        let mut broken = Edge::new("a", "b", 0.0);
        broken.distance_km = None;
        let graph = PortGraph::build(
            vec![port("a", Some((0.0, 0.0))), port("b", Some((0.0, 1.0)))],
            vec![Edge::new("a", "b", 30.0), broken],
        );
        // The later, unusable row does not clobber the earlier edge.
        assert_eq!(graph.distance_between("a", "b").unwrap(), 30.0);
    }

    #[test]
    fn test_duration_between() {
        let graph = PortGraph::build(
            vec![port("a", None), port("b", None), port("c", None)],
            vec![Edge::new("a", "b", 30.0).with_duration(18.0)],
        );
        assert_eq!(graph.duration_between("b", "a"), Some(18.0));
        assert_eq!(graph.duration_between("a", "c"), None);
    }

    #[test]
    fn test_ports_keep_input_order() {
        let graph = PortGraph::build(
            vec![port("c", None), port("a", None), port("b", None), port("a", None)],
            vec![],
        );
        let ids: Vec<&str> = graph.ports().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(graph.port_count(), 3);
    }

    #[test]
    fn test_nearest_and_within() {
        let graph = PortGraph::build(
            vec![
                port("far", Some((0.0, 2.0))),
                port("near", Some((0.0, 0.5))),
                port("ghost", None),
            ],
            vec![],
        );
        let here = Coordinate { latitude: 0.0, longitude: 0.0 };

        let (nearest, _) = graph.nearest_port(here).unwrap();
        assert_eq!(nearest.id, "near");

        let within: Vec<&str> = graph
            .ports_within(here, 300.0)
            .into_iter()
            .map(|(p, _)| p.id.as_str())
            .collect();
        assert_eq!(within, vec!["near", "far"]);
        assert_eq!(graph.ports_within(here, 100.0).len(), 1);
    }
}
