//! Router configuration.

use std::path::PathBuf;

use crate::model::PortId;
use crate::neo4j::Neo4jConfig;
use crate::solver::{SolveOptions, UNREACHABLE_DISTANCE_KM};

/// Well-known id of the depot port.
pub const DEFAULT_DEPOT_ID: &str = "depot";

#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Start and end of every itinerary.
    pub depot_id: PortId,
    pub unreachable_distance_km: f64,
    pub graph: Neo4jConfig,
    /// Dataset directory for [`crate::documents::JsonDocumentStore`].
    pub documents_dir: PathBuf,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            depot_id: DEFAULT_DEPOT_ID.to_string(),
            unreachable_distance_km: UNREACHABLE_DISTANCE_KM,
            graph: Neo4jConfig::default(),
            documents_dir: PathBuf::from("datasets"),
        }
    }
}

impl RouterConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults overlaid with whatever `lookup` returns.
    /// Blank values are ignored; unparseable numbers keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(v) = get("DEPOT_PORT_ID") {
            config.depot_id = v;
        }
        if let Some(v) = get("UNREACHABLE_DISTANCE_KM").and_then(|v| v.parse::<f64>().ok()) {
            if v.is_finite() && v > 0.0 {
                config.unreachable_distance_km = v;
            }
        }
        if let Some(v) = get("NEO4J_URL") {
            config.graph.base_url = v;
        }
        if let Some(v) = get("NEO4J_DATABASE") {
            config.graph.database = v;
        }
        if let Some(v) = get("NEO4J_USER") {
            config.graph.user = v;
        }
        if let Some(v) = get("NEO4J_PASSWORD") {
            config.graph.password = v;
        }
        if let Some(v) = get("DOCUMENTS_DIR") {
            config.documents_dir = PathBuf::from(v);
        }

        config
    }

    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            unreachable_distance_km: self.unreachable_distance_km,
        }
    }
}
