//! Neo4j HTTP adapter for the graph store.
//!
//! Statements go through the transactional Cypher endpoint in a single
//! auto-commit request. Rows come back as positional JSON arrays and are
//! decoded into tuples, then into the raw domain records.
//!
//! Schema: `(:Port)-[:RELIE_A {distance}]->(:Port)`, ports attached to an
//! `(:Ile)`, and `(:Hydravion {etat})-[:EST_AU_PORT]->(:Port)`. Names are
//! stored under `nom`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;
use crate::model::{AircraftState, AircraftStatus, Coordinate, Edge, Island, IslandRef, RawPort};
use crate::traits::GraphSource;

// Islands hang off ports through either `SITUE_SUR` or `SE_TROUVE_SUR`,
// depending on which loader created the relationship.
const PORTS_QUERY: &str = "\
MATCH (p:Port)
OPTIONAL MATCH (p)-[:SITUE_SUR|SE_TROUVE_SUR]->(i:Ile)
WITH p, head(collect(i)) AS i
RETURN p.id, p.nom, p.latitude, p.longitude, i.id, i.nom,
       p.capaciteHydravions, p.capaciteHydravionsMax
ORDER BY p.id";

const EDGES_QUERY: &str = "\
MATCH (a:Port)-[r:RELIE_A]->(b:Port)
RETURN a.id, b.id, r.distance, r.dureeMinutes
ORDER BY a.id, b.id";

const AIRCRAFT_QUERY: &str = "\
MATCH (h:Hydravion)
OPTIONAL MATCH (h)-[:EST_AU_PORT]->(p:Port)
WITH h, head(collect(p)) AS p
RETURN h.id, h.etat, p.id, h.latitude, h.longitude
ORDER BY h.id";

#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    pub base_url: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7474".to_string(),
            database: "neo4j".to_string(),
            user: "neo4j".to_string(),
            password: "neo4j".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Neo4jClient {
    config: Neo4jConfig,
    client: reqwest::blocking::Client,
}

impl Neo4jClient {
    pub fn new(config: Neo4jConfig) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub(crate) fn commit_url(&self) -> String {
        format!(
            "{}/db/{}/tx/commit",
            self.config.base_url.trim_end_matches('/'),
            self.config.database
        )
    }

    /// Runs one statement and decodes every row into `T`.
    pub fn query<T: DeserializeOwned>(
        &self,
        statement: &str,
        parameters: Value,
    ) -> Result<Vec<T>, StoreError> {
        let body = TxRequest {
            statements: vec![Statement {
                statement,
                parameters,
            }],
        };

        let response = self
            .client
            .post(self.commit_url())
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&body)
            .send()?
            .error_for_status()?
            .json::<TxResponse>()?;

        decode_rows(response)
    }

    /// Runs a write statement, discarding any rows. Used to seed fixtures.
    pub fn execute(&self, statement: &str, parameters: Value) -> Result<(), StoreError> {
        self.query::<Value>(statement, parameters).map(|_| ())
    }
}

impl GraphSource for Neo4jClient {
    fn ports(&self) -> Result<Vec<RawPort>, StoreError> {
        let rows: Vec<PortRow> = self.query(PORTS_QUERY, Value::Null)?;
        Ok(rows.into_iter().map(port_from_row).collect())
    }

    fn edges(&self) -> Result<Vec<Edge>, StoreError> {
        let rows: Vec<EdgeRow> = self.query(EDGES_QUERY, Value::Null)?;
        Ok(rows.into_iter().map(edge_from_row).collect())
    }

    fn aircraft_states(&self) -> Result<Vec<AircraftState>, StoreError> {
        let rows: Vec<AircraftRow> = self.query(AIRCRAFT_QUERY, Value::Null)?;
        Ok(rows.into_iter().map(state_from_row).collect())
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
struct TxRequest<'a> {
    statements: Vec<Statement<'a>>,
}

#[derive(Debug, Serialize)]
struct Statement<'a> {
    statement: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    row: Value,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

fn decode_rows<T: DeserializeOwned>(response: TxResponse) -> Result<Vec<T>, StoreError> {
    if let Some(error) = response.errors.into_iter().next() {
        return Err(StoreError::Query {
            code: error.code,
            message: error.message,
        });
    }

    response
        .results
        .into_iter()
        .flat_map(|result| result.data)
        .map(|data| serde_json::from_value(data.row).map_err(StoreError::from))
        .collect()
}

// ============================================================================
// Row decoding
// ============================================================================

type PortRow = (
    String,
    Option<String>,
    Option<f64>,
    Option<f64>,
    Option<String>,
    Option<String>,
    Option<u32>,
    Option<u32>,
);

type EdgeRow = (String, String, Option<f64>, Option<f64>);

type AircraftRow = (String, Option<String>, Option<String>, Option<f64>, Option<f64>);

fn coordinate(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinate> {
    Some(Coordinate {
        latitude: latitude?,
        longitude: longitude?,
    })
}

fn port_from_row(row: PortRow) -> RawPort {
    let (id, name, latitude, longitude, island_id, island_name, capacity, capacity_max) = row;

    // An island node without a name still carries its id; the resolver
    // looks the name up in the document store.
    let island = match (island_id, island_name) {
        (Some(id), Some(name)) => Some(IslandRef::Embedded(Island { id, name })),
        (Some(id), None) => Some(IslandRef::Id(id)),
        (None, _) => None,
    };

    RawPort {
        id,
        name: name.unwrap_or_default(),
        coordinate: coordinate(latitude, longitude),
        island,
        aircraft_capacity: capacity.unwrap_or(0),
        aircraft_capacity_max: capacity_max.unwrap_or(0),
    }
}

fn edge_from_row(row: EdgeRow) -> Edge {
    let (from_port_id, to_port_id, distance_km, duration_minutes) = row;
    Edge {
        from_port_id,
        to_port_id,
        distance_km,
        duration_minutes,
    }
}

fn state_from_row(row: AircraftRow) -> AircraftState {
    let (id, status, port_id, latitude, longitude) = row;
    AircraftState {
        id,
        status: status
            .as_deref()
            .map_or(AircraftStatus::Unknown, AircraftStatus::parse),
        current_port_id: port_id,
        current_coordinate: coordinate(latitude, longitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(rows: Vec<Value>) -> TxResponse {
        let data: Vec<Value> = rows.into_iter().map(|row| json!({ "row": row })).collect();
        serde_json::from_value(json!({
            "results": [{ "columns": [], "data": data }],
            "errors": []
        }))
        .unwrap()
    }

    #[test]
    fn test_decodes_port_rows() {
        let rows: Vec<PortRow> = decode_rows(response(vec![
            json!(["p1", "Puerto Ayora", -0.74, -90.31, "isl-1", "Santa Cruz", 2, 5]),
            json!(["p2", "Villamil", null, -90.96, "isl-2", null, null, null]),
        ]))
        .unwrap();
        let ports: Vec<RawPort> = rows.into_iter().map(port_from_row).collect();

        assert_eq!(ports[0].name, "Puerto Ayora");
        assert!(ports[0].coordinate.is_some());
        assert!(matches!(ports[0].island, Some(IslandRef::Embedded(_))));
        assert_eq!(ports[0].aircraft_capacity_max, 5);

        assert_eq!(ports[1].coordinate, None);
        assert_eq!(ports[1].island, Some(IslandRef::Id("isl-2".to_string())));
        assert_eq!(ports[1].aircraft_capacity, 0);
    }

    #[test]
    fn test_decodes_edge_rows_with_null_distance() {
        let rows: Vec<EdgeRow> = decode_rows(response(vec![
            json!(["p1", "p2", 78.5, null]),
            json!(["p2", "p3", null, null]),
        ]))
        .unwrap();
        let edges: Vec<Edge> = rows.into_iter().map(edge_from_row).collect();
        assert_eq!(edges[0].distance_km, Some(78.5));
        assert_eq!(edges[1].usable_distance(), None);
    }

    #[test]
    fn test_decodes_aircraft_rows() {
        let rows: Vec<AircraftRow> = decode_rows(response(vec![
            json!(["h1", "PORT", "p1", null, null]),
            json!(["h2", "EN_VOL", null, -0.5, -90.5]),
            json!(["h3", "ENTREPOT", "depot", null, null]),
            json!(["h4", null, null, null, null]),
        ]))
        .unwrap();
        let states: Vec<AircraftState> = rows.into_iter().map(state_from_row).collect();
        assert_eq!(states[0].status, AircraftStatus::AtPort);
        assert_eq!(states[0].current_port_id.as_deref(), Some("p1"));
        assert_eq!(states[1].status, AircraftStatus::InFlight);
        assert!(states[1].current_coordinate.is_some());
        assert_eq!(states[2].status, AircraftStatus::AtDepot);
        assert_eq!(states[3].status, AircraftStatus::Unknown);
    }

    #[test]
    fn test_statement_error_surfaces() {
        let response: TxResponse = serde_json::from_value(json!({
            "results": [],
            "errors": [{
                "code": "Neo.ClientError.Statement.SyntaxError",
                "message": "Invalid input"
            }]
        }))
        .unwrap();
        let err = decode_rows::<Value>(response).unwrap_err();
        assert!(matches!(err, StoreError::Query { ref code, .. } if code.ends_with("SyntaxError")));
    }

    #[test]
    fn test_commit_url() {
        let client = Neo4jClient::new(Neo4jConfig {
            base_url: "http://graph:7474/".to_string(),
            ..Neo4jConfig::default()
        })
        .unwrap();
        assert_eq!(client.commit_url(), "http://graph:7474/db/neo4j/tx/commit");
    }
}
