//! Galapagos harbours used as a realistic port network.
//!
//! Positions are approximate harbour locations; edge distances are rounded
//! flight distances and deliberately stored in one direction only.

use seaplane_router::model::{Edge, Island};

#[derive(Debug, Clone)]
pub struct Harbour {
    pub id: &'static str,
    pub name: &'static str,
    pub island_id: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Harbour {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        island_id: &'static str,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            id,
            name,
            island_id,
            lat,
            lng,
        }
    }
}

pub const DEPOT: &str = "depot";

pub const HARBOURS: &[Harbour] = &[
    Harbour::new(DEPOT, "Baltra", "isl-baltra", -0.4538, -90.2659),
    Harbour::new("ayora", "Puerto Ayora", "isl-santa-cruz", -0.7436, -90.3133),
    Harbour::new("baquerizo", "Puerto Baquerizo Moreno", "isl-san-cristobal", -0.9020, -89.6100),
    Harbour::new("villamil", "Puerto Villamil", "isl-isabela", -0.9566, -90.9660),
    Harbour::new("velasco", "Puerto Velasco Ibarra", "isl-floreana", -1.2747, -90.4870),
];

pub fn galapagos_islands() -> Vec<Island> {
    [
        ("isl-baltra", "Baltra"),
        ("isl-santa-cruz", "Santa Cruz"),
        ("isl-san-cristobal", "San Cristobal"),
        ("isl-isabela", "Isabela"),
        ("isl-floreana", "Floreana"),
    ]
    .iter()
    .map(|(id, name)| Island {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

pub fn galapagos_edges() -> Vec<Edge> {
    vec![
        Edge::new(DEPOT, "ayora", 33.0).with_duration(14.0),
        Edge::new("baquerizo", DEPOT, 91.0).with_duration(35.0),
        Edge::new("ayora", "baquerizo", 79.0),
        Edge::new("villamil", "ayora", 76.0),
    ]
}
