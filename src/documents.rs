//! Document-store snapshot read from a JSON dataset directory.
//!
//! The directory holds one JSON array per collection (`hydravions.json`,
//! `iles.json`), the same exports used to seed the document store. Records
//! keep their stored key names; see [`AircraftSpec`] and [`Island`].

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::model::{AircraftSpec, Island};
use crate::traits::DocumentSource;

pub const AIRCRAFT_FILE: &str = "hydravions.json";
pub const ISLANDS_FILE: &str = "iles.json";

#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    root: PathBuf,
}

impl JsonDocumentStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loads one collection. A missing file is an empty collection.
    fn collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.root.join(file);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }
}

impl DocumentSource for JsonDocumentStore {
    fn aircraft_specs(&self) -> Result<Vec<AircraftSpec>, StoreError> {
        self.collection(AIRCRAFT_FILE)
    }

    fn islands(&self) -> Result<Vec<Island>, StoreError> {
        self.collection(ISLANDS_FILE)
    }
}
