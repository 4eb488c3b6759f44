//! In-memory collector for decoded zones.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::array::Array2;
use crate::data::FieldArray;
use crate::reader::{MeshZone, ZoneSink};
use crate::types::FileHeader;

/// One committed quadrilateral zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub index: usize,
    pub name: String,
    pub xyz: FieldArray,
    pub nodal_results: FieldArray,
    pub quads: Array2<i32>,
}

impl Zone {
    pub fn nnodes(&self) -> usize {
        self.xyz.shape().0
    }

    pub fn nelements(&self) -> usize {
        self.quads.rows()
    }
}

/// Title, variables and every committed zone of one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TecplotModel {
    pub title: String,
    pub variables: Vec<String>,
    pub zones: Vec<Zone>,
}

impl TecplotModel {
    /// Names of the nodal result columns (everything after x, y, z).
    pub fn result_names(&self) -> &[String] {
        self.variables.get(3..).unwrap_or(&[])
    }

    /// Values of result `name` (case-insensitive) for zone `zone`.
    pub fn result(&self, zone: usize, name: &str) -> Option<Vec<f64>> {
        let col = self
            .result_names()
            .iter()
            .position(|v| v.eq_ignore_ascii_case(name))?;
        let zone = self.zones.get(zone)?;
        Some(zone.nodal_results.to_f64().column(col))
    }

    pub fn total_nodes(&self) -> usize {
        self.zones.iter().map(Zone::nnodes).sum()
    }

    pub fn total_elements(&self) -> usize {
        self.zones.iter().map(Zone::nelements).sum()
    }
}

impl ZoneSink for TecplotModel {
    fn commit_zone(&mut self, header: &FileHeader, zone: MeshZone) {
        self.title.clone_from(&header.title);
        self.variables.clone_from(&header.variable_names);
        debug!(zone = zone.index, name = %zone.name, "zone committed");
        self.zones.push(Zone {
            index: zone.index,
            name: zone.name,
            xyz: zone.xyz,
            nodal_results: zone.nodal_results,
            quads: zone.connectivity,
        });
    }
}
