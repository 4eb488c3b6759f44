//! File-level decode driver and the hand-off to mesh assembly.

use std::fs;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::array::Array2;
use crate::cursor::ByteCursor;
use crate::data::{DecodedZone, FieldArray, read_zone_data};
use crate::error::{Result, TecplotError};
use crate::header::{HeaderSection, read_header};
use crate::model::TecplotModel;
use crate::options::DecodeOptions;
use crate::types::{FileHeader, ZoneDescriptor};

//  Collaborator seam

/// A decoded zone split into coordinates and results, ready for assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshZone {
    pub index: usize,
    pub name: String,
    /// `[node_count][3]`
    pub xyz: FieldArray,
    /// `[node_count][nvars - 3]`
    pub nodal_results: FieldArray,
    /// `[element_count][4]` zero-based quadrilateral node indices.
    pub connectivity: Array2<i32>,
    pub min_max: Vec<[f64; 2]>,
    pub passive: Option<Vec<bool>>,
}

impl MeshZone {
    fn new(index: usize, name: String, zone: DecodedZone) -> Self {
        let (xyz, nodal_results) = zone.field_values.split_columns(3);
        Self {
            index,
            name,
            xyz,
            nodal_results,
            connectivity: zone.connectivity,
            min_max: zone.min_max,
            passive: zone.passive,
        }
    }
}

/// Receives each zone once it has been fully decoded.
pub trait ZoneSink {
    fn commit_zone(&mut self, header: &FileHeader, zone: MeshZone);
}

impl<F: FnMut(&FileHeader, MeshZone)> ZoneSink for F {
    fn commit_zone(&mut self, header: &FileHeader, zone: MeshZone) {
        self(header, zone)
    }
}

//  Decode

/// Outcome of a complete decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeSummary {
    pub header: FileHeader,
    pub zones: Vec<ZoneDescriptor>,
    pub zones_committed: usize,
    /// Equals the stream length.
    pub bytes_read: u64,
}

/// Decode the Tecplot binary file at `path`, committing zones to `sink`.
pub fn read_tecplot_binary(
    path: &Path,
    options: &DecodeOptions,
    sink: &mut impl ZoneSink,
) -> Result<DecodeSummary> {
    info!(path = %path.display(), "reading tecplot binary");
    let file = fs::File::open(path)?;
    decode(BufReader::new(file), options, sink)
}

/// Decode into a [`TecplotModel`].
pub fn read_model(path: &Path, options: &DecodeOptions) -> Result<TecplotModel> {
    let mut model = TecplotModel::default();
    let summary = read_tecplot_binary(path, options, &mut model)?;
    model.title = summary.header.title;
    model.variables = summary.header.variable_names;
    Ok(model)
}

/// Decode a Tecplot binary stream.
///
/// Every zone is decoded, including excluded ones, so the cursor stays in
/// step with the file. The stream must end exactly after the last zone.
pub fn decode<R: Read + Seek>(
    reader: R,
    options: &DecodeOptions,
    sink: &mut impl ZoneSink,
) -> Result<DecodeSummary> {
    let mut cursor = ByteCursor::new(reader);

    let HeaderSection { header, zones } = read_header(&mut cursor, options)?;
    cursor.check_position()?;
    info!(
        title = %header.title,
        nvars = header.nvars(),
        nzones = zones.len(),
        "header decoded"
    );

    let mut zones_committed = 0;
    for (index, zone) in zones.iter().enumerate() {
        let decoded = read_zone_data(&mut cursor, index, zone, header.nvars())?;
        if options.is_excluded(index) {
            debug!(zone = index, name = %zone.name, "zone excluded");
            continue;
        }
        sink.commit_zone(&header, MeshZone::new(index, zone.name.clone(), decoded));
        zones_committed += 1;
    }

    let bytes_read = cursor.offset();
    let remaining = cursor.drain_remaining()?;
    if remaining > 0 {
        return Err(TecplotError::TrailingData {
            offset: bytes_read,
            remaining,
        });
    }

    info!(bytes_read, zones_committed, "decode complete");
    Ok(DecodeSummary {
        header,
        zones,
        zones_committed,
        bytes_read,
    })
}
