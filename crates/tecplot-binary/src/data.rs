//! Zone data blocks: format codes, sharing flags, min/max bounds, nodal
//! values and element connectivity.

use std::io::{Read, Seek};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::array::Array2;
use crate::cursor::{ByteCursor, checked_len};
use crate::error::{Result, TecplotError};
use crate::types::{DataPacking, VariableFormat, ZONE_MARKER, ZoneDescriptor, ZoneType};

//  Field arrays

/// Nodal values `[node_count][nvars]` in the zone's numeric encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldArray {
    Float32(Array2<f32>),
    Float64(Array2<f64>),
    Int64(Array2<i64>),
}

impl FieldArray {
    /// Decode a block-packed (variable-major) buffer into `[rows][cols]`.
    fn from_block(format: VariableFormat, rows: usize, cols: usize, bytes: &[u8]) -> Option<Self> {
        Some(match format {
            VariableFormat::Float32 => {
                let values: Vec<f32> = bytes
                    .chunks_exact(4)
                    .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect();
                Self::Float32(Array2::from_column_major(rows, cols, &values)?)
            }
            VariableFormat::Float64 => {
                let values: Vec<f64> = bytes
                    .chunks_exact(8)
                    .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                    .collect();
                Self::Float64(Array2::from_column_major(rows, cols, &values)?)
            }
            VariableFormat::Int64 => {
                let values: Vec<i64> = bytes
                    .chunks_exact(8)
                    .map(|c| i64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                    .collect();
                Self::Int64(Array2::from_column_major(rows, cols, &values)?)
            }
        })
    }

    pub fn format(&self) -> VariableFormat {
        match self {
            Self::Float32(_) => VariableFormat::Float32,
            Self::Float64(_) => VariableFormat::Float64,
            Self::Int64(_) => VariableFormat::Int64,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Float32(a) => a.shape(),
            Self::Float64(a) => a.shape(),
            Self::Int64(a) => a.shape(),
        }
    }

    pub fn split_columns(&self, at: usize) -> (Self, Self) {
        match self {
            Self::Float32(a) => {
                let (l, r) = a.split_columns(at);
                (Self::Float32(l), Self::Float32(r))
            }
            Self::Float64(a) => {
                let (l, r) = a.split_columns(at);
                (Self::Float64(l), Self::Float64(r))
            }
            Self::Int64(a) => {
                let (l, r) = a.split_columns(at);
                (Self::Int64(l), Self::Int64(r))
            }
        }
    }

    /// Widen to `f64`. Integers beyond 2^53 lose precision.
    pub fn to_f64(&self) -> Array2<f64> {
        match self {
            Self::Float32(a) => a.map(f64::from),
            Self::Float64(a) => a.clone(),
            Self::Int64(a) => a.map(|v| v as f64),
        }
    }
}

//  Decoded zone

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedZone {
    /// Zero-based node indices, `[element_count][4]`.
    pub connectivity: Array2<i32>,
    /// `[node_count][nvars]`; the first three columns are x, y, z.
    pub field_values: FieldArray,
    /// `(min, max)` per variable.
    pub min_max: Vec<[f64; 2]>,
    /// Per-variable passive flags when the zone declares any.
    pub passive: Option<Vec<bool>>,
}

/// Decode the data block for zone `index`.
///
/// Only FE quadrilateral zones with block packing, no raw local
/// neighbors and a positive node count are supported.
pub fn read_zone_data<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    index: usize,
    zone: &ZoneDescriptor,
    nvars: usize,
) -> Result<DecodedZone> {
    check_layout(cursor.offset(), zone)?;

    let at = cursor.offset();
    let marker = cursor.read_f32()?;
    if marker != ZONE_MARKER {
        return Err(TecplotError::MalformedField {
            offset: at,
            field: "zone data marker",
            reason: format!("expected {ZONE_MARKER}, got {marker}"),
        });
    }

    //  Variable formats
    let at = cursor.offset();
    let format = uniform_format(at, &cursor.read_i32s(nvars)?)?;

    //  Passive variables
    let passive = if cursor.read_flag("has passive variables")? {
        let at = cursor.offset();
        let flags = cursor.read_i32s(nvars)?;
        Some(
            flags
                .iter()
                .enumerate()
                .map(|(i, &v)| match v {
                    0 => Ok(false),
                    1 => Ok(true),
                    _ => Err(TecplotError::MalformedField {
                        offset: at + 4 * i as u64,
                        field: "passive variable flag",
                        reason: format!("expected 0 or 1, got {v}"),
                    }),
                })
                .collect::<Result<Vec<_>>>()?,
        )
    } else {
        None
    };

    //  Sharing
    let at = cursor.offset();
    if cursor.read_flag("has variable sharing")? {
        return Err(TecplotError::UnsupportedFeature {
            offset: at,
            feature: "variable sharing",
        });
    }
    let at = cursor.offset();
    let connectivity_share = cursor.read_i32()?;
    if connectivity_share != -1 {
        return Err(TecplotError::UnsupportedFeature {
            offset: at,
            feature: "connectivity sharing",
        });
    }

    let nnodes = zone.misc_neighbor_connection_count as usize;
    let nelements = zone.element_count as usize;
    debug!(zone = index, name = %zone.name, nnodes, nelements, ?format, "zone data");

    //  Min/max: all minimums, then all maximums
    let bounds = cursor.read_f64s(2 * nvars)?;
    let (mins, maxs) = bounds.split_at(nvars);
    let min_max = mins.iter().zip(maxs).map(|(&lo, &hi)| [lo, hi]).collect();

    //  Nodal values
    let at = cursor.offset();
    let nvalues = nvars.checked_mul(nnodes).ok_or_else(|| TecplotError::MalformedField {
        offset: at,
        field: "node count",
        reason: format!("{nvars} x {nnodes} values overflows"),
    })?;
    let bytes = cursor.read_exact(checked_len(at, nvalues, format.byte_width())?)?;
    let field_values =
        FieldArray::from_block(format, nnodes, nvars, &bytes).ok_or_else(|| {
            TecplotError::MalformedField {
                offset: at,
                field: "nodal data block",
                reason: format!("{} bytes do not form [{nnodes}][{nvars}]", bytes.len()),
            }
        })?;
    cursor.check_position()?;

    //  Connectivity
    let at = cursor.offset();
    let stride = zone.zone_type.nodes_per_element().unwrap_or(4);
    let nints = nelements.checked_mul(stride).ok_or_else(|| TecplotError::MalformedField {
        offset: at,
        field: "element count",
        reason: format!("{nelements} elements overflows"),
    })?;
    let connectivity = Array2::from_row_major(nelements, stride, cursor.read_i32s(nints)?)
        .ok_or_else(|| TecplotError::MalformedField {
            offset: at,
            field: "connectivity block",
            reason: format!("does not form [{nelements}][{stride}]"),
        })?;

    if let (Some(min), Some(max)) = (connectivity.min(), connectivity.max()) {
        debug!(zone = index, min, max, "connectivity range");
        if min < 0 {
            return Err(TecplotError::NegativeNodeIndex {
                offset: at,
                zone: index,
                index: min,
            });
        }
    }
    cursor.check_position()?;

    Ok(DecodedZone {
        connectivity,
        field_values,
        min_max,
        passive,
    })
}

fn check_layout(offset: u64, zone: &ZoneDescriptor) -> Result<()> {
    let reason = if zone.zone_type != ZoneType::FEQuadrilateral {
        format!("zone type {:?}, only FEQuadrilateral is supported", zone.zone_type)
    } else if zone.data_packing != DataPacking::Block {
        "point packing, only block packing is supported".to_string()
    } else if zone.raw_local_flag {
        "raw local face neighbors are not supported".to_string()
    } else if zone.misc_neighbor_connection_count == 0 {
        "zero node count".to_string()
    } else {
        return Ok(());
    };
    Err(TecplotError::UnsupportedZoneLayout { offset, reason })
}

/// All variables must share one known numeric format.
fn uniform_format(offset: u64, codes: &[i32]) -> Result<VariableFormat> {
    let formats = codes
        .iter()
        .enumerate()
        .map(|(i, &code)| VariableFormat::from_code(code, offset + 4 * i as u64))
        .collect::<Result<Vec<_>>>()?;
    match formats.split_first() {
        Some((&first, rest)) if rest.iter().all(|&f| f == first) => Ok(first),
        Some(_) => Err(TecplotError::MixedVariableFormats {
            offset,
            formats: codes.to_vec(),
        }),
        None => Err(TecplotError::MalformedField {
            offset,
            field: "variable formats",
            reason: "zone has no variables".to_string(),
        }),
    }
}
