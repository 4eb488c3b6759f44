//! Tecplot binary format types, constants, and format policy.

use serde::{Deserialize, Serialize};

use crate::error::TecplotError;

/// Magic token and version at the start of every supported file.
pub const TDV_MAGIC: &[u8; 8] = b"#!TDV112";

/// Version digits carried by [`TDV_MAGIC`].
pub const TDV_VERSION: &str = "112";

/// Byte-order sentinel written as an `i32` right after the magic.
pub const BYTE_ORDER_MARKER: i32 = 1;

/// Marker introducing a zone record, a geometry record, or a zone data block.
pub const ZONE_MARKER: f32 = 299.0;

/// End-of-header marker separating the header from zone data.
pub const EOH_MARKER: f32 = 357.0;

//  File type

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Full,
}

impl TryFrom<i32> for FileType {
    type Error = i32;
    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Full),
            _ => Err(v),
        }
    }
}

//  Zone type

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ZoneType {
    Ordered = 0,
    FELineSeg = 1,
    FETriangle = 2,
    FEQuadrilateral = 3,
    FETetrahedron = 4,
    FEBrick = 5,
    FEPolygon = 6,
    FEPolyhedron = 7,
}

impl TryFrom<i32> for ZoneType {
    type Error = i32;
    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Ordered),
            1 => Ok(Self::FELineSeg),
            2 => Ok(Self::FETriangle),
            3 => Ok(Self::FEQuadrilateral),
            4 => Ok(Self::FETetrahedron),
            5 => Ok(Self::FEBrick),
            6 => Ok(Self::FEPolygon),
            7 => Ok(Self::FEPolyhedron),
            _ => Err(v),
        }
    }
}

impl ZoneType {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_ordered(self) -> bool {
        is_ordered(self.code())
    }

    pub fn is_finite_element(self) -> bool {
        is_finite_element(self.code())
    }

    pub fn is_polygonal(self) -> bool {
        is_polygonal(self.code())
    }

    /// Nodes per element for fixed-topology finite-element zones.
    pub fn nodes_per_element(self) -> Option<usize> {
        match self {
            Self::FELineSeg => Some(2),
            Self::FETriangle => Some(3),
            Self::FEQuadrilateral | Self::FETetrahedron => Some(4),
            Self::FEBrick => Some(8),
            Self::Ordered | Self::FEPolygon | Self::FEPolyhedron => None,
        }
    }
}

//  Data packing

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataPacking {
    /// Grouped by variable.
    Block,
    /// Grouped by node.
    Point,
}

impl TryFrom<i32> for DataPacking {
    type Error = i32;
    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Block),
            1 => Ok(Self::Point),
            _ => Err(v),
        }
    }
}

//  Variable format

/// Per-variable numeric encoding of a zone's data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum VariableFormat {
    Float32 = 1,
    Float64 = 2,
    Int64 = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Float,
    Int,
}

impl VariableFormat {
    /// Map a format code, failing with `UnknownNumericFormat` at `offset`.
    pub fn from_code(code: i32, offset: u64) -> Result<Self, TecplotError> {
        match code {
            1 => Ok(Self::Float32),
            2 => Ok(Self::Float64),
            3 => Ok(Self::Int64),
            _ => Err(TecplotError::UnknownNumericFormat { offset, code }),
        }
    }

    pub fn byte_width(self) -> usize {
        numeric_layout(self).0
    }

    pub fn kind(self) -> NumericKind {
        numeric_layout(self).1
    }
}

//  Format policy

/// `0` is the only ordered (structured grid) zone type.
pub fn is_ordered(zone_type: i32) -> bool {
    zone_type == 0
}

pub fn is_finite_element(zone_type: i32) -> bool {
    (1..=7).contains(&zone_type)
}

/// FEPOLYGON and FEPOLYHEDRON.
pub fn is_polygonal(zone_type: i32) -> bool {
    matches!(zone_type, 6 | 7)
}

/// Byte width and element kind of a numeric format.
pub fn numeric_layout(format: VariableFormat) -> (usize, NumericKind) {
    match format {
        VariableFormat::Float32 => (4, NumericKind::Float),
        VariableFormat::Float64 => (8, NumericKind::Float),
        VariableFormat::Int64 => (8, NumericKind::Int),
    }
}

//  Header

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileHeader {
    pub version: String,
    pub file_type: FileType,
    pub title: String,
    /// Column order shared by every zone.
    pub variable_names: Vec<String>,
}

/// A header entry looked up by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderField<'a> {
    Title(&'a str),
    Variables(&'a [String]),
}

impl FileHeader {
    pub fn nvars(&self) -> usize {
        self.variable_names.len()
    }

    /// Case-insensitive lookup of `title` or `variables`.
    pub fn get(&self, key: &str) -> Option<HeaderField<'_>> {
        if key.eq_ignore_ascii_case("title") {
            Some(HeaderField::Title(&self.title))
        } else if key.eq_ignore_ascii_case("variables") {
            Some(HeaderField::Variables(&self.variable_names))
        } else {
            None
        }
    }
}

//  Zone descriptor

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDescriptor {
    pub name: String,
    pub parent_zone: i32,
    pub strand_id: i32,
    pub solution_time: f64,
    pub zone_type: ZoneType,
    pub data_packing: DataPacking,
    pub raw_local_flag: bool,
    /// Doubles as the node count for FE quadrilateral zones.
    pub misc_neighbor_connection_count: u32,
    pub element_count: u32,
    pub cell_dimensions: [i32; 3],
}

//  Geometry

/// Geometry annotation record that may follow the zone records.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    pub coord_sys: i32,
    pub scope: i32,
    pub draw_order: i32,
    pub origin: [f64; 3],
    pub zone: i32,
    pub color: i32,
    pub fill_color: i32,
    pub is_filled: i32,
    pub geom_type: i32,
    pub line_pattern: i32,
    pub pattern_length: f64,
}

impl GeometryRecord {
    /// Encoded size in bytes.
    pub const SIZE: u64 = 3 * 4 + 3 * 8 + 4 + 5 * 4 + 8;
}
