//! Pure-Rust reader for Tecplot binary (`#!TDV112`) data files.
//!
//! Decodes the header (title, variable names, zone records) and the zone
//! data blocks of finite-element quadrilateral files into typed arrays:
//!
//! * **nodal values**: `[node_count][nvars]`, split into xyz and results
//! * **connectivity**: `[element_count][4]` zero-based node indices
//!
//! Decoded zones are handed to a [`ZoneSink`]; [`TecplotModel`] is the
//! in-memory default. Layouts outside the supported subset (ordered,
//! polygonal, shared or mixed-format zones) fail with a typed
//! [`TecplotError`] that records the byte offset of the offending record.

pub mod array;
pub mod cursor;
pub mod data;
pub mod error;
pub mod header;
pub mod model;
pub mod options;
pub mod reader;
pub mod strings;
pub mod types;
pub mod zone;

#[cfg(test)]
mod testutil;

pub use array::Array2;
pub use data::{DecodedZone, FieldArray};
pub use error::{Result, TecplotError};
pub use model::{TecplotModel, Zone};
pub use options::DecodeOptions;
pub use reader::{DecodeSummary, MeshZone, ZoneSink, decode, read_model, read_tecplot_binary};
pub use types::{
    DataPacking, FileHeader, FileType, HeaderField, VariableFormat, ZoneDescriptor, ZoneType,
};
