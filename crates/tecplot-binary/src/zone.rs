//! Zone records in the header section.
//!
//! Each record starts with [`ZONE_MARKER`]. The first float that is not a
//! zone marker ends the list and is left in the stream for the caller.

use std::io::{Read, Seek};

use tracing::debug;

use crate::cursor::ByteCursor;
use crate::error::{Result, TecplotError};
use crate::strings::read_string;
use crate::types::{DataPacking, ZONE_MARKER, ZoneDescriptor, ZoneType};

/// Read zone records until the first non-marker float.
///
/// At most `max_zones` records are accepted; a further zone marker fails
/// with `TooManyZones`.
pub fn read_zone_descriptors<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    max_zones: usize,
) -> Result<Vec<ZoneDescriptor>> {
    let mut zones = Vec::new();
    loop {
        let at = cursor.offset();
        let marker = cursor.read_f32()?;
        if marker != ZONE_MARKER {
            cursor.rewind(4)?;
            debug!(count = zones.len(), offset = at, "end of zone records");
            return Ok(zones);
        }
        if zones.len() == max_zones {
            return Err(TecplotError::TooManyZones {
                offset: at,
                limit: max_zones,
            });
        }
        zones.push(read_zone_record(cursor)?);
    }
}

fn read_zone_record<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<ZoneDescriptor> {
    let name = read_string(cursor)?;

    let parent_zone = cursor.read_i32()?;
    let strand_id = cursor.read_i32()?;
    let solution_time = cursor.read_f64()?;
    let _unused = cursor.read_i32()?;

    let at = cursor.offset();
    let zone_type_code = cursor.read_i32()?;
    let zone_type = ZoneType::try_from(zone_type_code).map_err(|v| TecplotError::MalformedField {
        offset: at,
        field: "zone type",
        reason: format!("expected 0..=7, got {v}"),
    })?;

    let at = cursor.offset();
    let data_packing =
        DataPacking::try_from(cursor.read_i32()?).map_err(|v| TecplotError::MalformedField {
            offset: at,
            field: "data packing",
            reason: format!("expected 0 or 1, got {v}"),
        })?;

    let at = cursor.offset();
    if cursor.read_i32()? != 0 {
        return Err(TecplotError::UnsupportedFeature {
            offset: at,
            feature: "per-variable location",
        });
    }

    debug!(
        zone = %name,
        parent_zone,
        strand_id,
        solution_time,
        zone_type = ?zone_type,
        data_packing = ?data_packing,
        "zone record"
    );

    let raw_local_flag = cursor.read_flag("raw local flag")?;
    let misc_neighbor_connection_count = cursor.read_count("misc neighbor connection count")?;

    if zone_type.is_ordered() {
        return Err(TecplotError::UnsupportedFeature {
            offset: cursor.offset(),
            feature: "ordered zone",
        });
    }
    if zone_type.is_polygonal() {
        return Err(TecplotError::UnsupportedFeature {
            offset: cursor.offset(),
            feature: "FEPOLYGON/FEPOLYHEDRON zone",
        });
    }

    let element_count = cursor.read_count("element count")?;
    let cell_dimensions = [cursor.read_i32()?, cursor.read_i32()?, cursor.read_i32()?];
    let _separator = cursor.read_i32()?;

    debug!(
        zone = %name,
        element_count,
        misc_neighbor_connection_count,
        raw_local_flag,
        ?cell_dimensions,
        "zone dimensions"
    );

    Ok(ZoneDescriptor {
        name,
        parent_zone,
        strand_id,
        solution_time,
        zone_type,
        data_packing,
        raw_local_flag,
        misc_neighbor_connection_count,
        element_count,
        cell_dimensions,
    })
}
