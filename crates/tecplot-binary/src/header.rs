//! Header section: magic, title, variable names, zone records, and the
//! section flag that closes the header.

use std::io::{Read, Seek};

use tracing::debug;

use crate::cursor::ByteCursor;
use crate::error::{Result, TecplotError};
use crate::options::DecodeOptions;
use crate::strings::read_string;
use crate::types::*;
use crate::zone::read_zone_descriptors;

/// Decoded header plus the zone records it declares.
#[derive(Debug, Clone)]
pub struct HeaderSection {
    pub header: FileHeader,
    pub zones: Vec<ZoneDescriptor>,
}

pub fn read_header<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    options: &DecodeOptions,
) -> Result<HeaderSection> {
    //  Magic + version
    let mut magic = [0u8; 8];
    cursor.read_into(&mut magic)?;
    if &magic != TDV_MAGIC {
        return Err(TecplotError::UnsupportedHeader {
            offset: 0,
            reason: format!("bad magic {:?}", String::from_utf8_lossy(&magic)),
        });
    }

    //  Byte order
    let at = cursor.offset();
    let byte_order = cursor.read_i32()?;
    if byte_order != BYTE_ORDER_MARKER {
        return Err(TecplotError::UnsupportedHeader {
            offset: at,
            reason: format!("byte-order marker {byte_order}, expected {BYTE_ORDER_MARKER}"),
        });
    }

    //  File type
    let at = cursor.offset();
    let file_type =
        FileType::try_from(cursor.read_i32()?).map_err(|v| TecplotError::UnsupportedHeader {
            offset: at,
            reason: format!("file type {v} (only FULL is supported)"),
        })?;

    let title = read_string(cursor)?;

    //  Variables
    let at = cursor.offset();
    let nvars = cursor.read_count("variable count")? as usize;
    if nvars < 3 {
        return Err(TecplotError::UnsupportedHeader {
            offset: at,
            reason: format!("{nvars} variables; x, y and z are required"),
        });
    }
    if !options.accepts_variable_count(nvars) {
        return Err(TecplotError::UnsupportedHeader {
            offset: at,
            reason: format!(
                "{nvars} variables, expected one of {:?}",
                options.accepted_variable_counts
            ),
        });
    }
    let variable_names = (0..nvars)
        .map(|_| read_string(cursor))
        .collect::<Result<Vec<_>>>()?;

    debug!(%title, variables = ?variable_names, "header");

    //  Zones
    let zones = read_zone_descriptors(cursor, options.max_zones)?;

    //  Section flag
    let at = cursor.offset();
    let flag = cursor.read_f32()?;
    if flag == ZONE_MARKER {
        let geometry = read_geometry(cursor)?;
        debug!(?geometry, "skipped geometry record");
    } else if flag != EOH_MARKER {
        return Err(TecplotError::UnknownHeaderSection { offset: at, flag });
    }

    Ok(HeaderSection {
        header: FileHeader {
            version: TDV_VERSION.to_string(),
            file_type,
            title,
            variable_names,
        },
        zones,
    })
}

fn read_geometry<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<GeometryRecord> {
    Ok(GeometryRecord {
        coord_sys: cursor.read_i32()?,
        scope: cursor.read_i32()?,
        draw_order: cursor.read_i32()?,
        origin: [cursor.read_f64()?, cursor.read_f64()?, cursor.read_f64()?],
        zone: cursor.read_i32()?,
        color: cursor.read_i32()?,
        fill_color: cursor.read_i32()?,
        is_filled: cursor.read_i32()?,
        geom_type: cursor.read_i32()?,
        line_pattern: cursor.read_i32()?,
        pattern_length: cursor.read_f64()?,
    })
}
