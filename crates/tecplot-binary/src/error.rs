use thiserror::Error;

/// Errors raised while decoding a Tecplot binary file.
///
/// Every decode variant records the byte offset at which the problem was
/// detected so a malformed record can be located with a hex viewer.
#[derive(Error, Debug)]
pub enum TecplotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of file at offset {offset}: needed {needed} more bytes")]
    UnexpectedEof { offset: u64, needed: u64 },

    #[error("Malformed {field} at offset {offset}: {reason}")]
    MalformedField {
        offset: u64,
        field: &'static str,
        reason: String,
    },

    #[error("Unterminated string starting at offset {offset}")]
    UnterminatedString { offset: u64 },

    #[error("Unsupported header at offset {offset}: {reason}")]
    UnsupportedHeader { offset: u64, reason: String },

    #[error("Unknown header section flag {flag} at offset {offset}")]
    UnknownHeaderSection { offset: u64, flag: f32 },

    #[error("Unsupported feature at offset {offset}: {feature}")]
    UnsupportedFeature { offset: u64, feature: &'static str },

    #[error("Mixed variable formats at offset {offset}: {formats:?}")]
    MixedVariableFormats { offset: u64, formats: Vec<i32> },

    #[error("Unknown numeric format code {code} at offset {offset}")]
    UnknownNumericFormat { offset: u64, code: i32 },

    #[error("Unsupported zone layout at offset {offset}: {reason}")]
    UnsupportedZoneLayout { offset: u64, reason: String },

    #[error("More than {limit} zones declared (offset {offset})")]
    TooManyZones { offset: u64, limit: usize },

    #[error("{remaining} unread bytes remain after offset {offset}")]
    TrailingData { offset: u64, remaining: u64 },

    #[error("Zone {zone} has negative node index {index} (connectivity at offset {offset})")]
    NegativeNodeIndex { offset: u64, zone: usize, index: i32 },

    #[error("Cursor desync: tracked offset {offset}, stream position {actual}")]
    CursorDesync { offset: u64, actual: u64 },
}

impl TecplotError {
    /// Byte offset at which the error was detected, if it came from decoding.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::Io(_) => None,
            Self::UnexpectedEof { offset, .. }
            | Self::MalformedField { offset, .. }
            | Self::UnterminatedString { offset }
            | Self::UnsupportedHeader { offset, .. }
            | Self::UnknownHeaderSection { offset, .. }
            | Self::UnsupportedFeature { offset, .. }
            | Self::MixedVariableFormats { offset, .. }
            | Self::UnknownNumericFormat { offset, .. }
            | Self::UnsupportedZoneLayout { offset, .. }
            | Self::TooManyZones { offset, .. }
            | Self::TrailingData { offset, .. }
            | Self::NegativeNodeIndex { offset, .. }
            | Self::CursorDesync { offset, .. } => Some(*offset),
        }
    }
}

pub type Result<T> = std::result::Result<T, TecplotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_reported_for_decode_errors() {
        let err = TecplotError::TrailingData {
            offset: 120,
            remaining: 4,
        };
        assert_eq!(err.offset(), Some(120));
        assert_eq!(err.to_string(), "4 unread bytes remain after offset 120");
    }

    #[test]
    fn io_errors_have_no_offset() {
        let err = TecplotError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(err.offset(), None);
    }
}
