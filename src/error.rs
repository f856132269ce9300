//! Errors returned by the edit engine.

use thiserror::Error;

/// Errors for calls that break the engine's contract.
///
/// Uncovered positions, empty history and a drained overlay are ordinary
/// results, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// New and old data passed to a change have different lengths.
    #[error("length mismatch: new data has {new} elements, old data has {old}")]
    LengthMismatch { new: usize, old: usize },

    /// The change would reach past the end of the address space.
    #[error("change of {len} elements at offset {offset} overflows the address space")]
    OffsetOverflow { offset: u64, len: usize },

    /// A configuration override could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = EditError::LengthMismatch { new: 2, old: 3 };
        assert_eq!(err.to_string(), "length mismatch: new data has 2 elements, old data has 3");

        let err = EditError::InvalidConfig {
            key: "PATCHWORK_EDIT_STACK_LIMIT".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for PATCHWORK_EDIT_STACK_LIMIT: \"lots\"");
    }
}
