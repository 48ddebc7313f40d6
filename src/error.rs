// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `LightColor` library.
//!
//! This module provides the error hierarchy for the color subsystem: value
//! construction failures, gradient encode validation, and payload decoding.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Error occurred while constructing a color value.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while validating a gradient to encode.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error occurred while parsing a light payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to color value construction.
///
/// These are raised when an externally supplied value cannot be turned into
/// one of the color representations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A string value is not in the expected format.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// One or more required properties are missing from an object.
    #[error("one or more required properties missing, required properties: {expected}")]
    MissingField {
        /// The properties that are required.
        expected: &'static str,
    },

    /// The value matches none of the supported color shapes.
    #[error("value does not contain valid color definition")]
    NoValidColorDefinition,

    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
        /// The actual value that was provided.
        actual: u32,
    },
}

/// Errors raised when a gradient cannot be encoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The number of colors is outside 1..=9.
    #[error("expected 1 to 9 colors, got {0}")]
    ColorCount(usize),

    /// The segment count is outside 1..=31.
    #[error("expected segments between 1 and 31, got {0}")]
    Segments(u8),

    /// The offset is outside 0..=31.
    #[error("expected offset between 0 and 31, got {0}")]
    Offset(u8),
}

/// Errors related to parsing light payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The payload contains characters that are not hex digits.
    #[error("invalid hex payload: {0}")]
    InvalidHex(String),

    /// The payload ended before a field could be read.
    #[error("payload truncated reading {field}: needed {needed} hex chars, {available} available")]
    Truncated {
        /// The field being read.
        field: &'static str,
        /// Number of hex characters required.
        needed: usize,
        /// Number of hex characters left.
        available: usize,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 1667,
            max: 25000,
            actual: 1000,
        };
        assert_eq!(err.to_string(), "value 1000 is out of range [1667, 25000]");
    }

    #[test]
    fn error_from_validation_error() {
        let err: Error = ValidationError::ColorCount(10).into();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::ColorCount(10))
        ));
    }

    #[test]
    fn missing_field_display() {
        let err = ValueError::MissingField {
            expected: "\"red\", \"green\", \"blue\"",
        };
        assert_eq!(
            err.to_string(),
            "one or more required properties missing, required properties: \"red\", \"green\", \"blue\""
        );
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::Truncated {
            field: "brightness",
            needed: 2,
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "payload truncated reading brightness: needed 2 hex chars, 0 available"
        );
    }
}
