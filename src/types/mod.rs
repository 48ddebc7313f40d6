// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color value types and conversions.
//!
//! This module provides the three interchangeable color representations used
//! across the library, plus the union type that carries exactly one of them.
//! Every type is an immutable value: transforms return new instances.
//!
//! # Types
//!
//! - [`ColorRgb`] - Red/green/blue channels in `0.0..=1.0`
//! - [`ColorXy`] - CIE 1931 xy chromaticity
//! - [`ColorHsv`] - Hue/saturation/value with independently optional fields
//! - [`Color`] - Exactly one of the three above
//! - [`HueCorrection`] - Piecewise-linear hue calibration map

mod color;
mod hsv;
mod kelvin;
mod rgb;
mod xy;

pub use color::Color;
pub use hsv::{ColorHsv, HueCorrection, HueCorrectionPoint};
pub use kelvin::{KELVIN_MAX, KELVIN_MIN, kelvin_to_mireds, mireds_to_kelvin};
pub use rgb::ColorRgb;
pub use xy::ColorXy;

use serde_json::{Map, Value};

use crate::error::ValueError;

/// Rounds `value` to `precision` decimal digits, half away from zero.
pub(crate) fn precision_round(value: f64, precision: u32) -> f64 {
    #[allow(clippy::cast_possible_wrap)]
    let factor = 10_f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Reads an optional numeric property from a JSON object.
///
/// A present key holding `null` counts as absent. A present key holding a
/// non-numeric value is a format error.
pub(crate) fn number_field(
    object: &Map<String, Value>,
    key: &str,
) -> Result<Option<f64>, ValueError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ValueError::InvalidFormat(format!("{key}: expected a number, got {value}"))),
    }
}

/// Reads a required numeric property from a JSON object.
pub(crate) fn required_field(
    object: &Map<String, Value>,
    key: &str,
    expected: &'static str,
) -> Result<f64, ValueError> {
    number_field(object, key)?.ok_or(ValueError::MissingField { expected })
}

/// Returns the value as a JSON object or fails with the given missing-field error.
pub(crate) fn as_object<'a>(
    value: &'a Value,
    expected: &'static str,
) -> Result<&'a Map<String, Value>, ValueError> {
    value
        .as_object()
        .ok_or(ValueError::MissingField { expected })
}
