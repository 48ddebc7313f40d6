// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HSV color type with partial-update semantics and hue calibration.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValueError;

use super::{ColorRgb, ColorXy, as_object, number_field, precision_round, required_field};

const REQUIRED_HSV: &str = "\"hue\" or \"saturation\"";
const REQUIRED_HSL: &str = "\"hue\", \"saturation\", \"lightness\"";

/// Hue/saturation/value color where every field may be unspecified.
///
/// An unset field means the caller did not ask to change that component.
/// Partial values survive rounding and hue correction unchanged; they are
/// only filled in by [`complete`](Self::complete) when a concrete RGB or xy
/// value is needed.
///
/// - Hue: degrees in `0.0..360.0`, reduced modulo 360 on construction
/// - Saturation: percent, `0.0..=100.0`
/// - Value: percent, `0.0..=100.0`
///
/// # Examples
///
/// ```
/// use lightcolor_lib::types::ColorHsv;
///
/// let hue_only = ColorHsv::new(Some(480.0), None, None);
/// assert_eq!(hue_only.hue(), Some(120.0));
/// assert_eq!(hue_only.saturation(), None);
///
/// // Missing components default to full saturation and value
/// assert_eq!(hue_only.to_rgb().to_hex(), "#00ff00");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorHsv {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saturation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

impl ColorHsv {
    /// Default hue used by [`complete`](Self::complete).
    pub const DEFAULT_HUE: f64 = 0.0;

    /// Default saturation used by [`complete`](Self::complete).
    pub const DEFAULT_SATURATION: f64 = 100.0;

    /// Default value used by [`complete`](Self::complete).
    pub const DEFAULT_VALUE: f64 = 100.0;

    /// Creates a new HSV color. The hue is reduced modulo 360.
    #[must_use]
    pub fn new(hue: Option<f64>, saturation: Option<f64>, value: Option<f64>) -> Self {
        Self {
            hue: hue.map(|h| h.rem_euclid(360.0)),
            saturation,
            value,
        }
    }

    /// Creates an HSV color from a `{hue?, saturation?, value?}` object.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MissingField` if neither `hue` nor `saturation`
    /// is present.
    pub fn from_object(value: &Value) -> Result<Self, ValueError> {
        let object = as_object(value, REQUIRED_HSV)?;
        let hue = number_field(object, "hue")?;
        let saturation = number_field(object, "saturation")?;
        if hue.is_none() && saturation.is_none() {
            return Err(ValueError::MissingField {
                expected: REQUIRED_HSV,
            });
        }
        Ok(Self::new(hue, saturation, number_field(object, "value")?))
    }

    /// Creates an HSV color from hue, saturation and lightness.
    ///
    /// Saturation and lightness are percentages.
    #[must_use]
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let value = saturation * lightness.min(100.0 - lightness) / 100.0 + lightness;
        let saturation = if value == 0.0 {
            0.0
        } else {
            200.0 * (1.0 - lightness / value)
        };
        Self::new(Some(hue), Some(saturation), Some(value))
    }

    /// Creates an HSV color from a `{hue, saturation, lightness}` object.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MissingField` if any of the three is missing.
    pub fn from_hsl_object(value: &Value) -> Result<Self, ValueError> {
        let object = as_object(value, REQUIRED_HSL)?;
        Ok(Self::from_hsl(
            required_field(object, "hue", REQUIRED_HSL)?,
            required_field(object, "saturation", REQUIRED_HSL)?,
            required_field(object, "lightness", REQUIRED_HSL)?,
        ))
    }

    /// Returns the hue, if specified.
    #[must_use]
    pub const fn hue(&self) -> Option<f64> {
        self.hue
    }

    /// Returns the saturation, if specified.
    #[must_use]
    pub const fn saturation(&self) -> Option<f64> {
        self.saturation
    }

    /// Returns the value, if specified.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns the specified fields as a JSON object.
    ///
    /// With `short` the keys are `h`/`s`/`v`, otherwise
    /// `hue`/`saturation`/`value`. `value` is left out unless
    /// `include_value` is set.
    #[must_use]
    pub fn to_object(&self, short: bool, include_value: bool) -> Map<String, Value> {
        let mut object = Map::new();
        let mut put = |long: &str, brief: &str, field: Option<f64>| {
            if let Some(v) = field {
                let key = if short { brief } else { long };
                object.insert(key.to_string(), Value::from(v));
            }
        };
        put("hue", "h", self.hue);
        put("saturation", "s", self.saturation);
        if include_value {
            put("value", "v", self.value);
        }
        object
    }

    /// Rounds every specified field to `precision` decimal digits.
    #[must_use]
    pub fn rounded(&self, precision: u32) -> Self {
        let round = |field: Option<f64>| field.map(|v| precision_round(v, precision));
        Self::new(
            round(self.hue),
            round(self.saturation),
            round(self.value),
        )
    }

    /// Fills unspecified fields with hue 0, saturation 100 and value 100.
    #[must_use]
    pub fn complete(&self) -> Self {
        Self::new(
            Some(self.hue.unwrap_or(Self::DEFAULT_HUE)),
            Some(self.saturation.unwrap_or(Self::DEFAULT_SATURATION)),
            Some(self.value.unwrap_or(Self::DEFAULT_VALUE)),
        )
    }

    /// Applies a hue calibration map, leaving other fields untouched.
    #[must_use]
    pub fn hue_corrected(&self, correction: &HueCorrection) -> Self {
        Self::new(
            self.hue.map(|h| correction.interpolate(h)),
            self.saturation,
            self.value,
        )
    }

    /// Converts to RGB, completing unspecified fields first.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::many_single_char_names,
        clippy::similar_names
    )]
    pub fn to_rgb(&self) -> ColorRgb {
        let complete = self.complete();
        let h = complete.hue.unwrap_or(Self::DEFAULT_HUE) / 360.0;
        let s = complete.saturation.unwrap_or(Self::DEFAULT_SATURATION) / 100.0;
        let v = complete.value.unwrap_or(Self::DEFAULT_VALUE) / 100.0;

        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        ColorRgb::new(r, g, b)
    }

    /// Converts to CIE xy through RGB.
    #[must_use]
    pub fn to_xy(&self) -> ColorXy {
        self.to_rgb().to_xy()
    }

    /// Approximates the correlated color temperature in mireds.
    #[must_use]
    pub fn to_mireds(&self) -> f64 {
        self.to_xy().to_mireds()
    }
}

impl fmt::Display for ColorHsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
        write!(
            f,
            "HSV({}, {}%, {}%)",
            field(self.hue),
            field(self.saturation),
            field(self.value)
        )
    }
}

/// One calibration point of a [`HueCorrection`] map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HueCorrectionPoint {
    /// Requested hue in degrees.
    #[serde(rename = "in")]
    pub input: f64,
    /// Hue to send to the device instead.
    #[serde(rename = "out")]
    pub output: f64,
}

impl HueCorrectionPoint {
    /// Creates a calibration point.
    #[must_use]
    pub const fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }
}

/// Piecewise-linear hue calibration map.
///
/// Devices whose LEDs render hues unevenly are calibrated by listing pairs
/// of requested and corrected hues. Order of the points is irrelevant; at
/// least two points are needed for the map to have any effect.
///
/// # Examples
///
/// ```
/// use lightcolor_lib::types::{HueCorrection, HueCorrectionPoint};
///
/// let map = HueCorrection::new(vec![
///     HueCorrectionPoint::new(30.0, 35.0),
///     HueCorrectionPoint::new(60.0, 55.0),
/// ]);
/// assert_eq!(map.interpolate(45.0), 45.0);
/// assert_eq!(map.interpolate(30.0), 35.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HueCorrection(Vec<HueCorrectionPoint>);

impl HueCorrection {
    const LEFT_EDGE: HueCorrectionPoint = HueCorrectionPoint::new(0.0, 0.0);
    const RIGHT_EDGE: HueCorrectionPoint = HueCorrectionPoint::new(359.0, 359.0);

    /// Creates a calibration map from its points.
    #[must_use]
    pub fn new(points: Vec<HueCorrectionPoint>) -> Self {
        Self(points)
    }

    /// Returns the calibration points.
    #[must_use]
    pub fn points(&self) -> &[HueCorrectionPoint] {
        &self.0
    }

    /// Maps a requested hue through the calibration curve.
    ///
    /// The nearest point at or below `hue` and the nearest point above it
    /// are interpolated linearly; `{in: 0, out: 0}` and
    /// `{in: 359, out: 359}` stand in when no point exists on a side. The
    /// result is rounded to a whole degree. Maps with fewer than two points
    /// return `hue` unchanged.
    #[must_use]
    pub fn interpolate(&self, hue: f64) -> f64 {
        if self.0.len() < 2 {
            return hue;
        }

        let left = self
            .0
            .iter()
            .filter(|p| p.input <= hue)
            .max_by(|a, b| a.input.total_cmp(&b.input))
            .copied()
            .unwrap_or(Self::LEFT_EDGE);
        let right = self
            .0
            .iter()
            .filter(|p| p.input > hue)
            .min_by(|a, b| a.input.total_cmp(&b.input))
            .copied()
            .unwrap_or(Self::RIGHT_EDGE);

        let span = right.input - left.input;
        if span <= 0.0 {
            return left.output.round();
        }
        let ratio = 1.0 - (right.input - hue) / span;
        (left.output + ratio * (right.output - left.output)).round()
    }
}

impl From<Vec<HueCorrectionPoint>> for HueCorrection {
    fn from(points: Vec<HueCorrectionPoint>) -> Self {
        Self::new(points)
    }
}
