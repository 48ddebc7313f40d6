// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CIE 1931 xy chromaticity type.

use std::fmt;

use serde_json::Value;

use crate::error::ValueError;

use super::kelvin::{self, kelvin_to_mireds, mireds_to_kelvin};
use super::{ColorHsv, ColorRgb, as_object, precision_round, required_field};

const REQUIRED: &str = "\"x\", \"y\"";

/// CIE 1931 xy chromaticity.
///
/// Coordinates are nominally in `0.0..=1.0` and are not validated on
/// construction.
///
/// # Examples
///
/// ```
/// use lightcolor_lib::types::ColorXy;
///
/// let warm = ColorXy::from_mireds(370.0).unwrap();
/// let mireds = warm.to_mireds().round();
/// assert!((mireds - 370.0).abs() <= 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorXy {
    x: f64,
    y: f64,
}

impl ColorXy {
    /// Creates a new chromaticity value.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a chromaticity value from an `{x, y}` object.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MissingField` if `x` or `y` is missing.
    pub fn from_object(value: &Value) -> Result<Self, ValueError> {
        let object = as_object(value, REQUIRED)?;
        Ok(Self::new(
            required_field(object, "x", REQUIRED)?,
            required_field(object, "y", REQUIRED)?,
        ))
    }

    /// Returns the chromaticity of a black body at `kelvin`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `kelvin` is outside the lookup
    /// table ([`KELVIN_MIN`](super::KELVIN_MIN)..=[`KELVIN_MAX`](super::KELVIN_MAX)).
    pub fn from_kelvin(kelvin: u32) -> Result<Self, ValueError> {
        let (x, y) = kelvin::lookup(kelvin)?;
        Ok(Self::new(x, y))
    }

    /// Returns the chromaticity of a black body at `mireds`.
    ///
    /// Mireds are converted to Kelvin and rounded to the nearest whole
    /// Kelvin before the table lookup.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the resulting Kelvin value is
    /// outside the lookup table, including for zero or negative mireds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_mireds(mireds: f64) -> Result<Self, ValueError> {
        let kelvin = mireds_to_kelvin(mireds).round();
        if !kelvin.is_finite() || kelvin < 0.0 || kelvin > f64::from(u32::MAX) {
            return Err(ValueError::OutOfRange {
                min: kelvin::KELVIN_MIN,
                max: kelvin::KELVIN_MAX,
                actual: if kelvin < 0.0 { 0 } else { u32::MAX },
            });
        }
        Self::from_kelvin(kelvin as u32)
    }

    /// Returns the x coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Rounds both coordinates to `precision` decimal digits.
    #[must_use]
    pub fn rounded(&self, precision: u32) -> Self {
        Self::new(
            precision_round(self.x, precision),
            precision_round(self.y, precision),
        )
    }

    /// Approximates the correlated color temperature in mireds.
    ///
    /// Uses McCamy's cubic with `n = (x - 0.3320) / (0.1858 - y)`. Along the
    /// Planckian locus between 153 and 500 mireds the round trip through
    /// [`from_mireds`](Self::from_mireds) stays within 2 mireds.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn to_mireds(&self) -> f64 {
        let n = (self.x - 0.3320) / (0.1858 - self.y);
        let kelvin = (437.0 * n.powi(3) + 3601.0 * n.powi(2) + 6861.0 * n + 5517.0).abs();
        kelvin_to_mireds(kelvin)
    }

    /// Converts to RGB at full brightness using the Wide RGB D65 matrix.
    ///
    /// A channel exceeding 1.0 that is also the largest channel is clamped
    /// to 1.0 and the other two are divided by its value. Negative and NaN
    /// channels (`y == 0` divides by zero) floor to 0.
    #[must_use]
    pub fn to_rgb(&self) -> ColorRgb {
        let brightness = 1.0;
        let z = 1.0 - self.x - self.y;
        let big_x = (brightness / self.y) * self.x;
        let big_z = (brightness / self.y) * z;

        let mut red = big_x * 1.656_492 - brightness * 0.354_851 - big_z * 0.255_038;
        let mut green = -big_x * 0.707_196 + brightness * 1.655_397 + big_z * 0.036_152;
        let mut blue = big_x * 0.051_713 - brightness * 0.121_364 + big_z * 1.011_53;

        if red > blue && red > green && red > 1.0 {
            green /= red;
            blue /= red;
            red = 1.0;
        } else if green > blue && green > red && green > 1.0 {
            red /= green;
            blue /= green;
            green = 1.0;
        } else if blue > red && blue > green && blue > 1.0 {
            red /= blue;
            green /= blue;
            blue = 1.0;
        }

        ColorRgb::new(floor_invalid(red), floor_invalid(green), floor_invalid(blue))
    }

    /// Converts to HSV through RGB.
    #[must_use]
    pub fn to_hsv(&self) -> ColorHsv {
        self.to_rgb().to_hsv()
    }
}

fn floor_invalid(channel: f64) -> f64 {
    if channel.is_finite() && channel >= 0.0 {
        channel
    } else {
        0.0
    }
}

impl fmt::Display for ColorXy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xy({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_mireds_matches_table() {
        let xy = ColorXy::from_mireds(250.0).unwrap();
        assert_eq!(xy, ColorXy::from_kelvin(4000).unwrap());
    }

    #[test]
    fn from_mireds_out_of_table() {
        assert!(matches!(
            ColorXy::from_mireds(1000.0),
            Err(ValueError::OutOfRange { actual: 1000, .. })
        ));
        assert!(ColorXy::from_mireds(0.0).is_err());
        assert!(ColorXy::from_mireds(-5.0).is_err());
        assert!(ColorXy::from_mireds(f64::NAN).is_err());
    }

    #[test]
    fn mireds_roundtrip_within_two() {
        for mireds in 153..=500 {
            let xy = ColorXy::from_mireds(f64::from(mireds)).unwrap();
            let back = xy.to_mireds().round();
            assert!(
                (back - f64::from(mireds)).abs() <= 2.0,
                "{mireds} came back as {back}"
            );
        }
    }

    #[test]
    fn to_rgb_white_point() {
        let rgb = ColorXy::new(0.3127, 0.3290).to_rgb();
        assert!(rgb.red() > 0.9 && rgb.green() > 0.9 && rgb.blue() > 0.9);
        assert!(rgb.red() <= 1.0 && rgb.green() <= 1.0 && rgb.blue() <= 1.0);
    }

    #[test]
    fn to_rgb_renormalizes_dominant_channel() {
        let rgb = ColorXy::new(0.6915, 0.3083).to_rgb();
        assert_eq!(rgb.red(), 1.0);
        assert!(rgb.green() < 0.1);
        assert!(rgb.blue() >= 0.0);
    }

    #[test]
    fn to_rgb_zero_y_floors_to_black() {
        let rgb = ColorXy::new(0.3, 0.0).to_rgb();
        assert_eq!(rgb, ColorRgb::new(0.0, 0.0, 0.0));

        let rgb = ColorXy::new(0.0, 0.0).to_rgb();
        assert_eq!(rgb, ColorRgb::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn rgb_xy_rgb_roundtrip_primaries() {
        for hex in ["#ff0500", "#00ff0e", "#0a00ff"] {
            let xy = ColorRgb::from_hex(hex).unwrap().to_xy();
            assert_eq!(xy.to_rgb().to_hex(), hex);
        }
    }

    #[test]
    fn rounded_is_idempotent() {
        let xy = ColorXy::new(0.123_456_7, 0.765_432_1).rounded(4);
        assert_eq!(xy, ColorXy::new(0.1235, 0.7654));
        assert_eq!(xy.rounded(4), xy);
    }

    #[test]
    fn from_object() {
        assert_eq!(
            ColorXy::from_object(&json!({"x": 0.5, "y": 0.4})).unwrap(),
            ColorXy::new(0.5, 0.4)
        );
        assert!(ColorXy::from_object(&json!({"x": 0.5})).is_err());
        assert!(ColorXy::from_object(&json!("0.5,0.4")).is_err());
    }
}
