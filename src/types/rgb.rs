// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with hex parsing, gamma handling and CIE conversion.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::ValueError;

use super::{ColorHsv, ColorXy, as_object, precision_round, required_field};

const REQUIRED: &str = "\"red\", \"green\", \"blue\"";

/// RGB color with floating point channels.
///
/// Channels are nominally in `0.0..=1.0` but are not clamped on
/// construction: conversions from XY or HSV may produce values slightly
/// outside that range, and callers that need device values clamp them.
///
/// # Examples
///
/// ```
/// use lightcolor_lib::types::ColorRgb;
///
/// let orange = ColorRgb::from_hex("#ff8000").unwrap();
/// assert_eq!(orange.red(), 1.0);
/// assert_eq!(orange.to_hex(), "#ff8000");
///
/// // The leading hash is optional
/// let same = ColorRgb::from_hex("ff8000").unwrap();
/// assert_eq!(orange, same);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorRgb {
    red: f64,
    green: f64,
    blue: f64,
}

impl ColorRgb {
    /// Creates a new RGB color from channels in `0.0..=1.0`.
    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Creates an RGB color from a `{red, green, blue}` object.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MissingField` if any channel is missing.
    pub fn from_object(value: &Value) -> Result<Self, ValueError> {
        let object = as_object(value, REQUIRED)?;
        Ok(Self::new(
            required_field(object, "red", REQUIRED)?,
            required_field(object, "green", REQUIRED)?,
            required_field(object, "blue", REQUIRED)?,
        ))
    }

    /// Parses a 6-digit hex color, with or without a leading `#`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidFormat` if the string is not exactly six
    /// hex digits after the optional hash.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValueError::InvalidFormat(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let packed = u32::from_str_radix(digits, 16)
            .map_err(|_| ValueError::InvalidFormat(hex.to_string()))?;

        let channel = |shift: u32| f64::from((packed >> shift) & 0xff) / 255.0;
        Ok(Self::new(channel(16), channel(8), channel(0)))
    }

    /// Returns the red channel.
    #[must_use]
    pub const fn red(&self) -> f64 {
        self.red
    }

    /// Returns the green channel.
    #[must_use]
    pub const fn green(&self) -> f64 {
        self.green
    }

    /// Returns the blue channel.
    #[must_use]
    pub const fn blue(&self) -> f64 {
        self.blue
    }

    /// Rounds every channel to `precision` decimal digits.
    #[must_use]
    pub fn rounded(&self, precision: u32) -> Self {
        Self::new(
            precision_round(self.red, precision),
            precision_round(self.green, precision),
            precision_round(self.blue, precision),
        )
    }

    /// Converts sRGB-encoded channels to linear light.
    #[must_use]
    pub fn gamma_corrected(&self) -> Self {
        fn transform(v: f64) -> f64 {
            if v > 0.04045 {
                ((v + 0.055) / 1.055).powf(2.4)
            } else {
                v / 12.92
            }
        }
        Self::new(transform(self.red), transform(self.green), transform(self.blue))
    }

    /// Converts linear-light channels back to sRGB encoding.
    ///
    /// This is the inverse of [`gamma_corrected`](Self::gamma_corrected).
    #[must_use]
    pub fn gamma_uncorrected(&self) -> Self {
        fn transform(v: f64) -> f64 {
            if v <= 0.003_130_8 {
                12.92 * v
            } else {
                1.055 * v.powf(1.0 / 2.4) - 0.055
            }
        }
        Self::new(transform(self.red), transform(self.green), transform(self.blue))
    }

    /// Converts to CIE xy using the Wide RGB D65 matrix.
    ///
    /// Black has no chromaticity; it maps to `(0, 0)` instead of NaN.
    #[must_use]
    pub fn to_xy(&self) -> ColorXy {
        let (r, g, b) = (self.red, self.green, self.blue);
        let x = r * 0.664_511 + g * 0.154_324 + b * 0.162_028;
        let y = r * 0.283_881 + g * 0.668_433 + b * 0.047_685;
        let z = r * 0.000_088 + g * 0.072_31 + b * 0.986_039;

        let sum = x + y + z;
        if sum == 0.0 {
            return ColorXy::new(0.0, 0.0);
        }
        ColorXy::new(x / sum, y / sum)
    }

    /// Converts to HSV with hue in degrees and saturation/value in percent.
    ///
    /// Greyscale colors (all channels equal) get hue 0.
    #[must_use]
    #[allow(clippy::float_cmp, clippy::many_single_char_names)]
    pub fn to_hsv(&self) -> ColorHsv {
        let (r, g, b) = (self.red, self.green, self.blue);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let saturation = if max == 0.0 { 0.0 } else { delta / max };
        let hue = if max == min {
            0.0
        } else if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        ColorHsv::new(Some(hue / 6.0 * 360.0), Some(saturation * 100.0), Some(max * 100.0))
    }

    /// Returns the color as a lowercase `#rrggbb` string.
    ///
    /// Channels are scaled by 255 and rounded; values outside `0.0..=1.0`
    /// saturate at `00`/`ff`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        fn byte(v: f64) -> u8 {
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        }
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }
}

impl fmt::Display for ColorRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ColorRgb {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn from_hex_with_and_without_hash() {
        let color = ColorRgb::from_hex("#ff0500").unwrap();
        assert!(close(color.red(), 1.0));
        assert!(close(color.green(), 5.0 / 255.0));
        assert!(close(color.blue(), 0.0));
        assert_eq!(ColorRgb::from_hex("ff0500").unwrap(), color);
    }

    #[test]
    fn from_hex_uppercase() {
        assert_eq!(
            ColorRgb::from_hex("#FF8000").unwrap(),
            ColorRgb::from_hex("#ff8000").unwrap()
        );
    }

    #[test]
    fn from_hex_invalid() {
        assert!(matches!(
            ColorRgb::from_hex("#gg0000"),
            Err(ValueError::InvalidFormat(_))
        ));
        assert!(ColorRgb::from_hex("#ff00").is_err());
        assert!(ColorRgb::from_hex("").is_err());
        assert!(ColorRgb::from_hex("+fffff").is_err());
        assert!(ColorRgb::from_hex("##ff0000").is_err());
    }

    #[test]
    fn to_hex_pads_and_rounds() {
        assert_eq!(ColorRgb::new(0.0, 15.0 / 255.0, 1.0).to_hex(), "#000fff");
        assert_eq!(ColorRgb::new(0.5, 0.5, 0.5).to_hex(), "#808080");
    }

    #[test]
    fn to_hex_saturates_out_of_range() {
        assert_eq!(ColorRgb::new(1.2, -0.1, 0.0).to_hex(), "#ff0000");
    }

    #[test]
    fn hex_roundtrip() {
        for hex in ["#0c32ff", "#ff77f8", "#000000", "#ffffff", "#123456"] {
            assert_eq!(ColorRgb::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn to_xy_black_is_origin() {
        let xy = ColorRgb::new(0.0, 0.0, 0.0).to_xy();
        assert_eq!(xy.x(), 0.0);
        assert_eq!(xy.y(), 0.0);
    }

    #[test]
    fn to_xy_red_primary() {
        let xy = ColorRgb::new(1.0, 0.0, 0.0).to_xy();
        assert!(close(xy.x(), 0.7006));
        assert!(close(xy.y(), 0.2993));
    }

    #[test]
    fn to_hsv_primaries() {
        let red = ColorRgb::new(1.0, 0.0, 0.0).to_hsv();
        assert_eq!(red.hue(), Some(0.0));
        assert_eq!(red.saturation(), Some(100.0));
        assert_eq!(red.value(), Some(100.0));

        let green = ColorRgb::new(0.0, 1.0, 0.0).to_hsv();
        assert!(close(green.hue().unwrap(), 120.0));

        let blue = ColorRgb::new(0.0, 0.0, 1.0).to_hsv();
        assert!(close(blue.hue().unwrap(), 240.0));

        let magenta = ColorRgb::new(1.0, 0.0, 1.0).to_hsv();
        assert!(close(magenta.hue().unwrap(), 300.0));
    }

    #[test]
    fn to_hsv_greyscale_has_zero_hue() {
        let grey = ColorRgb::new(0.4, 0.4, 0.4).to_hsv();
        assert_eq!(grey.hue(), Some(0.0));
        assert_eq!(grey.saturation(), Some(0.0));
        assert!(close(grey.value().unwrap(), 40.0));
    }

    #[test]
    fn gamma_roundtrip() {
        let color = ColorRgb::new(0.8, 0.02, 0.3);
        let back = color.gamma_corrected().gamma_uncorrected();
        assert!(close(back.red(), 0.8));
        assert!(close(back.green(), 0.02));
        assert!(close(back.blue(), 0.3));
    }

    #[test]
    fn gamma_linear_segment() {
        let linear = ColorRgb::new(0.04, 0.0, 1.0).gamma_corrected();
        assert!(close(linear.red(), 0.04 / 12.92));
        assert_eq!(linear.green(), 0.0);
        assert!(close(linear.blue(), 1.0));
    }

    #[test]
    fn rounded_is_idempotent() {
        let color = ColorRgb::new(0.123_456, 0.987_654, 0.5);
        let once = color.rounded(3);
        assert_eq!(once, once.rounded(3));
        assert_eq!(once, ColorRgb::new(0.123, 0.988, 0.5));
    }

    #[test]
    fn from_object_requires_all_channels() {
        let color = ColorRgb::from_object(&json!({"red": 1, "green": 0.5, "blue": 0})).unwrap();
        assert_eq!(color, ColorRgb::new(1.0, 0.5, 0.0));

        let err = ColorRgb::from_object(&json!({"red": 1, "green": 0.5})).unwrap_err();
        assert!(matches!(err, ValueError::MissingField { .. }));
    }

    #[test]
    fn serializes_long_field_names() {
        let value = serde_json::to_value(ColorRgb::new(1.0, 0.0, 0.5)).unwrap();
        assert_eq!(value, json!({"red": 1.0, "green": 0.0, "blue": 0.5}));
    }

    #[test]
    fn parse_via_from_str() {
        let color: ColorRgb = "#00ff00".parse().unwrap();
        assert_eq!(color, ColorRgb::new(0.0, 1.0, 0.0));
        assert_eq!(color.to_string(), "#00ff00");
    }
}
