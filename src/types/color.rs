// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The color union passed between converters.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ValueError;

use super::{ColorHsv, ColorRgb, ColorXy, HueCorrection, number_field};

/// A color in exactly one of the three supported representations.
///
/// # Examples
///
/// ```
/// use lightcolor_lib::types::Color;
/// use serde_json::json;
///
/// let color = Color::from_converter_arg(&json!({"x": 0.3, "y": 0.4})).unwrap();
/// assert!(color.is_xy());
///
/// let color = Color::from_converter_arg(&json!("#ff0000")).unwrap();
/// assert!(color.is_rgb());
///
/// let color = Color::from_converter_arg(&json!({"hsv": "120,100,50"})).unwrap();
/// assert!(color.is_hsv());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Hue/saturation/value, possibly partial.
    Hsv(ColorHsv),
    /// Red/green/blue.
    Rgb(ColorRgb),
    /// CIE xy chromaticity.
    Xy(ColorXy),
}

impl Color {
    /// Builds a color from an externally supplied converter argument.
    ///
    /// Shapes are tried in this order, first match wins:
    ///
    /// 1. `{x, y}`
    /// 2. `{r, g, b}` with channels in `0..=255`
    /// 3. `{rgb: "r,g,b"}`
    /// 4. `{hex: "#rrggbb"}` or a bare `"#rrggbb"` string
    /// 5. `{h, s, l}` or `{hsl: "h,s,l"}`
    /// 6. `{h, s, b}` or `{hsb: "h,s,b"}`
    /// 7. `{h, s, v}` or `{hsv: "h,s,v"}`
    /// 8. `{h, s}`, `{h}`, `{s}`
    /// 9. `{hue?, saturation?, value?}`
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NoValidColorDefinition` if no shape matches, or
    /// the error of the matched shape's constructor.
    pub fn from_converter_arg(value: &Value) -> Result<Self, ValueError> {
        let object = match value {
            Value::String(s) if s.starts_with('#') => {
                return ColorRgb::from_hex(s).map(Self::Rgb);
            }
            Value::Object(object) => object,
            _ => return Err(ValueError::NoValidColorDefinition),
        };
        let has = |key: &str| object.contains_key(key);

        if has("x") && has("y") {
            return ColorXy::from_object(value).map(Self::Xy);
        }
        if has("r") && has("g") && has("b") {
            let [r, g, b] = numbers(object, ["r", "g", "b"])?;
            return Ok(Self::Rgb(ColorRgb::new(r / 255.0, g / 255.0, b / 255.0)));
        }
        if has("rgb") {
            let [r, g, b] = csv_triplet(object, "rgb")?;
            return Ok(Self::Rgb(ColorRgb::new(r / 255.0, g / 255.0, b / 255.0)));
        }
        if has("hex") {
            let hex = string_field(object, "hex")?;
            return ColorRgb::from_hex(hex).map(Self::Rgb);
        }
        if has("h") && has("s") && has("l") {
            let [h, s, l] = numbers(object, ["h", "s", "l"])?;
            return Ok(Self::Hsv(ColorHsv::from_hsl(h, s, l)));
        }
        if has("hsl") {
            let [h, s, l] = csv_triplet(object, "hsl")?;
            return Ok(Self::Hsv(ColorHsv::from_hsl(h, s, l)));
        }
        for (third, packed) in [("b", "hsb"), ("v", "hsv")] {
            if has("h") && has("s") && has(third) {
                let [h, s, v] = numbers(object, ["h", "s", third])?;
                return Ok(Self::Hsv(ColorHsv::new(Some(h), Some(s), Some(v))));
            }
            if has(packed) {
                let [h, s, v] = csv_triplet(object, packed)?;
                return Ok(Self::Hsv(ColorHsv::new(Some(h), Some(s), Some(v))));
            }
        }
        if has("h") || has("s") {
            return Ok(Self::Hsv(ColorHsv::new(
                number_field(object, "h")?,
                number_field(object, "s")?,
                None,
            )));
        }
        if has("hue") || has("saturation") {
            return ColorHsv::from_object(value).map(Self::Hsv);
        }

        Err(ValueError::NoValidColorDefinition)
    }

    /// Returns `true` if the color holds an HSV value.
    #[must_use]
    pub const fn is_hsv(&self) -> bool {
        matches!(self, Self::Hsv(_))
    }

    /// Returns `true` if the color holds an RGB value.
    #[must_use]
    pub const fn is_rgb(&self) -> bool {
        matches!(self, Self::Rgb(_))
    }

    /// Returns `true` if the color holds an xy value.
    #[must_use]
    pub const fn is_xy(&self) -> bool {
        matches!(self, Self::Xy(_))
    }

    /// Returns the color as HSV, converting if needed.
    #[must_use]
    pub fn to_hsv(&self) -> ColorHsv {
        match self {
            Self::Hsv(hsv) => *hsv,
            Self::Rgb(rgb) => rgb.to_hsv(),
            Self::Xy(xy) => xy.to_hsv(),
        }
    }

    /// Returns the color as RGB, converting if needed.
    #[must_use]
    pub fn to_rgb(&self) -> ColorRgb {
        match self {
            Self::Hsv(hsv) => hsv.to_rgb(),
            Self::Rgb(rgb) => *rgb,
            Self::Xy(xy) => xy.to_rgb(),
        }
    }

    /// Returns the color as xy, converting if needed.
    #[must_use]
    pub fn to_xy(&self) -> ColorXy {
        match self {
            Self::Hsv(hsv) => hsv.to_xy(),
            Self::Rgb(rgb) => rgb.to_xy(),
            Self::Xy(xy) => *xy,
        }
    }

    /// Applies a hue calibration map to HSV colors; other variants are
    /// returned unchanged.
    #[must_use]
    pub fn hue_corrected(&self, correction: &HueCorrection) -> Self {
        match self {
            Self::Hsv(hsv) => Self::Hsv(hsv.hue_corrected(correction)),
            other => *other,
        }
    }
}

impl From<ColorHsv> for Color {
    fn from(hsv: ColorHsv) -> Self {
        Self::Hsv(hsv)
    }
}

impl From<ColorRgb> for Color {
    fn from(rgb: ColorRgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<ColorXy> for Color {
    fn from(xy: ColorXy) -> Self {
        Self::Xy(xy)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hsv(hsv) => hsv.fmt(f),
            Self::Rgb(rgb) => rgb.fmt(f),
            Self::Xy(xy) => xy.fmt(f),
        }
    }
}

fn numbers<const N: usize>(
    object: &Map<String, Value>,
    keys: [&str; N],
) -> Result<[f64; N], ValueError> {
    let mut out = [0.0; N];
    for (slot, key) in out.iter_mut().zip(keys) {
        *slot = number_field(object, key)?.ok_or_else(|| {
            ValueError::InvalidFormat(format!("{key}: expected a number, got null"))
        })?;
    }
    Ok(out)
}

fn string_field<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a str, ValueError> {
    object
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ValueError::InvalidFormat(format!("{key}: expected a string")))
}

// Parses "a,b,c" into three numbers
fn csv_triplet(object: &Map<String, Value>, key: &str) -> Result<[f64; 3], ValueError> {
    let raw = string_field(object, key)?;
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(ValueError::InvalidFormat(format!(
            "{key}: expected 3 comma-separated values, got {raw:?}"
        )));
    }

    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ValueError::InvalidFormat(format!("{key}: invalid component {part:?}")))?;
    }
    Ok(out)
}
