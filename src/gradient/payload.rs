// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded light state payloads.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::codec::{push_byte, push_gradient_body, push_u16_le, push_xy};
use super::{Effect, TAG_BRIGHTNESS, TAG_COLOR_TEMP, TAG_EFFECT, TAG_GRADIENT, TAG_XY};
use super::{COLOR_COUNT_RANGE, OFFSET_RANGE, SEGMENTS_RANGE};
use crate::config::GradientOptions;
use crate::error::{ValidationError, ValueError};
use crate::types::ColorXy;

/// A multi-segment gradient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    /// Colors as lowercase `#rrggbb` strings, in logical order.
    pub colors: Vec<String>,
    /// Number of segments the colors are spread over.
    pub segments: u8,
    /// Segment offset of the first color.
    pub offset: u8,
}

impl Gradient {
    /// Creates a gradient.
    #[must_use]
    pub const fn new(colors: Vec<String>, segments: u8, offset: u8) -> Self {
        Self {
            colors,
            segments,
            offset,
        }
    }

    /// Checks the color count, segment count and offset bounds.
    ///
    /// # Errors
    ///
    /// Returns the first violated bound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !COLOR_COUNT_RANGE.contains(&self.colors.len()) {
            return Err(ValidationError::ColorCount(self.colors.len()));
        }
        if !SEGMENTS_RANGE.contains(&self.segments) {
            return Err(ValidationError::Segments(self.segments));
        }
        if !OFFSET_RANGE.contains(&self.offset) {
            return Err(ValidationError::Offset(self.offset));
        }
        Ok(())
    }
}

/// Mode-specific part of a light payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadMode {
    /// Multi-segment gradient.
    Gradient(Gradient),
    /// Single xy color.
    Xy(ColorXy),
    /// Color temperature in mireds.
    ColorTemp(u16),
    /// Effect playing over an xy color.
    Effect {
        /// Base color.
        xy: ColorXy,
        /// Running effect.
        effect: Effect,
    },
    /// Only on/off and brightness.
    Brightness,
}

impl PayloadMode {
    /// Returns the `color_mode` reported for this mode.
    ///
    /// Effects report `xy`; brightness-only payloads report none.
    #[must_use]
    pub const fn color_mode(&self) -> Option<&'static str> {
        match self {
            Self::Gradient(_) => Some("gradient"),
            Self::Xy(_) | Self::Effect { .. } => Some("xy"),
            Self::ColorTemp(_) => Some("color_temp"),
            Self::Brightness => None,
        }
    }

    pub(crate) const fn tag(&self) -> &'static str {
        match self {
            Self::Gradient(_) => TAG_GRADIENT,
            Self::Xy(_) => TAG_XY,
            Self::ColorTemp(_) => TAG_COLOR_TEMP,
            Self::Effect { .. } => TAG_EFFECT,
            Self::Brightness => TAG_BRIGHTNESS,
        }
    }
}

/// A decoded light state payload.
///
/// Serializes to the flat object published as device state:
/// `{color_mode?, on, brightness, ...mode fields}`.
///
/// # Examples
///
/// ```
/// use lightcolor_lib::gradient::{LightPayload, PayloadMode};
/// use lightcolor_lib::GradientOptions;
///
/// let payload = LightPayload::new(true, 178, PayloadMode::ColorTemp(250));
/// let encoded = payload.encode(&GradientOptions::default()).unwrap();
/// assert_eq!(encoded, "0f0001b2fa00");
///
/// let json = serde_json::to_value(&payload).unwrap();
/// assert_eq!(json["color_mode"], "color_temp");
/// assert_eq!(json["color_temp"], 250);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LightPayload {
    on: bool,
    brightness: u8,
    mode: PayloadMode,
}

impl LightPayload {
    /// Creates a payload.
    #[must_use]
    pub const fn new(on: bool, brightness: u8, mode: PayloadMode) -> Self {
        Self {
            on,
            brightness,
            mode,
        }
    }

    /// Returns whether the light is on.
    #[must_use]
    pub const fn on(&self) -> bool {
        self.on
    }

    /// Returns the brightness (0-255).
    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Returns the mode-specific part.
    #[must_use]
    pub const fn mode(&self) -> &PayloadMode {
        &self.mode
    }

    /// Returns the gradient, if this is a gradient payload.
    #[must_use]
    pub const fn gradient(&self) -> Option<&Gradient> {
        match &self.mode {
            PayloadMode::Gradient(gradient) => Some(gradient),
            _ => None,
        }
    }

    /// Encodes the payload in its report form.
    ///
    /// Gradient reserved bytes are written as zeros. Decoding the result
    /// with the same options yields an equal payload.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-bounds gradients, and a value
    /// error for malformed gradient colors or a non-hex effect code.
    pub fn encode(&self, options: &GradientOptions) -> crate::Result<String> {
        let mut out = String::from(self.mode.tag());
        push_byte(&mut out, u8::from(self.on));
        push_byte(&mut out, self.brightness);

        match &self.mode {
            PayloadMode::Gradient(gradient) => {
                out.push_str("00000000");
                push_gradient_body(&mut out, gradient, options)?;
            }
            PayloadMode::Xy(xy) => push_xy(&mut out, *xy),
            PayloadMode::ColorTemp(mireds) => push_u16_le(&mut out, *mireds),
            PayloadMode::Effect { xy, effect } => {
                let code = effect.code();
                if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(ValueError::InvalidFormat(format!("effect code: {code}")).into());
                }
                push_xy(&mut out, *xy);
                out.push_str(&code.to_ascii_lowercase());
            }
            PayloadMode::Brightness => {}
        }
        Ok(out)
    }
}

impl Serialize for LightPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(color_mode) = self.mode.color_mode() {
            map.serialize_entry("color_mode", color_mode)?;
        }
        map.serialize_entry("on", &self.on)?;
        map.serialize_entry("brightness", &self.brightness)?;
        match &self.mode {
            PayloadMode::Gradient(gradient) => {
                map.serialize_entry("colors", &gradient.colors)?;
                map.serialize_entry("segments", &gradient.segments)?;
                map.serialize_entry("offset", &gradient.offset)?;
            }
            PayloadMode::Xy(xy) => {
                map.serialize_entry("x", &xy.x())?;
                map.serialize_entry("y", &xy.y())?;
            }
            PayloadMode::ColorTemp(mireds) => {
                map.serialize_entry("color_temp", mireds)?;
            }
            PayloadMode::Effect { xy, effect } => {
                map.serialize_entry("x", &xy.x())?;
                map.serialize_entry("y", &xy.y())?;
                map.serialize_entry("name", &effect.name())?;
            }
            PayloadMode::Brightness => {}
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn colors(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn gradient_validation_bounds() {
        assert!(Gradient::new(colors(&["#ff0000"]), 1, 0).validate().is_ok());
        assert!(Gradient::new(colors(&["#ff0000"; 9]), 31, 31).validate().is_ok());
        assert_eq!(
            Gradient::new(vec![], 1, 0).validate(),
            Err(ValidationError::ColorCount(0))
        );
        assert_eq!(
            Gradient::new(colors(&["#ff0000"; 10]), 10, 0).validate(),
            Err(ValidationError::ColorCount(10))
        );
        assert_eq!(
            Gradient::new(colors(&["#ff0000"]), 0, 0).validate(),
            Err(ValidationError::Segments(0))
        );
        assert_eq!(
            Gradient::new(colors(&["#ff0000"]), 32, 0).validate(),
            Err(ValidationError::Segments(32))
        );
        assert_eq!(
            Gradient::new(colors(&["#ff0000"]), 5, 32).validate(),
            Err(ValidationError::Offset(32))
        );
    }

    #[test]
    fn color_mode_per_variant() {
        let xy = ColorXy::new(0.3, 0.3);
        assert_eq!(PayloadMode::Xy(xy).color_mode(), Some("xy"));
        assert_eq!(
            PayloadMode::Effect {
                xy,
                effect: Effect::Candle
            }
            .color_mode(),
            Some("xy")
        );
        assert_eq!(PayloadMode::ColorTemp(250).color_mode(), Some("color_temp"));
        assert_eq!(PayloadMode::Brightness.color_mode(), None);
    }

    #[test]
    fn encode_xy() {
        let payload = LightPayload::new(true, 0x5c, PayloadMode::Xy(ColorXy::new(0.6915, 0.3083)));
        assert_eq!(
            payload.encode(&GradientOptions::default()).unwrap(),
            "0b00015c05b1ec4e"
        );
    }

    #[test]
    fn encode_brightness_only() {
        let payload = LightPayload::new(false, 0x4f, PayloadMode::Brightness);
        assert_eq!(payload.encode(&GradientOptions::default()).unwrap(), "0300004f");
    }

    #[test]
    fn encode_effect_appends_code() {
        let payload = LightPayload::new(
            true,
            0xfe,
            PayloadMode::Effect {
                xy: ColorXy::new(0.6915, 0.3083),
                effect: Effect::Sunset,
            },
        );
        assert_eq!(
            payload.encode(&GradientOptions::default()).unwrap(),
            "ab0001fe05b1ec4e0d80"
        );
    }

    #[test]
    fn encode_rejects_malformed_effect_code() {
        let payload = LightPayload::new(
            true,
            1,
            PayloadMode::Effect {
                xy: ColorXy::new(0.3, 0.3),
                effect: Effect::from_code("xyz"),
            },
        );
        assert!(matches!(
            payload.encode(&GradientOptions::default()),
            Err(crate::Error::Value(ValueError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn encode_rejects_invalid_gradient() {
        let payload = LightPayload::new(
            true,
            1,
            PayloadMode::Gradient(Gradient::new(colors(&["#ff0000"]), 0, 0)),
        );
        assert_eq!(
            payload.encode(&GradientOptions::default()),
            Err(crate::Error::Validation(ValidationError::Segments(0)))
        );
    }

    #[test]
    fn serialize_gradient() {
        let payload = LightPayload::new(
            true,
            178,
            PayloadMode::Gradient(Gradient::new(colors(&["#ff0000", "#0000ff"]), 2, 0)),
        );
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "color_mode": "gradient",
                "on": true,
                "brightness": 178,
                "colors": ["#ff0000", "#0000ff"],
                "segments": 2,
                "offset": 0,
            })
        );
    }

    #[test]
    fn serialize_effect_and_brightness() {
        let payload = LightPayload::new(
            false,
            10,
            PayloadMode::Effect {
                xy: ColorXy::new(0.5, 0.4),
                effect: Effect::Candle,
            },
        );
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"color_mode": "xy", "on": false, "brightness": 10, "x": 0.5, "y": 0.4, "name": "candle"})
        );

        let payload = LightPayload::new(true, 178, PayloadMode::Brightness);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"on": true, "brightness": 178})
        );
    }
}
