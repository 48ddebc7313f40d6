// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gradient encoding and light payload decoding.

use serde::{Deserialize, Serialize};

use super::reader::HexReader;
use super::{Effect, Gradient, LightPayload, PayloadMode};
use super::{MAX_X, MAX_Y, SET_GRADIENT_PREFIX};
use super::{TAG_BRIGHTNESS, TAG_COLOR_TEMP, TAG_EFFECT, TAG_GRADIENT, TAG_XY};
use crate::config::GradientOptions;
use crate::error::{ParseError, ValueError};
use crate::types::{ColorRgb, ColorXy};

/// Largest 12-bit fixed-point coordinate.
const FIXED_MAX: f64 = 4095.0;

/// Gradient colors to send to a light.
///
/// Deserializes from `{"colors": [...], "segments"?: n, "offset"?: n}`.
/// `segments` defaults to the number of colors and `offset` to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientRequest {
    /// Colors as `#rrggbb` strings.
    pub colors: Vec<String>,
    /// Number of segments the colors are spread over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<u8>,
    /// Segment offset of the first color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u8>,
}

impl GradientRequest {
    /// Creates a request with default segments and offset.
    #[must_use]
    pub const fn new(colors: Vec<String>) -> Self {
        Self {
            colors,
            segments: None,
            offset: None,
        }
    }

    /// Sets the segment count.
    #[must_use]
    pub const fn with_segments(mut self, segments: u8) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Sets the segment offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: u8) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Resolves defaults into a [`Gradient`].
    ///
    /// More than 255 colors saturate the default segment count; validation
    /// rejects them either way.
    #[must_use]
    pub fn to_gradient(&self) -> Gradient {
        let count = u8::try_from(self.colors.len()).unwrap_or(u8::MAX);
        Gradient::new(
            self.colors.clone(),
            self.segments.unwrap_or(count),
            self.offset.unwrap_or(0),
        )
    }
}

/// Encodes gradient colors into a set-gradient command payload.
///
/// The payload is `5001` `0400`, a length byte, the color count in the
/// high nibble of a byte, three reserved zero bytes, the packed colors,
/// then segments and offset each shifted left by 3 bits.
///
/// # Errors
///
/// Returns [`ValidationError`](crate::error::ValidationError) if there are
/// not 1 to 9 colors, segments are outside 1..=31 or offset is outside
/// 0..=31, and [`ValueError::InvalidFormat`] for a color that is not
/// `#rrggbb`. Nothing is encoded on error.
///
/// # Examples
///
/// ```
/// use lightcolor_lib::gradient::{GradientRequest, encode_gradient_colors};
/// use lightcolor_lib::GradientOptions;
///
/// let colors = ["#0c32ff", "#1137ff", "#2538ff", "#7951ff", "#ff77f8"];
/// let request = GradientRequest::new(colors.iter().map(ToString::to_string).collect());
///
/// let encoded = encode_gradient_colors(&request, &GradientOptions::reversed()).unwrap();
/// assert_eq!(encoded, "500104001350000000b2474df0353e29e42e98332c7043292800");
/// ```
pub fn encode_gradient_colors(
    request: &GradientRequest,
    options: &GradientOptions,
) -> crate::Result<String> {
    let mut out = String::from(SET_GRADIENT_PREFIX);
    push_gradient_body(&mut out, &request.to_gradient(), options)?;
    Ok(out)
}

/// Decodes a light state payload.
///
/// Input may be upper or lower case. Returns `Ok(None)` for an unknown
/// mode tag, so newer firmware modes degrade to an empty result. Bytes past
/// the fields of the mode are ignored.
///
/// # Errors
///
/// Returns [`ParseError::InvalidHex`] for non-hex input and
/// [`ParseError::Truncated`] when a field runs past the end.
///
/// # Examples
///
/// ```
/// use lightcolor_lib::gradient::{PayloadMode, decode_gradient_colors};
/// use lightcolor_lib::GradientOptions;
///
/// let payload = decode_gradient_colors("0f00011dfa0094611b61", &GradientOptions::default())
///     .unwrap()
///     .unwrap();
/// assert!(payload.on());
/// assert_eq!(payload.mode(), &PayloadMode::ColorTemp(250));
///
/// // Unknown modes decode to nothing
/// assert!(decode_gradient_colors("ffff01b2", &GradientOptions::default()).unwrap().is_none());
/// ```
pub fn decode_gradient_colors(
    payload: &str,
    options: &GradientOptions,
) -> Result<Option<LightPayload>, ParseError> {
    let payload = payload.trim().to_ascii_lowercase();
    let mut reader = HexReader::new(&payload)?;

    let tag = reader.take("mode", 4)?;
    let Some(kind) = ModeTag::parse(tag) else {
        tracing::warn!(tag = %tag, payload = %payload, "Unknown light payload mode");
        return Ok(None);
    };

    let on = reader.byte("on")? == 1;
    let brightness = reader.byte("brightness")?;

    let mode = match kind {
        ModeTag::Gradient => PayloadMode::Gradient(read_gradient(&mut reader, options)?),
        ModeTag::Xy => PayloadMode::Xy(read_xy(&mut reader)?),
        ModeTag::ColorTemp => PayloadMode::ColorTemp(reader.u16_le("color_temp")?),
        ModeTag::Effect => {
            let xy = read_xy(&mut reader)?;
            let effect = Effect::from_code(reader.take("effect", 4)?);
            PayloadMode::Effect { xy, effect }
        }
        ModeTag::Brightness => PayloadMode::Brightness,
    };

    tracing::trace!(tag = %tag, on, brightness, ?mode, "Decoded light payload");
    Ok(Some(LightPayload::new(on, brightness, mode)))
}

#[derive(Debug, Clone, Copy)]
enum ModeTag {
    Gradient,
    Xy,
    ColorTemp,
    Effect,
    Brightness,
}

impl ModeTag {
    fn parse(tag: &str) -> Option<Self> {
        match tag {
            TAG_GRADIENT => Some(Self::Gradient),
            TAG_XY => Some(Self::Xy),
            TAG_COLOR_TEMP => Some(Self::ColorTemp),
            TAG_EFFECT => Some(Self::Effect),
            TAG_BRIGHTNESS => Some(Self::Brightness),
            _ => None,
        }
    }
}

fn read_gradient(
    reader: &mut HexReader<'_>,
    options: &GradientOptions,
) -> Result<Gradient, ParseError> {
    reader.skip("reserved", 8)?;
    reader.skip("length", 2)?;
    let count = reader.byte("color count")? >> 4;
    reader.skip("reserved", 6)?;

    let mut colors = (0..count)
        .map(|_| reader.take("color", 6).and_then(unpack_color))
        .collect::<Result<Vec<_>, _>>()?;
    if options.reverse {
        colors.reverse();
    }

    let segments = reader.byte("segments")? >> 3;
    let offset = reader.byte("offset")? >> 3;
    Ok(Gradient::new(colors, segments, offset))
}

fn read_xy(reader: &mut HexReader<'_>) -> Result<ColorXy, ParseError> {
    let x = reader.u16_le("x")?;
    let y = reader.u16_le("y")?;
    Ok(ColorXy::new(
        f64::from(x) / f64::from(u16::MAX),
        f64::from(y) / f64::from(u16::MAX),
    )
    .rounded(4))
}

/// Appends the gradient body shared by set commands and reports.
pub(crate) fn push_gradient_body(
    out: &mut String,
    gradient: &Gradient,
    options: &GradientOptions,
) -> crate::Result<()> {
    gradient.validate()?;

    let mut packed = gradient
        .colors
        .iter()
        .map(String::as_str)
        .map(pack_color)
        .collect::<Result<Vec<_>, _>>()?;
    if options.reverse {
        packed.reverse();
    }

    // validated to 1..=9 colors above
    let count = u8::try_from(packed.len()).unwrap_or(u8::MAX);
    push_byte(out, 4 + 3 * count);
    push_byte(out, count << 4);
    out.push_str("000000");
    for color in &packed {
        out.push_str(color);
    }
    push_byte(out, gradient.segments << 3);
    push_byte(out, gradient.offset << 3);
    Ok(())
}

pub(crate) fn push_byte(out: &mut String, byte: u8) {
    out.push_str(&format!("{byte:02x}"));
}

pub(crate) fn push_u16_le(out: &mut String, value: u16) {
    for byte in value.to_le_bytes() {
        push_byte(out, byte);
    }
}

pub(crate) fn push_xy(out: &mut String, xy: ColorXy) {
    push_u16_le(out, scale(xy.x(), 1.0, f64::from(u16::MAX)));
    push_u16_le(out, scale(xy.y(), 1.0, f64::from(u16::MAX)));
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(value: f64, max: f64, steps: f64) -> u16 {
    let scaled = (value * steps / max).round();
    if scaled.is_finite() {
        scaled.clamp(0.0, steps) as u16
    } else {
        0
    }
}

/// Packs a `#rrggbb` color into 6 hex chars `[x1, x2, y2, x0, y0, y1]`.
fn pack_color(hex: &str) -> Result<String, ValueError> {
    let xy = ColorRgb::from_hex(hex)?.to_xy();
    let x = format!("{:03x}", scale(xy.x(), MAX_X, FIXED_MAX));
    let y = format!("{:03x}", scale(xy.y(), MAX_Y, FIXED_MAX));
    let (x, y) = (x.as_bytes(), y.as_bytes());
    Ok([x[1], x[2], y[2], x[0], y[0], y[1]]
        .into_iter()
        .map(char::from)
        .collect())
}

/// Unpacks 6 hex chars into a lowercase `#rrggbb` color.
fn unpack_color(packed: &str) -> Result<String, ParseError> {
    let digits = packed
        .chars()
        .map(|c| c.to_digit(16).and_then(|d| u16::try_from(d).ok()))
        .collect::<Option<Vec<u16>>>()
        .ok_or_else(|| ParseError::InvalidHex(packed.to_string()))?;
    let &[d0, d1, d2, d3, d4, d5] = digits.as_slice() else {
        return Err(ParseError::Truncated {
            field: "color",
            needed: 6,
            available: digits.len(),
        });
    };

    let x = (d3 << 8) | (d0 << 4) | d1;
    let y = (d4 << 8) | (d5 << 4) | d2;
    let xy = ColorXy::new(
        f64::from(x) * MAX_X / FIXED_MAX,
        f64::from(y) * MAX_Y / FIXED_MAX,
    )
    .rounded(4);
    Ok(xy.to_rgb().to_hex())
}
