// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Codec for the manufacturer-specific light state payload of gradient lights.
//!
//! The payload is a byte string exchanged as lowercase hex. The first two
//! bytes are a mode tag selecting the layout of the rest:
//!
//! | Tag    | Mode        | Body after on/off and brightness bytes          |
//! |--------|-------------|-------------------------------------------------|
//! | `4b01` | gradient    | reserved bytes, color count, packed colors, segments, offset |
//! | `0b00` | xy          | x and y as little-endian 16-bit fractions       |
//! | `0f00` | color temp  | mireds as a little-endian 16-bit value          |
//! | `ab00` | effect      | x, y, then a 2-byte effect code                 |
//! | `0300` | brightness  | nothing                                         |
//!
//! Gradient colors are packed into 3 bytes each: x and y are scaled to
//! 12-bit fixed point (`x * 4095 / 0.7347`, `y * 4095 / 0.8413`) and their
//! hex digits interleaved as `[x1, x2, y2, x0, y0, y1]`.
//!
//! # Examples
//!
//! ```
//! use lightcolor_lib::gradient::{GradientRequest, decode_gradient_colors, encode_gradient_colors};
//! use lightcolor_lib::GradientOptions;
//!
//! let request = GradientRequest::new(vec!["#ff0000".into(), "#0000ff".into()]);
//! let encoded = encode_gradient_colors(&request, &GradientOptions::default()).unwrap();
//! assert!(encoded.starts_with("50010400"));
//! ```

mod codec;
mod effect;
mod payload;
mod reader;

pub use codec::{GradientRequest, decode_gradient_colors, encode_gradient_colors};
pub use effect::{Effect, UnknownEffect};
pub use payload::{Gradient, LightPayload, PayloadMode};

/// Mode tag of a gradient report.
pub(crate) const TAG_GRADIENT: &str = "4b01";
/// Mode tag of a single xy color.
pub(crate) const TAG_XY: &str = "0b00";
/// Mode tag of a color temperature.
pub(crate) const TAG_COLOR_TEMP: &str = "0f00";
/// Mode tag of an effect with its xy color.
pub(crate) const TAG_EFFECT: &str = "ab00";
/// Mode tag of an on/off and brightness only payload.
pub(crate) const TAG_BRIGHTNESS: &str = "0300";

/// Prefix of a gradient set command: command tag and reserved marker.
pub(crate) const SET_GRADIENT_PREFIX: &str = "50010400";

/// Largest x a packed gradient color can carry.
pub(crate) const MAX_X: f64 = 0.7347;
/// Largest y a packed gradient color can carry.
pub(crate) const MAX_Y: f64 = 0.8413;

/// Allowed number of colors in a gradient.
pub const COLOR_COUNT_RANGE: std::ops::RangeInclusive<usize> = 1..=9;
/// Allowed number of segments.
pub const SEGMENTS_RANGE: std::ops::RangeInclusive<u8> = 1..=31;
/// Allowed segment offset.
pub const OFFSET_RANGE: std::ops::RangeInclusive<u8> = 0..=31;
