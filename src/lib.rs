// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `LightColor` Lib - Color math and payload codecs for smart lights.
//!
//! This library converts between the color representations smart lights
//! speak, keeps reported light state consistent across them, and encodes
//! and decodes the manufacturer-specific payload of gradient lights.
//!
//! Everything here is pure and synchronous: no I/O, no shared state. The
//! device layer reads attributes and sends payloads; this crate only turns
//! values into other values.
//!
//! # Supported Features
//!
//! - **Color models**: RGB, CIE xy and HSV with conversions between them
//! - **Color temperature**: mireds to xy through a Kelvin lookup table, xy
//!   to mireds through McCamy's approximation, clamping to device range
//! - **Input shapes**: `{x,y}`, `{r,g,b}`, hex, HSL, HSB/HSV and partial
//!   hue/saturation objects
//! - **State sync**: re-derive `color`, `color_temp` and `color_mode`
//! - **Gradient payloads**: gradient, xy, color temperature, effect and
//!   brightness-only modes
//!
//! # Quick Start
//!
//! ## Parsing a color request
//!
//! ```
//! use lightcolor_lib::Color;
//! use serde_json::json;
//!
//! let color = Color::from_converter_arg(&json!({"hex": "#ff0000"})).unwrap();
//! assert!(color.is_rgb());
//!
//! let xy = color.to_xy().rounded(4);
//! assert_eq!(xy.x(), 0.7006);
//! ```
//!
//! ## Encoding a gradient
//!
//! ```
//! use lightcolor_lib::GradientOptions;
//! use lightcolor_lib::gradient::{GradientRequest, encode_gradient_colors};
//!
//! let request = GradientRequest::new(vec!["#ff0000".into(), "#00ff00".into()])
//!     .with_segments(10);
//! let payload = encode_gradient_colors(&request, &GradientOptions::default()).unwrap();
//! assert!(payload.starts_with("5001"));
//! ```
//!
//! ## Decoding a light report
//!
//! ```
//! use lightcolor_lib::GradientOptions;
//! use lightcolor_lib::gradient::{PayloadMode, decode_gradient_colors};
//!
//! let payload = decode_gradient_colors("030001b2", &GradientOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert!(payload.on());
//! assert_eq!(payload.brightness(), 178);
//! assert_eq!(payload.mode(), &PayloadMode::Brightness);
//! ```

mod capabilities;
pub mod config;
pub mod error;
pub mod gradient;
pub mod state;
pub mod types;

pub use capabilities::{
    ColorTempAttributes, ColorTempRange, ColorTempSource, clamp_color_temp, find_color_temp_range,
};
pub use config::{ColorOptions, GradientOptions};
pub use error::{Error, ParseError, Result, ValidationError, ValueError};
pub use gradient::{
    Effect, Gradient, GradientRequest, LightPayload, PayloadMode, decode_gradient_colors,
    encode_gradient_colors,
};
pub use state::{ColorMode, ColorState, StateColor, sync_color_state};
pub use types::{Color, ColorHsv, ColorRgb, ColorXy, HueCorrection, HueCorrectionPoint};
