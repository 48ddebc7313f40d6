// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light color state and its synchronization.
//!
//! A light reports its color in up to three attributes: xy, hue/saturation
//! and color temperature, plus the `color_mode` telling which one is
//! authoritative. When one of them changes, [`sync_color_state`] re-derives
//! the others so the published state stays consistent.
//!
//! # Examples
//!
//! ```
//! use lightcolor_lib::state::{ColorMode, ColorState, StateColor, sync_color_state};
//! use lightcolor_lib::{ColorOptions, ColorTempRange, ColorTempSource};
//!
//! let old = ColorState {
//!     color_mode: None,
//!     color: Some(StateColor::from_xy(0.3, 0.3)),
//!     color_temp: Some(250),
//! };
//! let new = ColorState::color_temp(370);
//!
//! let device = ColorTempRange::new(Some(153), Some(500));
//! let synced = sync_color_state(
//!     &new,
//!     &old,
//!     &ColorTempSource::Endpoint(&device),
//!     &ColorOptions::default(),
//! );
//!
//! assert_eq!(synced.color_mode, Some(ColorMode::ColorTemp));
//! assert_eq!(synced.color_temp, Some(370));
//! assert!(synced.color.unwrap().x.is_some());
//! ```

mod color_state;
mod sync;

pub use color_state::{ColorMode, ColorState, StateColor};
pub use sync::sync_color_state;
