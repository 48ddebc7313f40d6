// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color-related part of a light's published state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ColorHsv, ColorXy};

/// Which color attribute is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// CIE xy chromaticity.
    Xy,
    /// Hue and saturation.
    Hs,
    /// Color temperature in mireds.
    ColorTemp,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Xy => "xy",
            Self::Hs => "hs",
            Self::ColorTemp => "color_temp",
        })
    }
}

/// The `color` object of a light state.
///
/// Holds xy and/or hue/saturation; every key is optional and absent keys
/// are left out when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StateColor {
    /// CIE x coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// CIE y coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Hue in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<f64>,
    /// Saturation in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
}

impl StateColor {
    /// Creates a color object holding only xy.
    #[must_use]
    pub const fn from_xy(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            hue: None,
            saturation: None,
        }
    }

    /// Creates a color object holding only hue and saturation.
    #[must_use]
    pub const fn from_hs(hue: f64, saturation: f64) -> Self {
        Self {
            x: None,
            y: None,
            hue: Some(hue),
            saturation: Some(saturation),
        }
    }

    /// Returns the xy value if both coordinates are present.
    #[must_use]
    pub fn xy(&self) -> Option<ColorXy> {
        Some(ColorXy::new(self.x?, self.y?))
    }

    /// Returns the hue/saturation as a partial HSV value if either is present.
    #[must_use]
    pub fn hs(&self) -> Option<ColorHsv> {
        if self.hue.is_none() && self.saturation.is_none() {
            return None;
        }
        Some(ColorHsv::new(self.hue, self.saturation, None))
    }

    /// Sets the xy coordinates.
    pub fn set_xy(&mut self, xy: ColorXy) {
        self.x = Some(xy.x());
        self.y = Some(xy.y());
    }

    /// Sets hue and saturation from an HSV value; the value channel is ignored.
    pub fn set_hs(&mut self, hsv: ColorHsv) {
        self.hue = hsv.hue();
        self.saturation = hsv.saturation();
    }

    /// Returns `true` if no key is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.hue.is_none() && self.saturation.is_none()
    }
}

/// Color-related fields of a light state.
///
/// Used both for a requested partial state and for the previously known
/// state. Absent fields are left out when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorState {
    /// Authoritative color attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<ColorMode>,
    /// Color object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StateColor>,
    /// Color temperature in mireds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_temp: Option<u16>,
}

impl ColorState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding only a color temperature.
    #[must_use]
    pub const fn color_temp(mireds: u16) -> Self {
        Self {
            color_mode: None,
            color: None,
            color_temp: Some(mireds),
        }
    }

    /// Creates a state holding only a color object.
    #[must_use]
    pub const fn color(color: StateColor) -> Self {
        Self {
            color_mode: None,
            color: Some(color),
            color_temp: None,
        }
    }

    /// Sets the color mode.
    #[must_use]
    pub const fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = Some(mode);
        self
    }

    /// Returns `true` if the color object has an `x` key.
    #[must_use]
    pub fn mentions_xy(&self) -> bool {
        self.color.is_some_and(|c| c.x.is_some())
    }

    /// Returns `true` if the color object has a `hue` key.
    #[must_use]
    pub fn mentions_hue(&self) -> bool {
        self.color.is_some_and(|c| c.hue.is_some())
    }
}
