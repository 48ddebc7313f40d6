// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device options for color handling and gradient encoding.

use serde::{Deserialize, Serialize};

use crate::types::{Color, HueCorrection};

/// Color handling options of a device.
///
/// Deserializes from the device option map, ignoring unrelated keys.
///
/// # Examples
///
/// ```
/// use lightcolor_lib::ColorOptions;
///
/// let options: ColorOptions = serde_json::from_str(
///     r#"{"color_sync": false, "hue_correction": [{"in": 0, "out": 5}, {"in": 180, "out": 170}]}"#,
/// ).unwrap();
/// assert!(!options.color_sync);
/// assert_eq!(options.hue_correction.unwrap().points().len(), 2);
///
/// // Color sync is on unless disabled
/// let options: ColorOptions = serde_json::from_str("{}").unwrap();
/// assert!(options.color_sync);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorOptions {
    /// Keep `color`, `color_temp` and `color_mode` consistent in reported
    /// state by deriving the representations the device did not send.
    #[serde(default = "default_color_sync")]
    pub color_sync: bool,

    /// Hue calibration applied to HSV colors before they are sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_correction: Option<HueCorrection>,
}

fn default_color_sync() -> bool {
    true
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            color_sync: true,
            hue_correction: None,
        }
    }
}

impl ColorOptions {
    /// Creates the default options (color sync on, no hue correction).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables color sync.
    #[must_use]
    pub fn with_color_sync(mut self, enabled: bool) -> Self {
        self.color_sync = enabled;
        self
    }

    /// Sets the hue calibration map.
    #[must_use]
    pub fn with_hue_correction(mut self, correction: HueCorrection) -> Self {
        self.hue_correction = Some(correction);
        self
    }

    /// Applies the configured hue calibration to a color about to be sent.
    ///
    /// Only HSV colors are affected, and only when a calibration map is set.
    /// Reported state is never corrected.
    #[must_use]
    pub fn correct_hue(&self, color: Color) -> Color {
        match &self.hue_correction {
            Some(correction) => color.hue_corrected(correction),
            None => color,
        }
    }
}

/// Options for gradient encoding and decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientOptions {
    /// Reverse the color order, for devices whose physical segment order is
    /// inverted (the last color is at the top).
    #[serde(default)]
    pub reverse: bool,
}

impl GradientOptions {
    /// Creates options with the given color order.
    #[must_use]
    pub const fn new(reverse: bool) -> Self {
        Self { reverse }
    }

    /// Options that reverse the color order.
    #[must_use]
    pub const fn reversed() -> Self {
        Self { reverse: true }
    }
}
