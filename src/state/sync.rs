// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synchronization of the color attributes of a light state.

use crate::capabilities::{ColorTempAttributes, ColorTempSource, clamp_color_temp};
use crate::config::ColorOptions;
use crate::types::{ColorHsv, ColorXy};

use super::{ColorMode, ColorState, StateColor};

/// Attributes the device is known to report, and therefore to re-derive.
#[derive(Debug, Clone, Copy, Default)]
struct Targets {
    color_temp: bool,
    xy: bool,
    hs: bool,
}

impl Targets {
    fn of(new: &ColorState, old: &ColorState) -> Self {
        Self {
            color_temp: new.color_temp.is_some() || old.color_temp.is_some(),
            xy: new.mentions_xy() || old.mentions_xy(),
            hs: new.mentions_hue() || old.mentions_hue(),
        }
    }
}

/// Merges a requested partial state into the previous state, keeping
/// `color_mode`, `color` and `color_temp` consistent.
///
/// With `color_sync` disabled, the three fields of `new` are returned
/// unchanged. Otherwise:
///
/// 1. The mode is `new.color_mode`, else `old.color_mode`, else inferred
///    from `new`: `color_temp` present means color temperature, a `hue`
///    means hue/saturation, anything else xy.
/// 2. An attribute is re-derived only if `new` or `old` mentions it, so
///    attributes the device never reports are not invented.
/// 3. The mode's source value is taken from `new`, falling back to `old`,
///    and converted into every other target. Derived xy is rounded to four
///    decimals, derived hue/saturation to whole numbers, and derived color
///    temperature is clamped into the range reported by `source`.
///
/// A color temperature the device accepts but the Kelvin lookup table does
/// not cover keeps its `color_mode` and `color_temp`; only the xy and
/// hue/saturation targets are left out.
///
/// The returned `color` is `None` when it would be empty. Only `color_sync`
/// is read from `options`; hue correction applies to outgoing colors, see
/// [`ColorOptions::correct_hue`].
#[must_use]
pub fn sync_color_state<E: ColorTempAttributes>(
    new: &ColorState,
    old: &ColorState,
    source: &ColorTempSource<'_, E>,
    options: &ColorOptions,
) -> ColorState {
    if !options.color_sync {
        return ColorState {
            color_mode: new.color_mode,
            color: new.color,
            color_temp: new.color_temp,
        };
    }

    let mode = new
        .color_mode
        .or(old.color_mode)
        .unwrap_or_else(|| infer_mode(new));
    let targets = Targets::of(new, old);
    tracing::trace!(mode = %mode, ?targets, "Synchronizing color state");

    let clamp = |mireds: f64| clamp_color_temp(mireds_to_u16(mireds), source);

    let mut color = StateColor::default();
    let mut color_temp = None;

    match mode {
        ColorMode::Hs => {
            if let Some(hsv) = source_hs(new, old) {
                color.set_hs(hsv);
                if targets.xy {
                    color.set_xy(hsv.to_xy().rounded(4));
                }
                if targets.color_temp {
                    color_temp = Some(clamp(hsv.to_mireds()));
                }
            }
        }
        ColorMode::Xy => {
            if let Some(xy) = source_xy(new, old) {
                color.set_xy(xy);
                if targets.hs {
                    color.set_hs(xy.to_hsv().rounded(0));
                }
                if targets.color_temp {
                    color_temp = Some(clamp(xy.to_mireds()));
                }
            }
        }
        ColorMode::ColorTemp => {
            if let Some(requested) = new.color_temp.or(old.color_temp) {
                let mireds = clamp_color_temp(requested, source);
                color_temp = Some(mireds);
                if targets.xy || targets.hs {
                    match ColorXy::from_mireds(f64::from(mireds)) {
                        Ok(xy) => {
                            if targets.xy {
                                color.set_xy(xy.rounded(4));
                            }
                            if targets.hs {
                                color.set_hs(xy.to_hsv().rounded(0));
                            }
                        }
                        Err(error) => {
                            tracing::debug!(
                                mireds,
                                error = %error,
                                "Color temperature has no xy equivalent, skipping color"
                            );
                        }
                    }
                }
            }
        }
    }

    ColorState {
        color_mode: Some(mode),
        color: (!color.is_empty()).then_some(color),
        color_temp,
    }
}

fn infer_mode(new: &ColorState) -> ColorMode {
    if new.color_temp.is_some() {
        ColorMode::ColorTemp
    } else if new.mentions_hue() {
        ColorMode::Hs
    } else {
        ColorMode::Xy
    }
}

fn source_hs(new: &ColorState, old: &ColorState) -> Option<ColorHsv> {
    let hue = new.color.and_then(|c| c.hue).or(old.color.and_then(|c| c.hue));
    let saturation = new
        .color
        .and_then(|c| c.saturation)
        .or(old.color.and_then(|c| c.saturation));
    StateColor {
        hue,
        saturation,
        ..StateColor::default()
    }
    .hs()
}

// xy is taken as a pair: a lone new coordinate never mixes with an old one
fn source_xy(new: &ColorState, old: &ColorState) -> Option<ColorXy> {
    new.color
        .and_then(|c| c.xy())
        .or_else(|| old.color.and_then(|c| c.xy()))
}

// NaN and negative mireds floor to 0
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mireds_to_u16(mireds: f64) -> u16 {
    if mireds.is_finite() {
        mireds.round().clamp(0.0, f64::from(u16::MAX)) as u16
    } else {
        0
    }
}
