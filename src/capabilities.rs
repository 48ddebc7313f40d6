// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device color temperature capabilities.
//!
//! Devices report the physical color temperature range they support through
//! two cluster attributes. This module derives that range for a single
//! endpoint or for a group of endpoints, and clamps requested values into it.
//!
//! Reading the attributes is the job of the caller: anything implementing
//! [`ColorTempAttributes`] can be queried, and [`ColorTempRange`] itself
//! implements it for callers that already know the range.

use std::fmt;

/// Source of the physical color temperature range of one endpoint.
///
/// Values are in mireds. `None` means the device never reported the
/// attribute.
pub trait ColorTempAttributes {
    /// Returns the `colorTempPhysicalMin` attribute.
    fn color_temp_physical_min(&self) -> Option<u16>;

    /// Returns the `colorTempPhysicalMax` attribute.
    fn color_temp_physical_max(&self) -> Option<u16>;
}

/// A single endpoint or a group of endpoints to query for a range.
#[derive(Debug)]
pub enum ColorTempSource<'a, E> {
    /// One endpoint.
    Endpoint(&'a E),
    /// The members of a group. The range is the intersection of theirs.
    Group(&'a [E]),
}

impl<E> fmt::Display for ColorTempSource<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Endpoint(_) => f.write_str("endpoint"),
            Self::Group(members) => write!(f, "group of {}", members.len()),
        }
    }
}

/// Physical color temperature range of a device, in mireds.
///
/// Either bound may be unknown; unknown bounds do not clamp.
///
/// # Examples
///
/// ```
/// use lightcolor_lib::ColorTempRange;
///
/// let range = ColorTempRange::new(Some(153), Some(454));
/// assert_eq!(range.clamp(100), 153);
/// assert_eq!(range.clamp(500), 454);
/// assert_eq!(range.clamp(300), 300);
///
/// // Unknown bounds leave values alone
/// assert_eq!(ColorTempRange::default().clamp(1000), 1000);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColorTempRange {
    /// Coolest supported value (lowest mireds).
    pub min: Option<u16>,
    /// Warmest supported value (highest mireds).
    pub max: Option<u16>,
}

impl ColorTempRange {
    /// Creates a range from optional bounds.
    #[must_use]
    pub const fn new(min: Option<u16>, max: Option<u16>) -> Self {
        Self { min, max }
    }

    /// Returns `true` if both bounds are known.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    /// Clamps `mireds` into the range.
    ///
    /// Out-of-range values move to the nearest bound with a debug message;
    /// they are never rejected.
    #[must_use]
    pub fn clamp(&self, mireds: u16) -> u16 {
        if let Some(min) = self.min {
            if mireds < min {
                tracing::debug!(
                    requested = mireds,
                    min,
                    "Requested color_temp is lower than minimum supported, using minimum"
                );
                return min;
            }
        }
        if let Some(max) = self.max {
            if mireds > max {
                tracing::debug!(
                    requested = mireds,
                    max,
                    "Requested color_temp is higher than maximum supported, using maximum"
                );
                return max;
            }
        }
        mireds
    }
}

impl ColorTempAttributes for ColorTempRange {
    fn color_temp_physical_min(&self) -> Option<u16> {
        self.min
    }

    fn color_temp_physical_max(&self) -> Option<u16> {
        self.max
    }
}

impl fmt::Display for ColorTempRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |v: Option<u16>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
        write!(f, "[{}, {}] mireds", bound(self.min), bound(self.max))
    }
}

/// Finds the physical color temperature range of an endpoint or group.
///
/// For a group, the minimum is the largest member minimum and the maximum
/// is the smallest member maximum, so every member can render the result.
/// Members that did not report a bound are skipped.
#[must_use]
pub fn find_color_temp_range<E: ColorTempAttributes>(
    source: &ColorTempSource<'_, E>,
) -> ColorTempRange {
    let range = match source {
        ColorTempSource::Endpoint(endpoint) => ColorTempRange::new(
            endpoint.color_temp_physical_min(),
            endpoint.color_temp_physical_max(),
        ),
        ColorTempSource::Group(members) => ColorTempRange::new(
            members
                .iter()
                .filter_map(ColorTempAttributes::color_temp_physical_min)
                .max(),
            members
                .iter()
                .filter_map(ColorTempAttributes::color_temp_physical_max)
                .min(),
        ),
    };

    if !range.is_complete() {
        tracing::debug!(source = %source, "Missing colorTempPhysicalMin and/or colorTempPhysicalMax");
    }
    range
}

/// Clamps `mireds` into the range of `source`.
#[must_use]
pub fn clamp_color_temp<E: ColorTempAttributes>(
    mireds: u16,
    source: &ColorTempSource<'_, E>,
) -> u16 {
    find_color_temp_range(source).clamp(mireds)
}
