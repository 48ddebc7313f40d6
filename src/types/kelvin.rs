// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Kelvin to CIE xy lookup along the Planckian locus.
//!
//! The table holds one chromaticity per whole Kelvin, computed once on first
//! use from the cubic spline approximation of Kim et al. ("Design of Advanced
//! Color Temperature Control System for HDTV Applications", 2002). Entries
//! are rounded to four decimals.

use std::sync::LazyLock;

use crate::error::ValueError;

use super::precision_round;

/// Lowest color temperature covered by the lookup table.
pub const KELVIN_MIN: u32 = 1667;

/// Highest color temperature covered by the lookup table.
pub const KELVIN_MAX: u32 = 25_000;

static KELVIN_TO_XY: LazyLock<Vec<(f64, f64)>> = LazyLock::new(generate_kelvin_table);

fn generate_kelvin_table() -> Vec<(f64, f64)> {
    (KELVIN_MIN..=KELVIN_MAX).map(planckian_xy).collect()
}

#[allow(clippy::suboptimal_flops)]
fn planckian_xy(kelvin: u32) -> (f64, f64) {
    let t = f64::from(kelvin);
    let t2 = t * t;
    let t3 = t2 * t;

    let x = if kelvin <= 4000 {
        -0.266_123_9e9 / t3 - 0.234_358_9e6 / t2 + 0.877_695_6e3 / t + 0.179_910
    } else {
        -3.025_846_9e9 / t3 + 2.107_037_9e6 / t2 + 0.222_634_7e3 / t + 0.240_390
    };

    let x2 = x * x;
    let x3 = x2 * x;
    let y = if kelvin <= 2222 {
        -1.106_381_4 * x3 - 1.348_110_20 * x2 + 2.185_558_32 * x - 0.202_196_83
    } else if kelvin <= 4000 {
        -0.954_947_6 * x3 - 1.374_185_93 * x2 + 2.091_370_15 * x - 0.167_488_67
    } else {
        3.081_758_0 * x3 - 5.873_386_7 * x2 + 3.751_129_97 * x - 0.370_014_83
    };

    (precision_round(x, 4), precision_round(y, 4))
}

/// Looks up the chromaticity of a whole Kelvin value.
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` if `kelvin` is outside
/// [`KELVIN_MIN`]..=[`KELVIN_MAX`]. Values are never extrapolated.
pub(crate) fn lookup(kelvin: u32) -> Result<(f64, f64), ValueError> {
    if !(KELVIN_MIN..=KELVIN_MAX).contains(&kelvin) {
        return Err(ValueError::OutOfRange {
            min: KELVIN_MIN,
            max: KELVIN_MAX,
            actual: kelvin,
        });
    }
    let index = usize::try_from(kelvin - KELVIN_MIN).map_err(|_| ValueError::OutOfRange {
        min: KELVIN_MIN,
        max: KELVIN_MAX,
        actual: kelvin,
    })?;
    Ok(KELVIN_TO_XY[index])
}

/// Converts mireds (micro reciprocal degrees) to Kelvin.
#[must_use]
pub fn mireds_to_kelvin(mireds: f64) -> f64 {
    1_000_000.0 / mireds
}

/// Converts Kelvin to mireds.
#[must_use]
pub fn kelvin_to_mireds(kelvin: f64) -> f64 {
    1_000_000.0 / kelvin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_whole_range() {
        assert_eq!(KELVIN_TO_XY.len(), (KELVIN_MAX - KELVIN_MIN + 1) as usize);
    }

    #[test]
    fn lookup_d65_neighbourhood() {
        let (x, y) = lookup(6500).unwrap();
        assert!((x - 0.3135).abs() < 0.002, "x = {x}");
        assert!((y - 0.3237).abs() < 0.002, "y = {y}");
    }

    #[test]
    fn lookup_warm_white() {
        let (x, y) = lookup(2700).unwrap();
        assert!((x - 0.4599).abs() < 0.002, "x = {x}");
        assert!((y - 0.4106).abs() < 0.002, "y = {y}");
    }

    #[test]
    fn lookup_is_monotonic_in_x() {
        let (warm, _) = lookup(2000).unwrap();
        let (cool, _) = lookup(10_000).unwrap();
        assert!(warm > cool);
    }

    #[test]
    fn lookup_outside_table_fails() {
        assert_eq!(
            lookup(1000),
            Err(ValueError::OutOfRange {
                min: KELVIN_MIN,
                max: KELVIN_MAX,
                actual: 1000,
            })
        );
        assert!(lookup(KELVIN_MAX + 1).is_err());
        assert!(lookup(KELVIN_MIN).is_ok());
        assert!(lookup(KELVIN_MAX).is_ok());
    }

    #[test]
    fn mired_kelvin_inverse() {
        assert!((mireds_to_kelvin(250.0) - 4000.0).abs() < 1e-9);
        assert!((kelvin_to_mireds(2000.0) - 500.0).abs() < 1e-9);
    }
}
