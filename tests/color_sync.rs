// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for color conversion and state synchronization.

use lightcolor_lib::{
    Color, ColorHsv, ColorMode, ColorOptions, ColorState, ColorTempAttributes, ColorTempRange,
    ColorTempSource, ColorXy, HueCorrection, StateColor, ValueError, sync_color_state,
};
use serde_json::json;

fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}

/// Endpoint as the device layer would expose it.
struct Endpoint {
    min: Option<u16>,
    max: Option<u16>,
}

impl ColorTempAttributes for Endpoint {
    fn color_temp_physical_min(&self) -> Option<u16> {
        self.min
    }

    fn color_temp_physical_max(&self) -> Option<u16> {
        self.max
    }
}

const BULB: Endpoint = Endpoint {
    min: Some(153),
    max: Some(500),
};

fn sync(new: serde_json::Value, old: serde_json::Value) -> serde_json::Value {
    let new: ColorState = serde_json::from_value(new).unwrap();
    let old: ColorState = serde_json::from_value(old).unwrap();
    let synced = sync_color_state(
        &new,
        &old,
        &ColorTempSource::Endpoint(&BULB),
        &ColorOptions::default(),
    );
    serde_json::to_value(synced).unwrap()
}

// ============================================================================
// Color input shapes
// ============================================================================

mod converter_args {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_shape_converts_to_red() {
        for arg in [
            json!({"x": 0.7006, "y": 0.2993}),
            json!({"r": 255, "g": 0, "b": 0}),
            json!({"rgb": "255,0,0"}),
            json!({"hex": "#ff0000"}),
            json!("#FF0000"),
            json!({"h": 0, "s": 100, "l": 50}),
            json!({"hsl": "0,100,50"}),
            json!({"h": 0, "s": 100, "b": 100}),
            json!({"hsb": "0,100,100"}),
            json!({"h": 0, "s": 100, "v": 100}),
            json!({"hsv": "0,100,100"}),
            json!({"hue": 0, "saturation": 100}),
        ] {
            let color = Color::from_converter_arg(&arg).unwrap();
            assert_eq!(color.to_rgb().to_hex(), "#ff0000", "{arg}");
        }
    }

    #[test]
    fn unmatched_shape_is_an_error() {
        assert_eq!(
            Color::from_converter_arg(&json!({"red": 1})),
            Err(ValueError::NoValidColorDefinition)
        );
    }

    #[test]
    fn hue_correction_from_options() {
        let options: ColorOptions = serde_json::from_value(json!({
            "hue_correction": [{"in": 60, "out": 70}, {"in": 180, "out": 200}],
        }))
        .unwrap();
        let color = Color::from_converter_arg(&json!({"h": 30, "s": 100})).unwrap();
        let corrected = options.correct_hue(color).to_hsv();
        assert_eq!(corrected.hue(), Some(35.0));
        assert_eq!(corrected.saturation(), Some(100.0));
    }

    #[test]
    fn hue_correction_edges() {
        let correction: HueCorrection =
            serde_json::from_value(json!([{"in": 60, "out": 70}, {"in": 180, "out": 200}]))
                .unwrap();
        // Below the first point interpolates from {0, 0}
        assert_eq!(correction.interpolate(0.0), 0.0);
        // Above the last point interpolates towards {359, 359}
        assert_eq!(correction.interpolate(359.0), 359.0);
        assert_eq!(correction.interpolate(180.0), 200.0);
    }

    #[test]
    fn rounding_is_idempotent() {
        let hsv = ColorHsv::new(Some(123.456), Some(78.91), Some(23.4567));
        assert_eq!(hsv.rounded(1).rounded(1), hsv.rounded(1));
        let xy = ColorXy::new(0.123_456, 0.654_321);
        assert_eq!(xy.rounded(4).rounded(4), xy.rounded(4));
    }

    #[test]
    fn mireds_round_trip_along_locus() {
        for mireds in (153..=500).step_by(7) {
            let xy = ColorXy::from_mireds(f64::from(mireds)).unwrap();
            assert!(
                close(xy.to_mireds(), f64::from(mireds), 2.0),
                "{mireds} -> {xy} -> {}",
                xy.to_mireds()
            );
        }
    }
}

// ============================================================================
// State synchronization
// ============================================================================

mod state_sync {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_temp_request_updates_reported_xy() {
        let result = sync(
            json!({"color_mode": "color_temp", "color_temp": 250}),
            json!({"color_mode": "xy", "color": {"x": 0.5, "y": 0.4}, "color_temp": 300}),
        );
        let xy = ColorXy::from_mireds(250.0).unwrap().rounded(4);
        assert_eq!(
            result,
            json!({
                "color_mode": "color_temp",
                "color": {"x": xy.x(), "y": xy.y()},
                "color_temp": 250,
            })
        );
    }

    #[test]
    fn old_color_mode_wins_over_inference() {
        // The request carries no mode, so the previous xy stays authoritative
        let result = sync(
            json!({"color_temp": 250}),
            json!({"color_mode": "xy", "color": {"x": 0.5, "y": 0.4}, "color_temp": 300}),
        );
        assert_eq!(
            result,
            json!({
                "color_mode": "xy",
                "color": {"x": 0.5, "y": 0.4},
                "color_temp": 467,
            })
        );
    }

    #[test]
    fn inferred_color_temp_mode_is_clamped() {
        let result = sync(json!({"color_temp": 100}), json!({}));
        assert_eq!(result, json!({"color_mode": "color_temp", "color_temp": 153}));
    }

    #[test]
    fn hs_request_derives_all_reported_attributes() {
        let result = sync(
            json!({"color": {"hue": 240, "saturation": 100}}),
            json!({"color": {"x": 0.3, "y": 0.3}, "color_temp": 300}),
        );
        let hsv = ColorHsv::new(Some(240.0), Some(100.0), None);
        let xy = hsv.to_xy().rounded(4);

        assert_eq!(result["color_mode"], json!("hs"));
        assert_eq!(result["color"]["hue"], json!(240.0));
        assert_eq!(result["color"]["saturation"], json!(100.0));
        assert_eq!(result["color"]["x"], json!(xy.x()));
        assert_eq!(result["color"]["y"], json!(xy.y()));
        let mireds = result["color_temp"].as_u64().unwrap();
        assert!((153..=500).contains(&mireds), "{mireds}");
    }

    #[test]
    fn xy_request_without_other_targets_stays_xy_only() {
        let result = sync(json!({"color": {"x": 0.2, "y": 0.3}}), json!({}));
        assert_eq!(result, json!({"color_mode": "xy", "color": {"x": 0.2, "y": 0.3}}));
    }

    #[test]
    fn disabled_sync_echoes_request() {
        let new = ColorState::color(StateColor::from_hs(10.0, 20.0));
        let old = ColorState::color_temp(300).with_color_mode(ColorMode::ColorTemp);
        let synced = sync_color_state(
            &new,
            &old,
            &ColorTempSource::Endpoint(&BULB),
            &ColorOptions::new().with_color_sync(false),
        );
        assert_eq!(synced, new);
    }

    #[test]
    fn group_range_is_intersection_of_members() {
        let members = [
            ColorTempRange::new(Some(153), Some(500)),
            ColorTempRange::new(Some(200), Some(400)),
        ];
        let old = ColorState::color(StateColor::from_xy(0.4, 0.4));
        let synced = sync_color_state(
            &ColorState::color_temp(450),
            &old,
            &ColorTempSource::Group(&members),
            &ColorOptions::default(),
        );
        assert_eq!(synced.color_temp, Some(400));
        assert_eq!(
            synced.color.and_then(|c| c.xy()),
            Some(ColorXy::from_mireds(400.0).unwrap().rounded(4))
        );
    }

    #[test]
    fn endpoint_without_range_does_not_clamp() {
        let unknown = Endpoint {
            min: None,
            max: None,
        };
        let synced = sync_color_state(
            &ColorState::color_temp(600),
            &ColorState::new(),
            &ColorTempSource::Endpoint(&unknown),
            &ColorOptions::default(),
        );
        assert_eq!(synced.color_temp, Some(600));
    }

    #[test]
    fn very_warm_request_keeps_mode_and_color_temp() {
        let warm = Endpoint {
            min: Some(153),
            max: Some(1000),
        };
        let old: ColorState =
            serde_json::from_value(json!({"color": {"x": 0.3, "y": 0.3}})).unwrap();
        let synced = sync_color_state(
            &ColorState::color_temp(700),
            &old,
            &ColorTempSource::Endpoint(&warm),
            &ColorOptions::default(),
        );
        assert_eq!(
            serde_json::to_value(synced).unwrap(),
            json!({"color_mode": "color_temp", "color_temp": 700})
        );
    }
}
