// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;
use expect_test::expect;
use indoc::indoc;

#[test]
fn partial_json_keeps_defaults() {
    let config: LayoutConfig = serde_json::from_str(indoc! {r#"
        {
            "startX": 0,
            "gatePadding": 4
        }
    "#})
    .expect("config should deserialize");

    assert_eq!(
        config,
        LayoutConfig {
            start_x: 0.0,
            gate_padding: 4.0,
            ..LayoutConfig::default()
        }
    );
    assert!((config.register_height() - 48.0).abs() < f64::EPSILON);
}

#[test]
fn default_register_height() {
    assert!((LayoutConfig::default().register_height() - 52.0).abs() < f64::EPSILON);
}

#[test]
fn serializes_camel_case() {
    expect![[r#"{"startX":80.0,"startY":40.0,"gateHeight":40.0,"minGateWidth":40.0,"gatePadding":6.0,"labelPadding":10.0,"labelFontSize":14.0,"argsFontSize":12.0,"classicalRegisterHeight":40.0,"groupBoxPadding":6.0,"controlBtnOffset":40.0}"#]]
        .assert_eq(&serde_json::to_string(&LayoutConfig::default()).expect("config should serialize"));
}
