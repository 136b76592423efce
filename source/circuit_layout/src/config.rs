// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

/// Dimensions, in pixels, used to place registers and size gates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Left margin reserved for qubit labels. The first column starts here.
    pub start_x: f64,
    /// The y coordinate of the top-most qubit wire.
    pub start_y: f64,
    pub gate_height: f64,
    /// Width of a gate box with a short label, and the narrowest a column can be.
    pub min_gate_width: f64,
    /// Horizontal space on each side of a column, and vertical space around a qubit row.
    pub gate_padding: f64,
    /// Horizontal space between a gate label and the edge of its box.
    pub label_padding: f64,
    pub label_font_size: f64,
    pub args_font_size: f64,
    /// Row height of a classical wire, and of a qubit row that owns classical wires.
    pub classical_register_height: f64,
    /// Space between a group box border and its nested gates.
    pub group_box_padding: f64,
    /// Room at the left of a classically-controlled box for its toggle button.
    pub control_btn_offset: f64,
}

impl LayoutConfig {
    const GATE_HEIGHT: f64 = 40.0;
    const GATE_PADDING: f64 = 6.0;

    /// Row height of a qubit wire that owns no classical wires.
    #[must_use]
    pub fn register_height(&self) -> f64 {
        self.gate_height + self.gate_padding * 2.0
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_x: 80.0,
            start_y: 40.0,
            gate_height: Self::GATE_HEIGHT,
            min_gate_width: 40.0,
            gate_padding: Self::GATE_PADDING,
            label_padding: 10.0,
            label_font_size: 14.0,
            args_font_size: 12.0,
            classical_register_height: Self::GATE_HEIGHT,
            group_box_padding: Self::GATE_PADDING,
            control_btn_offset: 40.0,
        }
    }
}
