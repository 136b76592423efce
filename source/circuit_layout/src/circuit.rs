// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, ops::Not};

/// Representation of a quantum circuit to be laid out.
#[derive(Clone, Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct Circuit {
    #[serde(default)]
    pub qubits: Vec<Qubit>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Circuit {
    /// Declares qubits `0..num_qubits` with no classical wires.
    #[must_use]
    pub fn with_qubits(num_qubits: usize) -> Self {
        Self {
            qubits: (0..num_qubits).map(Qubit::new).collect(),
            operations: vec![],
        }
    }
}

/// A qubit declaration and the number of classical wires it will own.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Qubit {
    pub id: usize,
    #[serde(rename = "numResults", alias = "numChildren")]
    #[serde(default)]
    pub num_results: usize,
}

impl Qubit {
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self { id, num_results: 0 }
    }

    #[must_use]
    pub fn with_results(id: usize, num_results: usize) -> Self {
        Self { id, num_results }
    }
}

#[derive(Serialize, Deserialize, Debug, Eq, Hash, PartialEq, Clone, Copy, PartialOrd, Ord)]
pub struct Register {
    pub qubit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub result: Option<usize>,
}

impl Register {
    #[must_use]
    pub fn quantum(qubit_id: usize) -> Self {
        Self {
            qubit: qubit_id,
            result: None,
        }
    }

    #[must_use]
    pub fn classical(qubit_id: usize, result_id: usize) -> Self {
        Self {
            qubit: qubit_id,
            result: Some(result_id),
        }
    }

    #[must_use]
    pub fn is_classical(&self) -> bool {
        self.result.is_some()
    }
}

/// Which branch of a classically-controlled parent an operation renders in,
/// or whether its children are drawn as a group.
#[derive(Serialize, Deserialize, Debug, Default, Eq, Hash, PartialEq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum ConditionalRender {
    #[default]
    Always,
    OnZero,
    OnOne,
    AsGroup,
}

impl ConditionalRender {
    fn is_always(&self) -> bool {
        *self == Self::Always
    }
}

/// One gate application as authored.
#[derive(Clone, Serialize, Deserialize, Default, Debug, PartialEq, Eq, Hash)]
pub struct Operation {
    pub gate: String,
    #[serde(rename = "displayArgs")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub display_args: Option<String>,
    #[serde(rename = "isMeasurement")]
    #[serde(skip_serializing_if = "Not::not")]
    #[serde(default)]
    pub is_measurement: bool,
    #[serde(rename = "isConditional")]
    #[serde(skip_serializing_if = "Not::not")]
    #[serde(default)]
    pub is_conditional: bool,
    #[serde(rename = "isControlled")]
    #[serde(skip_serializing_if = "Not::not")]
    #[serde(default)]
    pub is_controlled: bool,
    #[serde(rename = "isAdjoint")]
    #[serde(skip_serializing_if = "Not::not")]
    #[serde(default)]
    pub is_adjoint: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub controls: Vec<Register>,
    #[serde(default)]
    pub targets: Vec<Register>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub children: Vec<Operation>,
    #[serde(rename = "conditionalRender")]
    #[serde(skip_serializing_if = "ConditionalRender::is_always")]
    #[serde(default)]
    pub conditional_render: ConditionalRender,
    #[serde(rename = "dataAttributes")]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(default)]
    pub data_attributes: BTreeMap<String, String>,
}

impl Operation {
    #[must_use]
    pub fn unitary(gate: &str, targets: Vec<Register>) -> Self {
        Self {
            gate: gate.to_string(),
            targets,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn controlled(gate: &str, controls: Vec<Register>, targets: Vec<Register>) -> Self {
        Self {
            gate: gate.to_string(),
            is_controlled: true,
            controls,
            targets,
            ..Self::default()
        }
    }

    /// Measures `qubit` into its classical wire `result`.
    #[must_use]
    pub fn measurement(qubit: usize, result: usize) -> Self {
        Self {
            gate: "Measure".to_string(),
            is_measurement: true,
            controls: vec![Register::quantum(qubit)],
            targets: vec![Register::classical(qubit, result)],
            ..Self::default()
        }
    }

    /// Branches on the value of `bit`. Children keep their own render tags, so
    /// untagged children render in both branches.
    #[must_use]
    pub fn conditional(bit: Register, on_zero: Vec<Operation>, on_one: Vec<Operation>) -> Self {
        let children = on_zero
            .into_iter()
            .map(|op| op.render(ConditionalRender::OnZero))
            .chain(
                on_one
                    .into_iter()
                    .map(|op| op.render(ConditionalRender::OnOne)),
            )
            .collect();
        Self {
            gate: "if".to_string(),
            is_conditional: true,
            controls: vec![bit],
            children,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn group(gate: &str, targets: Vec<Register>, children: Vec<Operation>) -> Self {
        Self {
            gate: gate.to_string(),
            targets,
            children,
            conditional_render: ConditionalRender::AsGroup,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_display_args(mut self, args: &str) -> Self {
        self.display_args = Some(args.to_string());
        self
    }

    #[must_use]
    pub fn adjoint(mut self) -> Self {
        self.is_adjoint = true;
        self
    }

    #[must_use]
    pub fn render(mut self, conditional_render: ConditionalRender) -> Self {
        self.conditional_render = conditional_render;
        self
    }

    /// Returns if the operation draws its children as a collapsible box.
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.is_conditional
            && self.conditional_render == ConditionalRender::AsGroup
            && !self.children.is_empty()
    }

    /// Returns if any control is a classical wire.
    #[must_use]
    pub fn is_classically_controlled(&self) -> bool {
        self.controls.iter().any(Register::is_classical)
    }

    /// Returns if the operation's box reaches from the top-most to the
    /// bottom-most qubit: a conditional, a classically-controlled gate, or a
    /// group wrapping either.
    #[must_use]
    pub fn spans_all_rows(&self) -> bool {
        self.is_conditional
            || self.is_classically_controlled()
            || (self.is_group() && self.children.iter().any(Operation::spans_all_rows))
    }

    /// The registers this operation draws on: its controls and targets, and for
    /// a group, those of every nested child.
    #[must_use]
    pub fn spanned_registers(&self) -> Vec<Register> {
        let mut registers = vec![];
        self.collect_registers(&mut registers);
        registers
    }

    fn collect_registers(&self, registers: &mut Vec<Register>) {
        registers.extend(self.controls.iter().chain(&self.targets).copied());
        if self.is_group() {
            for child in &self.children {
                child.collect_registers(registers);
            }
        }
    }
}
