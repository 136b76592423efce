// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;
use crate::{
    Circuit, GateKind, LayoutConfig, NodeChildren,
    circuit::{ConditionalRender, Qubit},
    layout,
};

fn h(qubit: usize) -> Operation {
    Operation::unitary("H", vec![Register::quantum(qubit)])
}

fn x(qubit: usize) -> Operation {
    Operation::unitary("X", vec![Register::quantum(qubit)])
}

fn gates(ops: &[Operation]) -> Vec<&str> {
    ops.iter().map(|op| op.gate.as_str()).collect()
}

#[test]
fn single_gate_run_becomes_group() {
    let collapsed = collapse_repetition(vec![h(0), h(0), h(0)]);

    assert_eq!(gates(&collapsed), vec!["H(×3)"]);
    let group = &collapsed[0];
    assert!(group.is_group());
    assert_eq!(group.targets, vec![Register::quantum(0)]);
    assert_eq!(group.children, vec![h(0), h(0), h(0)]);
}

#[test]
fn multi_gate_motif_followed_by_tail() {
    let z = Operation::unitary("Z", vec![Register::quantum(0)]);
    let collapsed = collapse_repetition(vec![h(0), x(0), h(0), x(0), z]);

    assert_eq!(gates(&collapsed), vec!["H X(×2)", "Z"]);
    assert_eq!(collapsed[0].children.len(), 4);
}

#[test]
fn ties_prefer_shorter_motif() {
    let collapsed = collapse_repetition(vec![h(0), h(0), h(0), h(0)]);
    assert_eq!(gates(&collapsed), vec!["H(×4)"]);
}

#[test]
fn long_motif_label_is_truncated() {
    let rx = Operation::unitary("Rx", vec![Register::quantum(0)]);
    let ry = Operation::unitary("Ry", vec![Register::quantum(0)]);
    let rz = Operation::unitary("Rz", vec![Register::quantum(0)]);
    let collapsed = collapse_repetition(vec![
        rx.clone(),
        ry.clone(),
        rz.clone(),
        rx,
        ry,
        rz,
    ]);

    assert_eq!(gates(&collapsed), vec!["Rx Ry...(×2)"]);
}

#[test]
fn different_targets_do_not_repeat() {
    let ops = vec![h(0), h(1), h(0)];
    assert_eq!(collapse_repetition(ops.clone()), ops);
}

#[test]
fn controls_merge_into_targets() {
    let cnot = Operation::controlled("X", vec![Register::quantum(0)], vec![Register::quantum(1)]);
    let collapsed = collapse_repetition(vec![cnot.clone(), cnot]);

    let group = &collapsed[0];
    assert_eq!(group.gate, "X(×2)");
    assert!(group.controls.is_empty());
    assert_eq!(
        group.targets,
        vec![Register::quantum(1), Register::quantum(0)]
    );
}

#[test]
fn group_children_are_collapsed() {
    let group = Operation::group("G", vec![Register::quantum(0)], vec![x(0), x(0)]);
    let collapsed = collapse_repetition(vec![group, h(0)]);

    assert_eq!(gates(&collapsed), vec!["G", "H"]);
    assert_eq!(gates(&collapsed[0].children), vec!["X(×2)"]);
}

#[test]
fn conditional_branches_are_untouched() {
    let conditional = Operation::conditional(
        Register::classical(0, 0),
        vec![x(1), x(1)],
        vec![],
    );
    let collapsed = collapse_repetition(vec![conditional.clone()]);

    assert_eq!(collapsed, vec![conditional]);
    assert!(
        collapsed[0]
            .children
            .iter()
            .all(|child| child.conditional_render == ConditionalRender::OnZero)
    );
}

#[test]
fn repeated_measurements_still_collapse() {
    let collapsed = collapse_repetition(vec![
        Operation::measurement(0, 0),
        Operation::measurement(0, 0),
    ]);
    assert_eq!(gates(&collapsed), vec!["Measure(×2)"]);
    assert_eq!(
        collapsed[0].targets,
        vec![Register::classical(0, 0), Register::quantum(0)]
    );
}

#[test]
fn collapsed_circuit_lays_out_as_group() {
    let circuit = Circuit {
        qubits: vec![Qubit::new(0)],
        operations: collapse_repetition(vec![h(0), h(0), h(0)]),
    };

    let layout = layout(&circuit, &LayoutConfig::default()).expect("layout should succeed");
    let node = &layout.operations[0];
    assert_eq!(node.kind, GateKind::Group);
    let Some(NodeChildren::Group(children)) = &node.children else {
        panic!("expected group children");
    };
    assert_eq!(children.len(), 3);
    // Three 40px columns with 12px gaps, plus the box padding on both sides.
    assert!((node.width - 156.0).abs() < 1e-9);
}

#[test]
fn empty_input() {
    assert!(collapse_repetition(vec![]).is_empty());
}
