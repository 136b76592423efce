// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;

fn allocate(qubits: &[Qubit]) -> RegisterMap {
    RegisterMap::allocate(qubits, &LayoutConfig::default()).expect("allocation should succeed")
}

#[test]
fn qubits_without_results_use_register_height() {
    let map = allocate(&[Qubit::new(0), Qubit::new(1), Qubit::new(2)]);
    let ys = map.qubits().iter().map(|q| q.y).collect::<Vec<_>>();
    assert_eq!(ys, vec![40.0, 92.0, 144.0]);
    assert!((map.height() - 196.0).abs() < f64::EPSILON);
}

#[test]
fn classical_wires_sit_below_their_qubit() {
    let map = allocate(&[Qubit::with_results(0, 2), Qubit::new(1)]);

    assert_eq!(
        map.qubits(),
        &[
            QubitWire {
                id: 0,
                y: 40.0,
                children: vec![80.0, 120.0],
            },
            QubitWire {
                id: 1,
                y: 160.0,
                children: vec![],
            },
        ]
    );
    assert!((map.height() - 212.0).abs() < f64::EPSILON);
}

#[test]
fn allocation_follows_ascending_id() {
    let map = allocate(&[Qubit::new(5), Qubit::new(2)]);

    assert_eq!(map.y_of(&Register::quantum(2)), Ok(40.0));
    assert_eq!(map.y_of(&Register::quantum(5)), Ok(92.0));
    assert_eq!(map.max_id(), Some(5));
    assert_eq!(map.position(5), Ok(1));
}

#[test]
fn duplicate_qubit_is_rejected() {
    let err = RegisterMap::allocate(&[Qubit::new(1), Qubit::new(1)], &LayoutConfig::default())
        .expect_err("duplicate ids should fail");
    assert_eq!(err, UsageError::DuplicateQubit(1));
}

#[test]
fn unknown_registers_are_reported() {
    let map = allocate(&[Qubit::with_results(0, 1)]);

    assert_eq!(
        map.y_of(&Register::quantum(3)),
        Err(UsageError::UnknownQubit(3))
    );
    assert_eq!(
        map.y_of(&Register::classical(0, 1)),
        Err(UsageError::UnknownResult {
            qubit: 0,
            result: 1,
            num_results: 1,
        })
    );
}

#[test]
fn empty_map() {
    let map = allocate(&[]);
    assert!(map.is_empty());
    assert_eq!(map.max_id(), None);
    assert_eq!(map.qubit_extent(), None);
    assert!((map.height() - 40.0).abs() < f64::EPSILON);
}

#[test]
fn wires_are_listed_top_to_bottom() {
    let map = allocate(&[Qubit::new(1), Qubit::with_results(0, 1)]);
    let wires = map.wires().collect::<Vec<_>>();
    assert_eq!(
        wires,
        vec![
            (Register::quantum(0), 40.0),
            (Register::classical(0, 0), 80.0),
            (Register::quantum(1), 120.0),
        ]
    );
    assert_eq!(map.qubit_extent(), Some((40.0, 120.0)));
}
