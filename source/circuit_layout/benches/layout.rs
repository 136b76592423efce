// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use circuit_layout::{
    Circuit, LayoutConfig, Operation, Qubit, Register, collapse_repetition, layout,
};
use criterion::{Criterion, criterion_group, criterion_main};

const NUM_QUBITS: usize = 64;
const NUM_LAYERS: usize = 200;

/// Layers of Hadamards and a CNOT ladder, with a measurement and a
/// classically-controlled correction every tenth layer.
fn large_circuit() -> Circuit {
    let mut operations = vec![];
    for layer in 0..NUM_LAYERS {
        for q in 0..NUM_QUBITS {
            operations.push(Operation::unitary("H", vec![Register::quantum(q)]));
        }
        for q in 0..NUM_QUBITS - 1 {
            operations.push(Operation::controlled(
                "X",
                vec![Register::quantum(q)],
                vec![Register::quantum(q + 1)],
            ));
        }
        if layer % 10 == 0 {
            let q = layer % NUM_QUBITS;
            operations.push(Operation::measurement(q, 0));
            operations.push(Operation::conditional(
                Register::classical(q, 0),
                vec![],
                vec![Operation::unitary("Z", vec![Register::quantum(q)])],
            ));
        }
    }
    Circuit {
        qubits: (0..NUM_QUBITS).map(|id| Qubit::with_results(id, 1)).collect(),
        operations,
    }
}

pub fn large_circuit_layout(c: &mut Criterion) {
    let circuit = large_circuit();
    let config = LayoutConfig::default();
    c.bench_function("Large circuit layout", |b| {
        b.iter(|| {
            let layout = layout(&circuit, &config).expect("layout should succeed");
            assert_eq!(layout.operations.len(), circuit.operations.len());
        });
    });
}

pub fn repetition_collapse(c: &mut Criterion) {
    let operations = vec![Operation::unitary("T", vec![Register::quantum(0)]); 2000];
    c.bench_function("Repetition collapse", |b| {
        b.iter(|| collapse_repetition(operations.clone()));
    });
}

criterion_group!(benches, large_circuit_layout, repetition_collapse);
criterion_main!(benches);
