// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{
    circuit::{Circuit, Operation, Qubit, Register},
    error::UsageError,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Merges the qubits in `qubit_ids` into a single register and rewrites the
/// operations to match.
///
/// The merged register keeps the id of the first grouped qubit in declaration
/// order and owns the classical wires of all of them, renumbered in that
/// order. A gate controlled and targeted on the merged register drops the
/// now-redundant control and gains a `C` prefix. Every gate that touched a
/// grouped qubit is relabelled with the indices, within `qubit_ids`, of the
/// qubits it touched, for example `CX (q[0, 1])`.
pub fn group_qubits(circuit: Circuit, qubit_ids: &[usize]) -> Result<Circuit, UsageError> {
    if qubit_ids.is_empty() {
        return Ok(circuit);
    }
    if let Some(&missing) = qubit_ids
        .iter()
        .find(|id| !circuit.qubits.iter().any(|q| q.id == **id))
    {
        return Err(UsageError::UnknownQubit(missing));
    }

    let (merge, qubits) = QubitMerge::new(circuit.qubits, qubit_ids);
    let operations = circuit
        .operations
        .into_iter()
        .map(|op| merge.map_operation(op))
        .collect();

    Ok(Circuit { qubits, operations })
}

struct QubitMerge<'a> {
    qubit_ids: &'a [usize],
    /// Id of the merged register.
    id: usize,
    /// Offset added to the result index of each grouped qubit.
    result_offsets: FxHashMap<usize, usize>,
}

impl<'a> QubitMerge<'a> {
    fn new(declared: Vec<Qubit>, qubit_ids: &'a [usize]) -> (Self, Vec<Qubit>) {
        let mut result_offsets = FxHashMap::default();
        let mut merged_slot: Option<usize> = None;
        let mut qubits: Vec<Qubit> = Vec::with_capacity(declared.len());

        for qubit in declared {
            if !qubit_ids.contains(&qubit.id) {
                qubits.push(qubit);
                continue;
            }
            match merged_slot {
                Some(slot) => {
                    let merged = &mut qubits[slot];
                    result_offsets.insert(qubit.id, merged.num_results);
                    merged.num_results += qubit.num_results;
                }
                None => {
                    merged_slot = Some(qubits.len());
                    result_offsets.insert(qubit.id, 0);
                    qubits.push(qubit);
                }
            }
        }

        let id = merged_slot.map_or(qubit_ids[0], |slot| qubits[slot].id);
        (
            Self {
                qubit_ids,
                id,
                result_offsets,
            },
            qubits,
        )
    }

    fn map_operation(&self, mut op: Operation) -> Operation {
        op.children = op
            .children
            .into_iter()
            .map(|child| self.map_operation(child))
            .collect();

        let mut touched_controls = vec![];
        let mut touched_targets = vec![];
        op.controls = self.remap(&op.controls, &mut touched_controls);
        op.targets = self.remap(&op.targets, &mut touched_targets);

        if !op.is_measurement
            && !op.is_conditional
            && !touched_controls.is_empty()
            && !touched_targets.is_empty()
        {
            let merged = Register::quantum(self.id);
            op.controls.retain(|reg| *reg != merged);
            op.is_controlled = !op.controls.is_empty();
            op.gate = format!("C{}", op.gate);
        }

        if !touched_controls.is_empty() || !touched_targets.is_empty() {
            let indices = self.indices(touched_controls.iter().chain(&touched_targets));
            op.gate = format!("{} (q{indices:?})", op.gate);
        }

        op
    }

    /// Points registers on grouped qubits at the merged register, recording
    /// the original qubit ids. Duplicates created by the merge are dropped.
    fn remap(&self, registers: &[Register], touched: &mut Vec<usize>) -> Vec<Register> {
        let mut seen = FxHashSet::default();
        registers
            .iter()
            .map(|reg| match self.result_offsets.get(&reg.qubit) {
                Some(offset) => {
                    touched.push(reg.qubit);
                    Register {
                        qubit: self.id,
                        result: reg.result.map(|result| result + offset),
                    }
                }
                None => *reg,
            })
            .filter(|reg| seen.insert(*reg))
            .collect()
    }

    /// Positions within the grouped ids, first-seen order, without repeats.
    fn indices<'i>(&self, touched: impl Iterator<Item = &'i usize>) -> Vec<usize> {
        let mut indices = vec![];
        for id in touched {
            if let Some(index) = self.qubit_ids.iter().position(|grouped| grouped == id) {
                if !indices.contains(&index) {
                    indices.push(index);
                }
            }
        }
        indices
    }
}
