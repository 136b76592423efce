// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(test)]
mod tests;

use crate::{
    LayoutConfig,
    circuit::{Qubit, Register},
    error::UsageError,
};
use serde::Serialize;

/// The vertical slot of a qubit wire and of the classical wires it owns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QubitWire {
    pub id: usize,
    pub y: f64,
    /// The y coordinates of the owned classical wires, in result order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<f64>,
}

/// The register table: every wire of the circuit, top to bottom.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RegisterMap {
    /// Sorted by ascending id, which is also ascending y.
    qubits: Vec<QubitWire>,
    /// Total vertical span of all wires, including the bottom row.
    height: f64,
}

impl RegisterMap {
    /// Assigns every declared qubit and its classical wires a y coordinate.
    /// Qubits are placed in ascending id order regardless of declaration order.
    pub fn allocate(qubits: &[Qubit], config: &LayoutConfig) -> Result<Self, UsageError> {
        let mut declared: Vec<&Qubit> = qubits.iter().collect();
        declared.sort_by_key(|q| q.id);
        if let Some(pair) = declared.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(UsageError::DuplicateQubit(pair[0].id));
        }

        let mut curr_y = config.start_y;
        let mut wires = Vec::with_capacity(declared.len());
        for qubit in declared {
            let y = curr_y;
            if qubit.num_results == 0 {
                curr_y += config.register_height();
                wires.push(QubitWire {
                    id: qubit.id,
                    y,
                    children: vec![],
                });
                continue;
            }

            curr_y += config.classical_register_height;
            let mut children = Vec::with_capacity(qubit.num_results);
            for _ in 0..qubit.num_results {
                children.push(curr_y);
                curr_y += config.classical_register_height;
            }
            wires.push(QubitWire {
                id: qubit.id,
                y,
                children,
            });
        }

        Ok(Self {
            qubits: wires,
            height: curr_y,
        })
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    #[must_use]
    pub fn qubits(&self) -> &[QubitWire] {
        &self.qubits
    }

    /// The highest declared qubit id, which bounds the per-register operation lists.
    #[must_use]
    pub fn max_id(&self) -> Option<usize> {
        self.qubits.last().map(|q| q.id)
    }

    /// Index of the qubit among all declared qubits, top to bottom.
    pub fn position(&self, qubit_id: usize) -> Result<usize, UsageError> {
        self.qubits
            .binary_search_by_key(&qubit_id, |q| q.id)
            .map_err(|_| UsageError::UnknownQubit(qubit_id))
    }

    pub fn qubit(&self, qubit_id: usize) -> Result<&QubitWire, UsageError> {
        self.position(qubit_id).map(|pos| &self.qubits[pos])
    }

    /// The y coordinate of the wire a register reference names.
    pub fn y_of(&self, register: &Register) -> Result<f64, UsageError> {
        let qubit = self.qubit(register.qubit)?;
        match register.result {
            None => Ok(qubit.y),
            Some(result) => {
                qubit
                    .children
                    .get(result)
                    .copied()
                    .ok_or(UsageError::UnknownResult {
                        qubit: register.qubit,
                        result,
                        num_results: qubit.children.len(),
                    })
            }
        }
    }

    /// The y coordinates of the top-most and bottom-most qubit wires.
    #[must_use]
    pub fn qubit_extent(&self) -> Option<(f64, f64)> {
        Some((self.qubits.first()?.y, self.qubits.last()?.y))
    }

    /// Every wire, top to bottom, as the register reference that names it.
    pub fn wires(&self) -> impl Iterator<Item = (Register, f64)> + '_ {
        self.qubits.iter().flat_map(|q| {
            std::iter::once((Register::quantum(q.id), q.y)).chain(
                q.children
                    .iter()
                    .enumerate()
                    .map(move |(result, y)| (Register::classical(q.id, result), *y)),
            )
        })
    }
}
