// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{error::Error, grouping::Seq};
use rustc_hash::FxHashMap;

/// Aligns operations by padding registers with `None` so that an operation
/// spanning several registers sits in the same column on all of them.
///
/// Operations are merged by sequence number: the smallest one at the head of
/// any register is placed at the first column that is free on every register
/// it occupies, and only those registers are padded. Operations on disjoint
/// registers therefore share columns.
#[must_use]
pub fn align_ops(ops: &[Vec<Seq>]) -> Vec<Vec<Option<Seq>>> {
    let mut cursors = vec![0; ops.len()];
    let mut padded_ops: Vec<Vec<Option<Seq>>> = vec![vec![]; ops.len()];

    loop {
        // Smallest sequence number at the head of any register not yet exhausted
        let Some(next) = ops
            .iter()
            .zip(&cursors)
            .filter_map(|(reg_ops, &cursor)| reg_ops.get(cursor))
            .min()
            .copied()
        else {
            break;
        };

        let rows = (0..ops.len())
            .filter(|&reg_idx| ops[reg_idx].get(cursors[reg_idx]) == Some(&next))
            .collect::<Vec<_>>();

        let col = rows
            .iter()
            .map(|&reg_idx| padded_ops[reg_idx].len())
            .max()
            .unwrap_or(0);

        for reg_idx in rows {
            padded_ops[reg_idx].resize(col, None);
            padded_ops[reg_idx].push(Some(next));
            cursors[reg_idx] += 1;
        }
    }

    padded_ops
}

/// The column of every operation in an aligned grid.
#[derive(Debug, Default)]
pub struct ColumnAssignment {
    columns: FxHashMap<Seq, usize>,
    num_columns: usize,
}

impl ColumnAssignment {
    /// Reads the column of each operation off the aligned rows, checking that
    /// an operation on several rows landed in one column.
    pub fn new(aligned_ops: &[Vec<Option<Seq>>]) -> Result<Self, Error> {
        let mut columns = FxHashMap::default();
        let mut num_columns = 0;
        for (reg_idx, reg_ops) in aligned_ops.iter().enumerate() {
            num_columns = num_columns.max(reg_ops.len());
            for (col, seq) in reg_ops.iter().enumerate() {
                let Some(seq) = seq else {
                    continue;
                };
                let assigned = *columns.entry(*seq).or_insert(col);
                if assigned != col {
                    return Err(Error::InvariantViolation(format!(
                        "operation {seq} is in column {assigned} on one register but column {col} on register {reg_idx}"
                    )));
                }
            }
        }
        Ok(Self {
            columns,
            num_columns,
        })
    }

    #[must_use]
    pub fn column_of(&self, seq: Seq) -> Option<usize> {
        self.columns.get(&seq).copied()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }
}

/// Transforms a row-col 2D array into an equivalent col-row 2D array.
#[must_use]
pub fn transform_to_col_row(aligned_ops: &[Vec<Option<Seq>>]) -> Vec<Vec<Option<Seq>>> {
    let num_rows = aligned_ops.len();
    let num_cols = aligned_ops.iter().map(Vec::len).max().unwrap_or(0);

    let mut col_row_array = vec![vec![None; num_rows]; num_cols];

    for (row, row_data) in aligned_ops.iter().enumerate() {
        for (col, value) in row_data.iter().enumerate() {
            col_row_array[col][row] = *value;
        }
    }

    col_row_array
}
