// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{circuit::Operation, error::Error, registers::RegisterMap};
use std::fmt::{self, Display, Formatter};

/// Ingestion order of an operation. This, not the array index, is the
/// ordering key when per-register lists are merged into columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seq(pub usize);

impl Display for Seq {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An operation tagged with its sequence number.
#[derive(Clone, Copy, Debug)]
pub struct Ingested<'a> {
    pub seq: Seq,
    pub op: &'a Operation,
}

/// Tags every operation with a monotonically increasing sequence number.
pub fn ingest<'a>(operations: impl IntoIterator<Item = &'a Operation>) -> Vec<Ingested<'a>> {
    operations
        .into_iter()
        .enumerate()
        .map(|(n, op)| Ingested { seq: Seq(n), op })
        .collect()
}

/// Finds the position of an ingested operation by its sequence number.
#[must_use]
pub fn position_of(ops: &[Ingested], seq: Seq) -> Option<usize> {
    ops.binary_search_by_key(&seq, |entry| entry.seq).ok()
}

/// Groups operations by the qubit rows they reserve.
///
/// Returns one list per qubit id in `0..=max_id`, where `grouped[i]` holds, in
/// ingestion order, the operations that occupy a column on row `i`. The lists
/// are not yet aligned. An operation reserves every row between its top-most
/// and bottom-most register so nothing is drawn over its connecting line. An
/// operation drawn across every qubit, such as a conditional or a group
/// holding one, reserves every row.
pub fn group_operations(
    ops: &[Ingested],
    registers: &RegisterMap,
) -> Result<Vec<Vec<Seq>>, Error> {
    let num_rows = registers.max_id().map_or(0, |max_id| max_id + 1);
    let mut grouped_ops = vec![vec![]; num_rows];

    for (position, entry) in ops.iter().enumerate() {
        let op = entry.op;
        let spanned = op.spanned_registers();

        // Every referenced wire must exist, classical ones included.
        for register in &spanned {
            registers
                .y_of(register)
                .map_err(|error| Error::InvalidOperation {
                    gate: op.gate.clone(),
                    position,
                    error,
                })?;
        }

        let range = if op.spans_all_rows() {
            num_rows.checked_sub(1).map(|max_row| (0, max_row))
        } else {
            spanned.iter().map(|reg| reg.qubit).fold(None, |acc, id| match acc {
                None => Some((id, id)),
                Some((min, max)) => Some((min.min(id), max.max(id))),
            })
        };

        let Some((min_row, max_row)) = range else {
            continue;
        };

        for reg_ops in grouped_ops
            .iter_mut()
            .take(max_row + 1)
            .skip(min_row)
        {
            reg_ops.push(entry.seq);
        }
    }

    Ok(grouped_ops)
}
