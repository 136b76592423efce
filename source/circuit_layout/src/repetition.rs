// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(test)]
mod tests;

use crate::circuit::{Operation, Register};
use log::warn;
use rustc_hash::{FxHashSet, FxHasher};
use std::hash::{Hash, Hasher};

/// Longest motif label kept before it is truncated with `...`.
const MAX_LABEL_CHARS: usize = 5;

/// Detects runs of a repeated motif and folds each run into one group
/// operation labelled with the motif and its repeat count, for example
/// `H(×3)` or `H X(×2)`.
///
/// The children of existing groups are collapsed first. Conditional branches
/// are left untouched.
#[must_use]
pub fn collapse_repetition(mut operations: Vec<Operation>) -> Vec<Operation> {
    for op in &mut operations {
        if op.is_group() {
            op.children = collapse_repetition(std::mem::take(&mut op.children));
        }
    }

    let hashes = operations.iter().map(hash_operation).collect::<Vec<_>>();
    let mut collapsed = Vec::with_capacity(operations.len());
    let mut remaining = operations.into_iter();
    let mut pos = 0;

    while pos < hashes.len() {
        let (motif_len, repeats) = find_best_motif(&hashes, pos);
        let run_len = motif_len * repeats;
        let run = remaining.by_ref().take(run_len).collect::<Vec<_>>();
        if repeats > 1 {
            collapsed.push(make_motif_group(run, motif_len, repeats));
        } else {
            collapsed.extend(run);
        }
        pos += run_len;
    }

    collapsed
}

fn hash_operation(op: &Operation) -> u64 {
    let mut hasher = FxHasher::default();
    op.hash(&mut hasher);
    hasher.finish()
}

/// Counts how many times the motif `hashes[start..start + motif_len]`
/// repeats back to back from `start`.
fn count_motif_repeats(hashes: &[u64], start: usize, motif_len: usize) -> usize {
    let motif = &hashes[start..start + motif_len];
    hashes[start..]
        .chunks_exact(motif_len)
        .take_while(|chunk| *chunk == motif)
        .count()
}

/// Returns `(motif_len, repeats)` of the motif at `start` whose repetition
/// covers the most operations. Ties go to the shorter motif. `(1, 1)` means
/// nothing repeats.
fn find_best_motif(hashes: &[u64], start: usize) -> (usize, usize) {
    let remaining = hashes.len() - start;
    let mut best = (1, 1);

    for motif_len in 1..=remaining / 2 {
        let repeats = count_motif_repeats(hashes, start, motif_len);
        if repeats > 1 && motif_len * repeats > best.0 * best.1 {
            best = (motif_len, repeats);
        }
    }

    best
}

fn motif_label(motif: &[Operation]) -> String {
    let label = motif
        .iter()
        .map(|op| op.gate.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    if label.chars().count() > MAX_LABEL_CHARS {
        let truncated: String = label.chars().take(MAX_LABEL_CHARS).collect();
        format!("{truncated}...")
    } else {
        label
    }
}

/// Every register the run touches, controls folded into targets, in first-seen order.
fn merged_registers(run: &[Operation]) -> Vec<Register> {
    let mut seen = FxHashSet::default();
    run.iter()
        .flat_map(|op| op.targets.iter().chain(&op.controls))
        .filter(|reg| seen.insert(**reg))
        .copied()
        .collect()
}

fn make_motif_group(run: Vec<Operation>, motif_len: usize, repeats: usize) -> Operation {
    if run.iter().any(|op| op.is_measurement) {
        warn!("collapsing repeated measurements may not be correct");
    }
    let label = format!("{}(×{repeats})", motif_label(&run[..motif_len]));
    let targets = merged_registers(&run);
    Operation::group(&label, targets, run)
}
