// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Clone, Debug, Diagnostic, Error, PartialEq)]
pub enum Error {
    #[error("cannot lay out operation `{gate}` at position {position}: {error}")]
    #[diagnostic(code("Qsc.CircuitLayout.InvalidOperation"))]
    InvalidOperation {
        gate: String,
        position: usize,
        error: UsageError,
    },
    /// A failure inside the branches or children of a nesting operation.
    #[error("cannot lay out operation `{gate}` at position {position}: {error}")]
    #[diagnostic(code("Qsc.CircuitLayout.NestedOperation"))]
    NestedOperation {
        gate: String,
        position: usize,
        error: Box<Error>,
    },
    #[error(transparent)]
    #[diagnostic(transparent)]
    Usage(#[from] UsageError),
    #[error("layout invariant violated: {0}")]
    #[diagnostic(code("Qsc.CircuitLayout.InvariantViolation"))]
    #[diagnostic(help("this is a bug in the layout engine, not in the circuit"))]
    InvariantViolation(String),
}

/// Structurally invalid input supplied by the caller.
#[derive(Clone, Debug, Diagnostic, Error, PartialEq)]
pub enum UsageError {
    #[error("qubit register with id {0} not found")]
    #[diagnostic(code("Qsc.CircuitLayout.UnknownQubit"))]
    UnknownQubit(usize),
    #[error(
        "classical register {result} is invalid for qubit {qubit} with {num_results} classical register(s)"
    )]
    #[diagnostic(code("Qsc.CircuitLayout.UnknownResult"))]
    UnknownResult {
        qubit: usize,
        result: usize,
        num_results: usize,
    },
    #[error("qubit id {0} is declared more than once")]
    #[diagnostic(code("Qsc.CircuitLayout.DuplicateQubit"))]
    DuplicateQubit(usize),
    #[error("unitary has no target registers")]
    #[diagnostic(code("Qsc.CircuitLayout.NoTargets"))]
    #[diagnostic(help("a unitary gate needs at least one target to draw its box"))]
    NoTargets,
    #[error("classically-controlled operation has no children")]
    #[diagnostic(code("Qsc.CircuitLayout.MissingBranches"))]
    MissingBranches,
}
