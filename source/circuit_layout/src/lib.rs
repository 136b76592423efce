// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Computes where every gate of a quantum circuit diagram goes: register
//! rows, aligned columns and the resolved geometry of each gate box.

pub mod alignment;
mod circuit;
mod config;
mod display;
mod error;
pub mod grouping;
mod layout;
mod qubit_groups;
pub mod registers;
mod repetition;
mod text;

pub use circuit::{Circuit, ConditionalRender, Operation, Qubit, Register};
pub use config::LayoutConfig;
pub use error::{Error, UsageError};
pub use layout::{
    Column, Connector, GateKind, Layout, LayoutNode, NodeChildren, TargetGroup, TargetsY, layout,
};
pub use qubit_groups::group_qubits;
pub use repetition::collapse_repetition;
pub use text::string_width;
