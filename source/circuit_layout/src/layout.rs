// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{
    LayoutConfig,
    alignment::{ColumnAssignment, align_ops, transform_to_col_row},
    circuit::{Circuit, ConditionalRender, Operation, Register},
    error::{Error, UsageError},
    grouping::{Ingested, Seq, group_operations, ingest, position_of},
    registers::RegisterMap,
    text::string_width,
};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// How a layout node is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GateKind {
    /// Draws nothing. Stands in for operations that touch no register.
    Invalid,
    Measurement,
    Unitary,
    Swap,
    /// Controlled-X, drawn as a control dot and a target circle.
    Cnot,
    ControlledUnitary,
    /// A box with two alternative branches selected by a classical bit.
    ClassicallyControlled,
    /// A collapsible box around nested operations.
    Group,
}

/// The line joining a target group to the one above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Connector {
    /// The groups are separated by a wire the gate does not act on.
    Dashed,
    /// The groups are on adjacent wires but split by a control or classical wire.
    Solid,
}

/// A run of targets on adjacent wires, drawn as one box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TargetGroup {
    pub ys: Vec<f64>,
    /// `None` for the top-most group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector: Option<Connector>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TargetsY {
    Flat(Vec<f64>),
    Grouped(Vec<TargetGroup>),
}

impl TargetsY {
    /// Every target y, regardless of grouping.
    #[must_use]
    pub fn all(&self) -> Vec<f64> {
        match self {
            TargetsY::Flat(ys) => ys.clone(),
            TargetsY::Grouped(groups) => groups
                .iter()
                .flat_map(|group| group.ys.iter().copied())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeChildren {
    /// Operations rendered when the classical bit is 0 and when it is 1.
    Branches {
        on_zero: Vec<LayoutNode>,
        on_one: Vec<LayoutNode>,
    },
    Group(Vec<LayoutNode>),
}

/// Resolved geometry of one visual gate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    #[serde(rename = "type")]
    pub kind: GateKind,
    /// Center of the gate box.
    pub x: f64,
    pub controls_y: Vec<f64>,
    pub targets_y: TargetsY,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_args: Option<String>,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<NodeChildren>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data_attributes: BTreeMap<String, String>,
}

impl LayoutNode {
    fn invalid() -> Self {
        Self {
            kind: GateKind::Invalid,
            x: 0.0,
            controls_y: vec![],
            targets_y: TargetsY::Flat(vec![]),
            label: String::new(),
            display_args: None,
            width: 0.0,
            children: None,
            data_attributes: BTreeMap::new(),
        }
    }

    /// Left edge of the gate box.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    /// Right edge of the gate box.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Moves the node and every nested node right by `dx`.
    #[must_use]
    pub fn shifted(mut self, dx: f64) -> Self {
        self.x += dx;
        self.children = self.children.map(|children| match children {
            NodeChildren::Branches { on_zero, on_one } => NodeChildren::Branches {
                on_zero: shift_all(on_zero, dx),
                on_one: shift_all(on_one, dx),
            },
            NodeChildren::Group(children) => NodeChildren::Group(shift_all(children, dx)),
        });
        self
    }
}

fn shift_all(nodes: Vec<LayoutNode>, dx: f64) -> Vec<LayoutNode> {
    nodes.into_iter().map(|node| node.shifted(dx)).collect()
}

/// Horizontal extent of one aligned column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Column {
    /// Left edge of the column.
    pub x: f64,
    pub width: f64,
}

/// A finished layout, ready to be drawn.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    /// One node per input operation, in input order.
    pub operations: Vec<LayoutNode>,
    pub columns: Vec<Column>,
    pub registers: RegisterMap,
    pub width: f64,
    pub height: f64,
}

/// Computes the layout of a circuit.
pub fn layout(circuit: &Circuit, config: &LayoutConfig) -> Result<Layout, Error> {
    let registers = RegisterMap::allocate(&circuit.qubits, config)?;
    let resolver = Resolver {
        registers: &registers,
        config,
    };
    let pass = resolver.process(&circuit.operations, config.start_x, &[])?;

    let width = pass
        .columns
        .last()
        .map_or(config.start_x, |last| {
            last.x + last.width + config.gate_padding * 3.0
        });
    debug!(
        "laid out {} operations in {} columns on {} qubits",
        pass.nodes.len(),
        pass.columns.len(),
        registers.qubits().len()
    );

    Ok(Layout {
        operations: pass.nodes,
        columns: pass.columns,
        height: registers.height(),
        registers,
        width,
    })
}

/// Nodes and columns of one operation list laid out from a given origin.
struct Pass {
    nodes: Vec<LayoutNode>,
    columns: Vec<Column>,
}

impl Pass {
    /// Distance from the origin to the right edge of the last column.
    fn content_width(&self, origin: f64) -> f64 {
        self.columns
            .last()
            .map_or(0.0, |last| last.x + last.width - origin)
    }
}

struct Resolver<'a> {
    registers: &'a RegisterMap,
    config: &'a LayoutConfig,
}

impl Resolver<'_> {
    /// Lays out an operation list with its first column starting at `origin`.
    /// Nested operations are laid out recursively from origin 0 and shifted
    /// into place once their parent's position is known.
    ///
    /// `started` holds the ys of classical wires already written before this
    /// list begins, as seen from an enclosing scope.
    fn process<'o>(
        &self,
        operations: impl IntoIterator<Item = &'o Operation>,
        origin: f64,
        started: &[f64],
    ) -> Result<Pass, Error> {
        let ops = ingest(operations);
        let grouped_ops = group_operations(&ops, self.registers)?;
        let aligned_ops = align_ops(&grouped_ops);
        let assignment = ColumnAssignment::new(&aligned_ops)?;
        let classical_starts = self.classical_register_starts(&ops, &aligned_ops)?;

        // Every node is measured before any column width is fixed.
        let mut measured = Vec::with_capacity(ops.len());
        for (position, entry) in ops.iter().enumerate() {
            let column = assignment.column_of(entry.seq);
            let node = match column {
                Some(col) => {
                    // Wires measured in this column or earlier, plus those inherited.
                    let started_here = classical_starts
                        .iter()
                        .filter(|(start_col, _)| *start_col <= col)
                        .map(|(_, y)| *y)
                        .chain(started.iter().copied())
                        .collect::<Vec<_>>();
                    self.measure(entry.op, &started_here)
                        .map_err(|error| match error {
                            Error::Usage(error) => Error::InvalidOperation {
                                gate: entry.op.gate.clone(),
                                position,
                                error,
                            },
                            violation @ Error::InvariantViolation(_) => violation,
                            nested => Error::NestedOperation {
                                gate: entry.op.gate.clone(),
                                position,
                                error: Box::new(nested),
                            },
                        })?
                }
                None => LayoutNode::invalid(),
            };
            measured.push((column, node));
        }

        let mut widths = vec![self.config.min_gate_width; assignment.num_columns()];
        for (column, node) in &measured {
            if let Some(col) = column {
                let width = widths.get_mut(*col).ok_or_else(|| {
                    Error::InvariantViolation(format!(
                        "column {col} out of range of {} columns",
                        assignment.num_columns()
                    ))
                })?;
                *width = width.max(node.width);
            }
        }

        let mut curr_x = origin;
        let columns = widths
            .into_iter()
            .map(|width| {
                let column = Column { x: curr_x, width };
                curr_x += width + self.config.gate_padding * 2.0;
                column
            })
            .collect::<Vec<_>>();

        let nodes = measured
            .into_iter()
            .map(|(column, node)| match column {
                Some(col) => self.place(node, columns[col]),
                None => node,
            })
            .collect();

        Ok(Pass { nodes, columns })
    }

    /// Centers a node in its column and moves nested nodes inside its box.
    fn place(&self, node: LayoutNode, column: Column) -> LayoutNode {
        let x = column.x + column.width / 2.0;
        let left = x - node.width / 2.0;
        let inset = match node.kind {
            GateKind::ClassicallyControlled => {
                self.config.group_box_padding + self.config.control_btn_offset
            }
            _ => self.config.group_box_padding,
        };

        let children = node.children.map(|children| match children {
            NodeChildren::Branches { on_zero, on_one } => NodeChildren::Branches {
                on_zero: shift_all(on_zero, left + inset),
                on_one: shift_all(on_one, left + inset),
            },
            NodeChildren::Group(children) => {
                NodeChildren::Group(shift_all(children, left + inset))
            }
        });

        LayoutNode {
            x,
            children,
            ..node
        }
    }

    /// Measures one operation: its kind, y coordinates, label and width.
    /// The x coordinate is filled in once column widths are known.
    ///
    /// `started` holds the ys of the classical wires written by the time the
    /// operation's column is reached.
    fn measure(&self, op: &Operation, started: &[f64]) -> Result<LayoutNode, Error> {
        let controls_y = self.ys(&op.controls)?;
        let targets_y = self.ys(&op.targets)?;

        let mut label = op.gate.clone();
        if op.is_adjoint && !label.is_empty() {
            label.push('\'');
        }

        let mut node = LayoutNode {
            kind: GateKind::Unitary,
            x: 0.0,
            controls_y,
            targets_y: TargetsY::Flat(targets_y),
            label,
            display_args: op.display_args.clone(),
            width: 0.0,
            children: None,
            data_attributes: op.data_attributes.clone(),
        };

        if op.is_conditional {
            if op.children.is_empty() {
                return Err(UsageError::MissingBranches.into());
            }
            let on_zero = self.process(
                op.children
                    .iter()
                    .filter(|child| child.conditional_render != ConditionalRender::OnOne),
                0.0,
                started,
            )?;
            let on_one = self.process(
                op.children
                    .iter()
                    .filter(|child| child.conditional_render != ConditionalRender::OnZero),
                0.0,
                started,
            )?;

            let branches_width = on_zero.content_width(0.0).max(on_one.content_width(0.0));
            node.kind = GateKind::ClassicallyControlled;
            node.width = self.text_width(&node).max(
                branches_width
                    + self.config.control_btn_offset
                    + self.config.group_box_padding * 2.0,
            );
            // The box surrounds every qubit since either branch may act on any of them.
            node.targets_y = TargetsY::Flat(
                self.registers
                    .qubit_extent()
                    .map(|(top, bottom)| vec![top, bottom])
                    .unwrap_or_default(),
            );
            node.children = Some(NodeChildren::Branches {
                on_zero: on_zero.nodes,
                on_one: on_one.nodes,
            });
            return Ok(node);
        }

        if op.is_group() {
            let children = self.process(&op.children, 0.0, started)?;
            let (top, bottom) = if op.spans_all_rows() {
                self.registers.qubit_extent().unwrap_or_default()
            } else {
                let spanned = self.ys(&op.spanned_registers())?;
                (
                    spanned.iter().copied().fold(f64::INFINITY, f64::min),
                    spanned.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                )
            };

            node.kind = GateKind::Group;
            node.width = self.text_width(&node).max(
                children.content_width(0.0) + self.config.group_box_padding * 2.0,
            );
            node.targets_y = TargetsY::Flat(vec![top, bottom]);
            node.children = Some(NodeChildren::Group(children.nodes));
            node.data_attributes
                .insert("expanded".to_string(), "true".to_string());
            return Ok(node);
        }

        node.kind = if op.is_measurement {
            GateKind::Measurement
        } else if op.gate == "SWAP" {
            GateKind::Swap
        } else if op.is_controlled {
            if op.gate == "X" {
                GateKind::Cnot
            } else {
                GateKind::ControlledUnitary
            }
        } else {
            GateKind::Unitary
        };

        node.width = match node.kind {
            GateKind::Measurement | GateKind::Swap | GateKind::Cnot => {
                self.config.min_gate_width
            }
            _ => self.text_width(&node),
        };

        if matches!(node.kind, GateKind::Unitary | GateKind::ControlledUnitary) {
            // Controls and classical wires already in use in this column split
            // the target boxes.
            let extras = started
                .iter()
                .chain(&node.controls_y)
                .copied()
                .collect::<Vec<_>>();
            node.targets_y = TargetsY::Grouped(self.split_targets(&op.targets, &extras)?);
        }

        Ok(node)
    }

    fn ys(&self, registers: &[Register]) -> Result<Vec<f64>, UsageError> {
        registers.iter().map(|reg| self.registers.y_of(reg)).collect()
    }

    /// Width of the box needed to fit the label and display arguments.
    fn text_width(&self, node: &LayoutNode) -> f64 {
        let label_width = string_width(&node.label, self.config.label_font_size);
        let args_width = node
            .display_args
            .as_deref()
            .map_or(0.0, |args| string_width(args, self.config.args_font_size));
        let text_width = label_width.max(args_width) + self.config.label_padding * 2.0;
        self.config.min_gate_width.max(text_width)
    }

    /// Splits targets into runs of adjacent wires, each drawn as its own box.
    ///
    /// A new run starts when the next target is not on the qubit directly
    /// below the previous one (joined with a dashed line), or when one of
    /// `extras` lies strictly between them (joined with a solid line).
    fn split_targets(
        &self,
        targets: &[Register],
        extras: &[f64],
    ) -> Result<Vec<TargetGroup>, UsageError> {
        if targets.is_empty() {
            return Err(UsageError::NoTargets);
        }

        let mut ordered = targets
            .iter()
            .map(|reg| -> Result<(usize, f64), UsageError> {
                Ok((self.registers.position(reg.qubit)?, self.registers.y_of(reg)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        ordered.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut groups: Vec<TargetGroup> = vec![];
        let mut prev: Option<(usize, f64)> = None;
        for (pos, y) in ordered {
            // `Some(connector)` when this target starts a new box
            let starts_group = match prev {
                None => Some(None),
                Some((prev_pos, _)) if pos > prev_pos + 1 => Some(Some(Connector::Dashed)),
                Some((_, prev_y)) if extras.iter().any(|&e| e > prev_y && e < y) => {
                    Some(Some(Connector::Solid))
                }
                Some(_) => None,
            };
            match starts_group {
                Some(connector) => groups.push(TargetGroup {
                    ys: vec![y],
                    connector,
                }),
                None => {
                    if let Some(group) = groups.last_mut() {
                        group.ys.push(y);
                    }
                }
            }
            prev = Some((pos, y));
        }

        Ok(groups)
    }

    /// Finds the column in which each classical wire starts, that is, the
    /// column of the measurement that writes it.
    fn classical_register_starts(
        &self,
        ops: &[Ingested],
        aligned_ops: &[Vec<Option<Seq>>],
    ) -> Result<Vec<(usize, f64)>, UsageError> {
        let mut starts = vec![];
        for (col, column_ops) in transform_to_col_row(aligned_ops).iter().enumerate() {
            let mut seen = vec![];
            for seq in column_ops.iter().flatten() {
                if seen.contains(seq) {
                    continue;
                }
                seen.push(*seq);
                let Some(entry) = position_of(ops, *seq).map(|pos| ops[pos]) else {
                    continue;
                };
                if !entry.op.is_measurement {
                    continue;
                }
                for reg in entry.op.targets.iter().filter(|reg| reg.is_classical()) {
                    starts.push((col, self.registers.y_of(reg)?));
                }
            }
        }
        Ok(starts)
    }
}
