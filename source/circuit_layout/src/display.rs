// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Line-oriented text dump of a finished layout.

use crate::layout::{Connector, GateKind, Layout, LayoutNode, NodeChildren, TargetsY};
use indenter::indented;
use std::fmt::{self, Display, Formatter, Write};

/// Formats a coordinate with at most two decimals and no trailing zeros.
struct Num(f64);

impl Display for Num {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = format!("{:.2}", self.0);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" {
            f.write_str("0")
        } else {
            f.write_str(s)
        }
    }
}

struct Ys<'a>(&'a [f64]);

impl Display for Ys<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (i, y) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", Num(*y))?;
        }
        f.write_char(']')
    }
}

impl Display for TargetsY {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TargetsY::Flat(ys) => write!(f, "{}", Ys(ys)),
            TargetsY::Grouped(groups) => {
                for group in groups {
                    match group.connector {
                        Some(Connector::Dashed) => f.write_str(" .. ")?,
                        Some(Connector::Solid) => f.write_str(" -- ")?,
                        None => {}
                    }
                    write!(f, "{}", Ys(&group.ys))?;
                }
                Ok(())
            }
        }
    }
}

impl Display for LayoutNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.kind == GateKind::Invalid {
            return f.write_str("Invalid");
        }

        write!(
            f,
            "{:?}({}) x={} width={}",
            self.kind,
            self.label,
            Num(self.x),
            Num(self.width)
        )?;
        if let Some(args) = &self.display_args {
            write!(f, " args={args}")?;
        }
        write!(
            f,
            " controls={} targets={}",
            Ys(&self.controls_y),
            self.targets_y
        )?;

        let mut indent = indented(f).with_str("    ");
        match &self.children {
            Some(NodeChildren::Branches { on_zero, on_one }) => {
                for (heading, branch) in [("on zero:", on_zero), ("on one:", on_one)] {
                    write!(indent, "\n{heading}")?;
                    let mut branch_indent = indented(&mut indent).with_str("    ");
                    for child in branch {
                        write!(branch_indent, "\n{child}")?;
                    }
                }
            }
            Some(NodeChildren::Group(children)) => {
                for child in children {
                    write!(indent, "\n{child}")?;
                }
            }
            None => {}
        }
        Ok(())
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "width={} height={}", Num(self.width), Num(self.height))?;
        for node in &self.operations {
            writeln!(f, "{node}")?;
        }
        Ok(())
    }
}
