//! CircuiTikZ markup emitter
//!
//! Turns the normalized wire set and the component list into an ordered list
//! of drawing directives: document open, one line per wire, one bipole per
//! component, document close.
//!
//! Editor coordinates grow downward in pixels. Drawing coordinates are the
//! editor's divided by the grid unit, with `y` negated.

pub mod style;

use std::fmt;

use crate::geometry::DEFAULT_GRID_UNIT;
use crate::parser::schema::{Component, ComponentKind, Position, Wire};

pub use style::{ComponentStyle, LabelClause, LabelSide, Primitive, Unit};

/// How much of a LaTeX document to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentMode {
    /// A complete `standalone` document that compiles on its own.
    #[default]
    Standalone,
    /// Only the `circuitikz` environment, for `\input` into another document.
    Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    DocumentOpen(DocumentMode),
    Line {
        from: Position,
        to: Position,
    },
    TwoTerminal {
        from: Position,
        to: Position,
        style: ComponentStyle,
    },
    DocumentClose(DocumentMode),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::DocumentOpen(mode) => {
                if *mode == DocumentMode::Standalone {
                    writeln!(f, "\\documentclass[border=5mm]{{standalone}}")?;
                    writeln!(f, "\\usepackage[siunitx]{{circuitikz}}")?;
                    writeln!(f, "\\begin{{document}}")?;
                }
                write!(f, "\\begin{{circuitikz}}[american]")
            }
            Directive::Line { from, to } => {
                write!(f, "\\draw {} -- {};", coord(*from), coord(*to))
            }
            Directive::TwoTerminal { from, to, style } => write!(
                f,
                "\\draw[font = {{\\small}}] {} to[{}] {};",
                coord(*from),
                style,
                coord(*to)
            ),
            Directive::DocumentClose(mode) => {
                write!(f, "\\end{{circuitikz}}")?;
                if *mode == DocumentMode::Standalone {
                    write!(f, "\n\\end{{document}}")?;
                }
                Ok(())
            }
        }
    }
}

/// Two-decimal coordinate pair. Values that round to zero print unsigned.
fn coord(p: Position) -> String {
    format!("({},{})", fixed(p.x), fixed(p.y))
}

fn fixed(v: f64) -> String {
    let s = format!("{:.2}", v);
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TikzEmitter {
    grid_unit: f64,
    document: DocumentMode,
}

impl Default for TikzEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_UNIT, DocumentMode::Standalone)
    }
}

impl TikzEmitter {
    pub fn new(grid_unit: f64, document: DocumentMode) -> Self {
        Self { grid_unit, document }
    }

    pub fn emit(&self, wires: &[Wire], components: &[Component]) -> Vec<Directive> {
        let mut directives = Vec::with_capacity(wires.len() + components.len() + 2);
        directives.push(Directive::DocumentOpen(self.document));
        directives.extend(wires.iter().map(|w| self.wire_directive(w)));
        directives.extend(components.iter().map(|c| self.component_directive(c)));
        directives.push(Directive::DocumentClose(self.document));
        directives
    }

    pub fn wire_directive(&self, wire: &Wire) -> Directive {
        Directive::Line {
            from: self.to_drawing(wire.start()),
            to: self.to_drawing(wire.end()),
        }
    }

    /// Bipole centred on the component. Upright (0/180) resistors lie along
    /// x and every other upright part along y; quarter turns swap the axis.
    pub fn component_directive(&self, component: &Component) -> Directive {
        let centre = self.to_drawing(component.position());
        let extent = component.kind.half_extent();
        let is_resistor = component.kind == ComponentKind::Resistor;

        let (from, to) = if component.rotation.is_upright() == is_resistor {
            (
                Position::new(centre.x - extent, centre.y),
                Position::new(centre.x + extent, centre.y),
            )
        } else {
            (
                Position::new(centre.x, centre.y - extent),
                Position::new(centre.x, centre.y + extent),
            )
        };

        Directive::TwoTerminal {
            from,
            to,
            style: ComponentStyle::for_component(component),
        }
    }

    fn to_drawing(&self, p: Position) -> Position {
        Position::new(p.x / self.grid_unit, -p.y / self.grid_unit)
    }
}

/// Join directives into the final document text, one per line.
pub fn render(directives: &[Directive]) -> String {
    let mut out = String::new();
    for directive in directives {
        out.push_str(&directive.to_string());
        out.push('\n');
    }
    out
}
