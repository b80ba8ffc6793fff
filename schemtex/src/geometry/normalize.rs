//! Wire/component overlap normalization
//!
//! The editor lets a wire run straight through a component. CircuiTikZ draws
//! the component body itself, so a wire crossing the body has to be cut into
//! two segments that stop at the body's edge. All comparisons are exact:
//! coordinates are expected to sit on the editor's grid.

use crate::parser::schema::{Component, Orientation, Position, Wire};

/// Editor pixels per CircuiTikZ drawing unit.
pub const DEFAULT_GRID_UNIT: f64 = 75.0;

/// True if the component's centre lies strictly inside an axis-aligned wire.
/// A component sitting on an endpoint is already terminal and does not count.
pub fn is_on_wire(component: &Component, wire: &Wire) -> bool {
    let (cx, cy) = (component.x, component.y);
    match wire.orientation() {
        Orientation::Vertical => {
            cx == wire.x1 && wire.y1.min(wire.y2) < cy && cy < wire.y1.max(wire.y2)
        }
        Orientation::Horizontal => {
            cy == wire.y1 && wire.x1.min(wire.x2) < cx && cx < wire.x1.max(wire.x2)
        }
        Orientation::Diagonal => false,
    }
}

/// Cut `wire` at the body of `component`.
///
/// The first segment keeps `(x1, y1)` and ends at the body edge facing it,
/// the second starts at the opposite edge and keeps `(x2, y2)`. Callers must
/// have checked [`is_on_wire`] first.
pub fn split(wire: &Wire, component: &Component, grid_unit: f64) -> (Wire, Wire) {
    let (cx, cy) = (component.x, component.y);
    let offset = component.kind.half_extent() * grid_unit;

    let upper = (cy - offset).min(cy + offset);
    let lower = (cy - offset).max(cy + offset);
    let left = (cx - offset).min(cx + offset);
    let right = (cx - offset).max(cx + offset);

    let (near_start, near_end) = match wire.orientation() {
        Orientation::Vertical => {
            if wire.y1 < cy {
                (Position::new(cx, upper), Position::new(cx, lower))
            } else {
                (Position::new(cx, lower), Position::new(cx, upper))
            }
        }
        _ => {
            if wire.x1 < cx {
                (Position::new(left, cy), Position::new(right, cy))
            } else {
                (Position::new(right, cy), Position::new(left, cy))
            }
        }
    };

    (
        wire.derive(format!("{}.1", wire.id), wire.start(), near_start),
        wire.derive(format!("{}.2", wire.id), near_end, wire.end()),
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Number of wires replaced by a pair of segments.
    pub splits: usize,
    /// Wires that are neither horizontal nor vertical, left as drawn.
    pub diagonal_wires: usize,
}

/// Rewrites a wire set so no wire passes through a component body.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    grid_unit: f64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_UNIT)
    }
}

impl Normalizer {
    pub fn new(grid_unit: f64) -> Self {
        Self { grid_unit }
    }

    pub fn grid_unit(&self) -> f64 {
        self.grid_unit
    }

    pub fn normalize(&self, components: &[Component], wires: &[Wire]) -> Vec<Wire> {
        self.normalize_with_report(components, wires).0
    }

    /// Components are handled in input order. For each one the live wire set
    /// is scanned as it stood before that component, every matching wire is
    /// removed and its two segments are appended at the end. Segments created
    /// by one component are seen by the components after it.
    pub fn normalize_with_report(
        &self,
        components: &[Component],
        wires: &[Wire],
    ) -> (Vec<Wire>, NormalizeReport) {
        let mut report = NormalizeReport {
            splits: 0,
            diagonal_wires: wires
                .iter()
                .filter(|w| w.orientation() == Orientation::Diagonal)
                .count(),
        };
        let mut live: Vec<Wire> = wires.to_vec();

        for component in components {
            let matched: Vec<bool> = live.iter().map(|w| is_on_wire(component, w)).collect();
            if !matched.contains(&true) {
                continue;
            }

            let mut replacements = Vec::new();
            for (wire, _) in live.iter().zip(&matched).filter(|(_, m)| **m) {
                tracing::debug!(
                    "Splitting wire {} at {} {} ({}, {})",
                    wire.id,
                    component.kind,
                    component.id,
                    component.x,
                    component.y
                );
                let (first, second) = split(wire, component, self.grid_unit);
                replacements.push(first);
                replacements.push(second);
            }
            report.splits += replacements.len() / 2;

            let mut flags = matched.iter();
            live.retain(|_| !flags.next().copied().unwrap_or(false));
            live.extend(replacements);
        }

        (live, report)
    }
}
