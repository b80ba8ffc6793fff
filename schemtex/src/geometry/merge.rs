//! Collinear wire merging
//!
//! Drawing a long wire in the editor often leaves several touching or
//! overlapping segments on the same line. Merging them first gives the
//! normalizer whole runs to cut, and the output one `\draw` per run.

use crate::parser::schema::{Orientation, Position, Wire};

/// Merge horizontal wires sharing a `y` and vertical wires sharing an `x`
/// whenever their spans touch or overlap.
///
/// Horizontal runs come first, then vertical runs, each ordered by their
/// constant coordinate and then by start. Merged wires are renumbered
/// `wire-<n>` and take color and thickness from an input wire with the same
/// endpoints, if there is one. Diagonal wires are kept unchanged at the end.
pub fn merge_collinear(wires: &[Wire]) -> Vec<Wire> {
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();
    let mut diagonal = Vec::new();

    for wire in wires {
        // Zero-length wires count as vertical, like everywhere else
        match wire.orientation() {
            Orientation::Horizontal => horizontal.push((wire.y1, span(wire.x1, wire.x2))),
            Orientation::Vertical => vertical.push((wire.x1, span(wire.y1, wire.y2))),
            Orientation::Diagonal => diagonal.push(wire.clone()),
        }
    }

    let runs = merge_runs(horizontal)
        .into_iter()
        .map(|(y, (start, end))| (Position::new(start, y), Position::new(end, y)))
        .chain(
            merge_runs(vertical)
                .into_iter()
                .map(|(x, (start, end))| (Position::new(x, start), Position::new(x, end))),
        );

    let mut merged: Vec<Wire> = runs
        .enumerate()
        .map(|(idx, (start, end))| {
            let mut wire = Wire::new(format!("wire-{}", idx), start.x, start.y, end.x, end.y);
            if let Some(original) = wires.iter().find(|w| w.same_span(&wire)) {
                wire.color = original.color.clone();
                wire.thickness = original.thickness;
            }
            wire
        })
        .collect();

    if merged.len() + diagonal.len() < wires.len() {
        tracing::debug!(
            "Merged {} wires into {} collinear runs",
            wires.len() - diagonal.len(),
            merged.len()
        );
    }

    merged.extend(diagonal);
    merged
}

fn span(a: f64, b: f64) -> (f64, f64) {
    (a.min(b), a.max(b))
}

/// Sort `(line, span)` pairs and fold overlapping spans on the same line.
fn merge_runs(mut segments: Vec<(f64, (f64, f64))>) -> Vec<(f64, (f64, f64))> {
    // -0.0 and 0.0 are the same line; total_cmp would order them apart
    for (line, _) in segments.iter_mut() {
        *line += 0.0;
    }
    segments.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1 .0.total_cmp(&b.1 .0)));

    let mut merged: Vec<(f64, (f64, f64))> = Vec::new();
    for (line, (start, end)) in segments {
        match merged.last_mut() {
            Some((last_line, (_, last_end))) if *last_line == line && start <= *last_end => {
                *last_end = last_end.max(end);
            }
            _ => merged.push((line, (start, end))),
        }
    }
    merged
}
