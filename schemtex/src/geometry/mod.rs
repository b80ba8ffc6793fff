//! Wire geometry passes run before emitting markup.

pub mod merge;
pub mod normalize;

pub use merge::merge_collinear;
pub use normalize::{is_on_wire, split, NormalizeReport, Normalizer, DEFAULT_GRID_UNIT};
