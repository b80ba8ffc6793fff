pub mod json;
pub mod schema;

// Re-export for convenience
pub use json::{ParseError, SchematicParser};
pub use schema::*;
