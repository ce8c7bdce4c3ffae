/// Time, cursor, direction and transform primitives.
pub mod core;
/// Crate error type.
pub mod error;
