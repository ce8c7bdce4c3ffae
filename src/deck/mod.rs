//! Deck configuration: data model, builders and CSS-like lengths.

pub mod dsl;
pub mod length;
pub mod model;
