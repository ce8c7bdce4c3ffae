//! The controller and its navigation state.

pub mod controller;
pub mod nav;
pub mod script;
