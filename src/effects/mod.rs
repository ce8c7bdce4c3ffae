pub mod parallax;
pub mod transitions;
