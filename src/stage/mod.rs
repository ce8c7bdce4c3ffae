/// Decorative layer placement.
pub mod layout;
/// Render tree of element handles and their animated properties.
pub mod tree;
