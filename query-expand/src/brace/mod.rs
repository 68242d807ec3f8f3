// Brace expansion for parameter patterns
// Scanner locates groups, expander walks them recursively

pub mod expander;
pub mod scanner;

pub use expander::BraceExpander;
pub use scanner::{unescape, Group, ScanView};
