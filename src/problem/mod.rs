// Terminal presentation of findings and loading errors

mod format;

// Re-export all public symbols
pub use format::*;
