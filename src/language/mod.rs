// Types shared by the scanner, the context classifier, and completion

mod error;
mod finding;
mod types;

// Re-export all public symbols
pub use error::*;
pub use finding::*;
pub use types::*;
