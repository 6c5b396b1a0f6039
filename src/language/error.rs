use std::io;
use std::{fmt, path::Path};

/// A document that could not be read, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> LoadingError<'i> {
    pub fn from_io(filename: &'i Path, error: &io::Error) -> LoadingError<'i> {
        let (problem, details) = match error.kind() {
            io::ErrorKind::NotFound => ("File not found", String::new()),
            io::ErrorKind::PermissionDenied => ("Permission denied", String::new()),
            io::ErrorKind::InvalidData => ("File is not valid UTF-8 text", String::new()),
            kind => ("Failed reading", kind.to_string()),
        };

        LoadingError {
            problem: problem.to_string(),
            details,
            filename,
        }
    }
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.filename.display(), self.problem)?;
        if !self.details.is_empty() {
            write!(f, " ({})", self.details)?;
        }
        Ok(())
    }
}
