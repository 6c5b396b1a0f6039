use crate::language::Severity;

/// A single validation problem found while scanning text. Every variant
/// carries the byte offset of the problem and, where the problem spans more
/// than one character, its width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    UnmatchedClosingBracket(usize),
    UnclosedBracket(usize),
    TimeFormatInMath(usize, usize),
    NonMathematicalContent(usize, usize),
    NoMathematicalOperations(usize, usize),
    InvalidMathExpression(usize, usize),
    MissingDefault(usize, usize, String),
    DeprecatedVariable(usize, usize, String, Option<String>),
    ParentDirectoryPath(usize, usize),
    InvalidPathCharacters(usize, usize),
    UnclosedLookahead(usize, usize),
    InvalidRegex(usize, usize, String),
    InvalidRegexFlags(usize, usize, String),
    MissingCssUnit(usize, usize),
}

impl Finding {
    pub fn offset(&self) -> usize {
        match self {
            Finding::UnmatchedClosingBracket(offset) => *offset,
            Finding::UnclosedBracket(offset) => *offset,
            Finding::TimeFormatInMath(offset, _) => *offset,
            Finding::NonMathematicalContent(offset, _) => *offset,
            Finding::NoMathematicalOperations(offset, _) => *offset,
            Finding::InvalidMathExpression(offset, _) => *offset,
            Finding::MissingDefault(offset, _, _) => *offset,
            Finding::DeprecatedVariable(offset, _, _, _) => *offset,
            Finding::ParentDirectoryPath(offset, _) => *offset,
            Finding::InvalidPathCharacters(offset, _) => *offset,
            Finding::UnclosedLookahead(offset, _) => *offset,
            Finding::InvalidRegex(offset, _, _) => *offset,
            Finding::InvalidRegexFlags(offset, _, _) => *offset,
            Finding::MissingCssUnit(offset, _) => *offset,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Finding::UnmatchedClosingBracket(_) => 1,
            Finding::UnclosedBracket(_) => 1,
            Finding::TimeFormatInMath(_, width) => *width,
            Finding::NonMathematicalContent(_, width) => *width,
            Finding::NoMathematicalOperations(_, width) => *width,
            Finding::InvalidMathExpression(_, width) => *width,
            Finding::MissingDefault(_, width, _) => *width,
            Finding::DeprecatedVariable(_, width, _, _) => *width,
            Finding::ParentDirectoryPath(_, width) => *width,
            Finding::InvalidPathCharacters(_, width) => *width,
            Finding::UnclosedLookahead(_, width) => *width,
            Finding::InvalidRegex(_, width, _) => *width,
            Finding::InvalidRegexFlags(_, width, _) => *width,
            Finding::MissingCssUnit(_, width) => *width,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Finding::UnmatchedClosingBracket(_)
            | Finding::UnclosedBracket(_)
            | Finding::TimeFormatInMath(_, _)
            | Finding::NonMathematicalContent(_, _)
            | Finding::InvalidMathExpression(_, _)
            | Finding::InvalidPathCharacters(_, _)
            | Finding::UnclosedLookahead(_, _)
            | Finding::InvalidRegex(_, _, _)
            | Finding::InvalidRegexFlags(_, _, _) => Severity::Error,
            Finding::NoMathematicalOperations(_, _)
            | Finding::MissingDefault(_, _, _)
            | Finding::DeprecatedVariable(_, _, _, _)
            | Finding::ParentDirectoryPath(_, _)
            | Finding::MissingCssUnit(_, _) => Severity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Finding::UnmatchedClosingBracket(_) => "Unmatched closing bracket".to_string(),
            Finding::UnclosedBracket(_) => "Unclosed bracket".to_string(),
            Finding::TimeFormatInMath(_, _) => {
                "Time format string should not be wrapped in $math[]".to_string()
            }
            Finding::NonMathematicalContent(_, _) => {
                "Invalid content in $math[], contains non-mathematical characters".to_string()
            }
            Finding::NoMathematicalOperations(_, _) => {
                "No mathematical operations found in $math[]".to_string()
            }
            Finding::InvalidMathExpression(_, _) => "Invalid mathematical expression".to_string(),
            Finding::MissingDefault(_, _, name) => format!("{} requires a default value", name),
            Finding::DeprecatedVariable(_, _, name, replacement) => match replacement {
                Some(replacement) => format!("{} is deprecated, use {} instead", name, replacement),
                None => format!("{} is deprecated", name),
            },
            Finding::ParentDirectoryPath(_, _) => {
                "Path should not contain parent directory references".to_string()
            }
            Finding::InvalidPathCharacters(_, _) => "Path contains invalid characters".to_string(),
            Finding::UnclosedLookahead(_, _) => "Unclosed look-ahead".to_string(),
            Finding::InvalidRegex(_, _, reason) => format!("Invalid regex pattern: {}", reason),
            Finding::InvalidRegexFlags(_, _, flags) => format!("Invalid regex flags '{}'", flags),
            Finding::MissingCssUnit(_, _) => "CSS numeric values should include units".to_string(),
        }
    }

    /// Move this finding by `by` bytes. Validators report positions relative
    /// to the text they were handed; the scanner uses this to make them
    /// absolute.
    pub fn shifted(self, by: usize) -> Finding {
        match self {
            Finding::UnmatchedClosingBracket(offset) => Finding::UnmatchedClosingBracket(offset + by),
            Finding::UnclosedBracket(offset) => Finding::UnclosedBracket(offset + by),
            Finding::TimeFormatInMath(offset, width) => Finding::TimeFormatInMath(offset + by, width),
            Finding::NonMathematicalContent(offset, width) => {
                Finding::NonMathematicalContent(offset + by, width)
            }
            Finding::NoMathematicalOperations(offset, width) => {
                Finding::NoMathematicalOperations(offset + by, width)
            }
            Finding::InvalidMathExpression(offset, width) => {
                Finding::InvalidMathExpression(offset + by, width)
            }
            Finding::MissingDefault(offset, width, name) => {
                Finding::MissingDefault(offset + by, width, name)
            }
            Finding::DeprecatedVariable(offset, width, name, replacement) => {
                Finding::DeprecatedVariable(offset + by, width, name, replacement)
            }
            Finding::ParentDirectoryPath(offset, width) => {
                Finding::ParentDirectoryPath(offset + by, width)
            }
            Finding::InvalidPathCharacters(offset, width) => {
                Finding::InvalidPathCharacters(offset + by, width)
            }
            Finding::UnclosedLookahead(offset, width) => Finding::UnclosedLookahead(offset + by, width),
            Finding::InvalidRegex(offset, width, reason) => {
                Finding::InvalidRegex(offset + by, width, reason)
            }
            Finding::InvalidRegexFlags(offset, width, flags) => {
                Finding::InvalidRegexFlags(offset + by, width, flags)
            }
            Finding::MissingCssUnit(offset, width) => Finding::MissingCssUnit(offset + by, width),
        }
    }
}
