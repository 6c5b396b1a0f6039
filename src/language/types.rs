use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How serious a finding is. Ordered from most to least severe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// The kind of document a variable expression is embedded in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Markup,
    Stylesheet,
    Script,
}

impl DocumentKind {
    /// Map an editor language identifier onto a document kind. Languages we
    /// don't know how to check return None.
    pub fn from_language_id(language: &str) -> Option<DocumentKind> {
        match language {
            "html" => Some(DocumentKind::Markup),
            "css" => Some(DocumentKind::Stylesheet),
            "javascript" | "firebot-variables" => Some(DocumentKind::Script),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<DocumentKind> {
        let extension = path
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        match extension.as_str() {
            "html" | "htm" => Some(DocumentKind::Markup),
            "css" => Some(DocumentKind::Stylesheet),
            "js" | "mjs" | "txt" | "fbv" => Some(DocumentKind::Script),
            _ => None,
        }
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markup" => Ok(DocumentKind::Markup),
            "stylesheet" => Ok(DocumentKind::Stylesheet),
            "script" => Ok(DocumentKind::Script),
            _ => Err(format!("unknown document kind '{}'", s)),
        }
    }
}

pub fn is_sigil(c: char) -> bool {
    c == '$' || c == '&'
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Extract the variable token at the very start of `text`, if there is one.
///
/// A token is a sigil (`$` or `&`), optionally a second sigil (as in `$$name`
/// and `$&name`), and then identifier characters. A lone sigil is not a
/// token.
pub fn variable_token(text: &str) -> Option<&str> {
    let mut chars = text.char_indices();

    match chars.next() {
        Some((_, c)) if is_sigil(c) => {}
        _ => return None,
    }

    let mut end = 1;
    let mut rest = chars.peekable();

    if let Some(&(i, c)) = rest.peek() {
        if is_sigil(c) {
            end = i + c.len_utf8();
            rest.next();
        }
    }

    for (i, c) in rest {
        if is_identifier_char(c) {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }

    if end < 2 {
        None
    } else {
        Some(&text[..end])
    }
}

/// Replace every variable reference in `text`, along with any bracketed
/// argument lists directly following it (nested to any depth), by
/// `replacement`. An argument list left open runs to the end of the text.
pub fn replace_references(text: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];

        if let Some(token) = variable_token(rest) {
            i += token.len();
            while text[i..].starts_with('[') {
                i += bracketed_length(&text[i..]);
            }
            result.push_str(replacement);
            continue;
        }

        match rest
            .chars()
            .next()
        {
            Some(c) => {
                result.push(c);
                i += c.len_utf8();
            }
            None => break,
        }
    }

    result
}

/// Length of the bracketed group at the start of `text`, including both
/// delimiters, or the remainder of the text if it is never closed.
pub(crate) fn bracketed_length(text: &str) -> usize {
    let mut depth = 0;

    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
    }

    text.len()
}
