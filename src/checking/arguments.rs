//! Checks applied to the arguments of specific variables: file paths must be
//! safe, and regular expressions must compile.

use tracing::debug;

use crate::language::{replace_references, Finding};

const FILE_VARIABLES: [&str; 6] = [
    "$readFile",
    "$fileExists",
    "$filesInDirectory",
    "$fileLineCount",
    "$audioDuration",
    "$videoDuration",
];

const REGEX_VARIABLES: [&str; 4] = [
    "$regexTest",
    "$regexExec",
    "$regexMatches",
    "$filesInDirectory",
];

const REGEX_FLAGS: &str = "dgimsuvy";

/// One top-level argument of a bracketed argument list, with surrounding
/// whitespace removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Argument<'i> {
    pub offset: usize,
    pub text: &'i str,
}

/// Split an argument list at commas which are not inside nested brackets.
pub(crate) fn split_arguments(content: &str) -> Vec<Argument<'_>> {
    let mut arguments = Vec::new();
    let mut depth = 0usize;
    let mut begin = 0;

    for (i, c) in content.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                arguments.push(trimmed(content, begin, i));
                begin = i + 1;
            }
            _ => {}
        }
    }
    arguments.push(trimmed(content, begin, content.len()));

    arguments
}

fn trimmed(content: &str, begin: usize, end: usize) -> Argument<'_> {
    let raw = &content[begin..end];
    let leading = raw.len()
        - raw
            .trim_start()
            .len();

    Argument {
        offset: begin + leading,
        text: raw.trim(),
    }
}

/// Run the argument checks relevant to `owner` against the raw text between
/// its brackets. Offsets are relative to the start of `content`.
pub(crate) fn check_arguments(owner: &str, content: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let arguments = split_arguments(content);

    if FILE_VARIABLES.contains(&owner) {
        if let Some(path) = arguments.first() {
            findings.extend(check_path(path));
        }
    }

    if REGEX_VARIABLES.contains(&owner) {
        if let Some(pattern) = arguments.get(1) {
            findings.extend(check_regex(pattern, arguments.get(2)));
        }
    } else if owner == "$replace" {
        // $replace[input, search, replacement, searchIsRegex, flags]
        let is_regex = arguments
            .get(3)
            .map(|argument| argument.text == "true")
            .unwrap_or(false);

        if is_regex {
            if let Some(pattern) = arguments.get(1) {
                findings.extend(check_regex(pattern, arguments.get(4)));
            }
        }
    }

    findings
}

fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

fn check_path(argument: &Argument) -> Option<Finding> {
    let path = strip_quotes(argument.text);

    if path.contains("://") {
        return None;
    }

    let path = replace_references(path, "placeholder");

    if path.contains("..") {
        return Some(Finding::ParentDirectoryPath(
            argument.offset,
            argument
                .text
                .len(),
        ));
    }

    let invalid = path
        .char_indices()
        .any(|(i, c)| match c {
            '<' | '>' | '"' | '|' | '?' | '*' => true,
            ':' => !is_drive_letter(&path, i),
            _ => false,
        });

    if invalid {
        return Some(Finding::InvalidPathCharacters(
            argument.offset,
            argument
                .text
                .len(),
        ));
    }

    None
}

fn is_drive_letter(path: &str, colon: usize) -> bool {
    colon == 1
        && path
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic())
            .unwrap_or(false)
}

fn contains_reference(text: &str) -> bool {
    crate::regex!(r"[$&][$&]?[A-Za-z_]").is_match(text)
}

fn check_regex(pattern: &Argument, flags: Option<&Argument>) -> Vec<Finding> {
    let mut findings = Vec::new();
    let text = pattern.text;
    let width = text.len();

    if !text.is_empty() && !contains_reference(text) {
        if let Some(finding) = compile_pattern(text, pattern.offset, width) {
            findings.push(finding);
        }
    }

    if let Some(flags) = flags {
        if !flags
            .text
            .is_empty()
            && !contains_reference(flags.text)
            && !valid_flags(flags.text)
        {
            findings.push(Finding::InvalidRegexFlags(
                flags.offset,
                flags
                    .text
                    .len(),
                flags
                    .text
                    .to_string(),
            ));
        }
    }

    findings
}

fn compile_pattern(text: &str, offset: usize, width: usize) -> Option<Finding> {
    for lookahead in ["(?=", "(?!"] {
        if let Some(i) = text.find(lookahead) {
            if !text[i..].contains(')') {
                return Some(Finding::UnclosedLookahead(offset, width));
            }
        }
    }

    match regex::Regex::new(text) {
        Ok(_) => None,
        Err(regex::Error::Syntax(message)) => {
            if is_unsupported_construct(&message) {
                debug!("Accepting pattern the regex crate cannot express: {:?}", text);
                None
            } else {
                Some(Finding::InvalidRegex(offset, width, reason(&message)))
            }
        }
        Err(error) => {
            debug!("Not validating pattern {:?}: {}", text, error);
            None
        }
    }
}

/// Look-around and back-references are valid in the JavaScript engine Firebot
/// evaluates patterns with, but not in the regex crate.
fn is_unsupported_construct(message: &str) -> bool {
    message.contains("look-around") || message.contains("backreferences")
}

/// The regex crate reports syntax errors as several lines with a caret
/// diagram; keep only the line that says what is wrong.
fn reason(message: &str) -> String {
    message
        .lines()
        .find_map(|line| {
            line.trim()
                .strip_prefix("error: ")
        })
        .unwrap_or("malformed pattern")
        .to_string()
}

fn valid_flags(flags: &str) -> bool {
    let mut seen = String::new();

    for c in flags.chars() {
        if !REGEX_FLAGS.contains(c) || seen.contains(c) {
            return false;
        }
        seen.push(c);
    }

    true
}
