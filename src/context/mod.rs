//! Classification of the syntactic situation at the cursor, used to decide
//! which completions to offer.

use tracing::debug;

use crate::checking::frame::Frames;
use crate::checking::style_regions;
use crate::language::{is_sigil, variable_token, DocumentKind};

const REGEX_VARIABLES: [&str; 4] = ["$replace", "$regexTest", "$regexExec", "$regexMatches"];

/// Where the cursor is. Created fresh for every completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    /// Inside the open argument list of some variable.
    pub is_nested: bool,
    /// Inside the open argument list of a `$math[`.
    pub in_math: bool,
    /// A regex bearing variable appears earlier on the line.
    pub in_regex_argument: bool,
    /// In a stylesheet, a `<style>` element, or an inline style.
    pub in_style_context: bool,
    /// The variable owning the innermost open argument list.
    pub parent_variable: Option<String>,
    /// Text from the start of the line up to the cursor.
    pub text_before_cursor: String,
}

/// Classify the cursor at byte offset `cursor` within `text`.
pub fn classify(text: &str, cursor: usize, kind: DocumentKind) -> CompletionContext {
    let cursor = floor_char_boundary(text, cursor);

    let line_start = match text[..cursor].rfind('\n') {
        Some(i) => i + 1,
        None => 0,
    };
    let prefix = &text[line_start..cursor];

    let frames = open_frames(prefix);
    let parent_variable = frames
        .owners()
        .next();

    let is_nested = parent_variable.is_some();
    let in_math = frames
        .owners()
        .any(|owner| owner == "$math");

    let in_regex_argument = REGEX_VARIABLES
        .iter()
        .any(|name| prefix.contains(name));

    let in_style_context = match kind {
        DocumentKind::Stylesheet => true,
        DocumentKind::Markup => in_style_element(text, cursor) || in_inline_style(prefix),
        DocumentKind::Script => in_inline_style(prefix),
    };

    let context = CompletionContext {
        is_nested,
        in_math,
        in_regex_argument,
        in_style_context,
        parent_variable: parent_variable.map(str::to_string),
        text_before_cursor: prefix.to_string(),
    };

    debug!(?context);
    context
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Replay the brackets of the line so far, leaving only those which are
/// still open at the cursor.
fn open_frames(prefix: &str) -> Frames<'_> {
    let mut frames = Frames::new();
    let mut pending = None;
    let mut i = 0;

    while let Some(c) = prefix[i..]
        .chars()
        .next()
    {
        if is_sigil(c) {
            if let Some(token) = variable_token(&prefix[i..]) {
                i += token.len();
                pending = if prefix[i..].starts_with('[') {
                    Some(token)
                } else {
                    None
                };
                continue;
            }
        }

        match c {
            '[' => frames.push(pending.take(), i),
            ']' => {
                pending = None;
                frames.pop();
            }
            _ => pending = None,
        }

        i += c.len_utf8();
    }

    frames
}

fn in_style_element(text: &str, cursor: usize) -> bool {
    style_regions(text)
        .iter()
        .any(|region| region.start < cursor && cursor <= region.end)
}

/// An open `style="...` attribute, or a `property:` inside an open `{` block.
fn in_inline_style(prefix: &str) -> bool {
    crate::regex!(r#"style\s*=\s*["'][^"']*$"#).is_match(prefix)
        || crate::regex!(r"\{[^}]*[A-Za-z-]+\s*:[^;}]*$").is_match(prefix)
}
