use crate::context::CompletionContext;

use super::{Suggestion, SuggestionKind};

/// A fixed snippet: label, insertion template, one line of documentation.
type Snippet = (&'static str, &'static str, &'static str);

static MATH: [Snippet; 2] = [
    ("Basic Math", "${1:value1} + ${2:value2}", "Basic addition"),
    (
        "Complex Math",
        "${1:value1} * ${2:value2} + ${3:value3}",
        "Complex calculation",
    ),
];

static CUSTOM_VARIABLE: [Snippet; 2] = [
    ("Array Index", "${1:variableName}, ${2:index}", "Access array element"),
    (
        "Object Path",
        "${1:variableName}, ${2:path.to.property}",
        "Access nested property",
    ),
];

static PRESET_LIST_ARG: [Snippet; 1] = [(
    "Preset Value",
    "${1:presetName}",
    "Get preset argument value",
)];

static MATH_ADDITION: Snippet = (
    "Math Addition",
    "\\$math[${1:value1} + ${2:value2}]",
    "Add two values",
);

static DATE_FILENAME: Snippet = (
    "Date-based Filename",
    "\\$time[YYYY-MM-DD_hh-mm-ss].txt",
    "Create a filename with current date",
);

static STYLE: [Snippet; 2] = [
    (
        "Dynamic Width",
        "width: \\$ensureNumber[${1:value}, ${2:default}]",
        "Set width with fallback value",
    ),
    (
        "Dynamic height",
        "height: \\$ensureNumber[${1:value}, ${2:default}]",
        "Set height with fallback value",
    ),
];

/// Argument templates offered inside the brackets of the given variable, if
/// it has any.
pub(super) fn nested(parent: &str) -> Option<&'static [Snippet]> {
    match parent {
        "$math" => Some(&MATH),
        "$customVariable" => Some(&CUSTOM_VARIABLE),
        "$presetListArg" => Some(&PRESET_LIST_ARG),
        _ => None,
    }
}

/// Snippets offered alongside everything else, depending on where the
/// cursor is.
pub(super) fn contextual(context: &CompletionContext) -> Vec<Snippet> {
    let mut result = vec![MATH_ADDITION];

    if context.is_nested {
        result.push(DATE_FILENAME);
    }

    if context.in_style_context {
        result.extend(STYLE);
    }

    result
}

pub(super) fn to_suggestion(snippet: &Snippet, rank: u8) -> Suggestion {
    let (label, template, description) = *snippet;
    Suggestion {
        label: label.to_string(),
        insert_template: template.to_string(),
        documentation: description.to_string(),
        detail: None,
        kind: SuggestionKind::Snippet,
        deprecated: false,
        rank,
    }
}
