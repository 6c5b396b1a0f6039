//! Completion suggestions for the cursor position: catalog variables with
//! insertion templates, argument templates inside known variables, and a few
//! contextual snippets.

use tracing::debug;

use crate::catalog::{Catalog, VariableDefinition};
use crate::context::CompletionContext;

mod documentation;
mod snippets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Variable,
    Snippet,
}

/// One completion candidate. The `insert_template` uses snippet syntax:
/// `${1:value}` tab stops, `$0` for the final cursor, and `\$` for a literal
/// dollar sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub insert_template: String,
    pub documentation: String,
    pub detail: Option<String>,
    pub kind: SuggestionKind,
    pub deprecated: bool,
    pub rank: u8,
}

impl Suggestion {
    /// Key for ordering suggestions in the editor: argument templates first,
    /// then variables, then contextual snippets.
    pub fn sort_text(&self) -> String {
        format!("{}_{}", self.rank, self.label)
    }
}

const RANK_NESTED: u8 = 0;
const RANK_CATALOG: u8 = 1;
const RANK_SNIPPET: u8 = 2;

/// Produce the suggestions for the given cursor context.
pub fn suggest(context: &CompletionContext, catalog: &Catalog) -> Vec<Suggestion> {
    let mut result = Vec::new();

    let templates = context
        .parent_variable
        .as_deref()
        .filter(|_| context.is_nested)
        .and_then(|parent| catalog.resolve(parent))
        .and_then(|definition| snippets::nested(&definition.name));

    match templates {
        Some(templates) => {
            for snippet in templates {
                result.push(snippets::to_suggestion(snippet, RANK_NESTED));
            }
        }
        None => {
            for definition in catalog.definitions() {
                result.push(variable(definition));
            }
        }
    }

    for snippet in snippets::contextual(context) {
        result.push(snippets::to_suggestion(&snippet, RANK_SNIPPET));
    }

    debug!("Offering {} suggestions", result.len());
    result
}

fn variable(definition: &VariableDefinition) -> Suggestion {
    let detail = if definition
        .category
        .is_empty()
    {
        None
    } else {
        Some(
            definition
                .category
                .clone(),
        )
    };

    Suggestion {
        label: definition
            .name
            .clone(),
        insert_template: insert_template(definition),
        documentation: documentation::render(definition),
        detail,
        kind: SuggestionKind::Variable,
        deprecated: definition.deprecated,
        rank: RANK_CATALOG,
    }
}

/// The snippet inserted when a variable is chosen, shaped by whether it takes
/// arguments and whether it needs a default.
pub fn insert_template(definition: &VariableDefinition) -> String {
    let name = definition
        .name
        .replace('$', "\\$");

    if definition.requires_default {
        format!("{}[${{1:value}}, ${{2:default}}]", name)
    } else if definition.accepts_optional_arguments {
        format!("{}${{1:[$2]}}$0", name)
    } else if !definition.takes_brackets() {
        name
    } else {
        format!("{}[${{1:value}}]", name)
    }
}
