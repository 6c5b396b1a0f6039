//! Conversion of the variable list served by a running Firebot instance
//! (`/api/v1/variables`) into catalog definitions.

use serde::Deserialize;
use tracing::debug;

use crate::catalog::{Example, VariableDefinition};

#[derive(Debug, Deserialize)]
pub(crate) struct ApiEntry {
    definition: Option<ApiDefinition>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    handle: Option<String>,
    #[serde(default)]
    description: String,
    usage: Option<String>,
    examples: Option<Vec<ApiExample>>,
    categories: Option<Vec<String>>,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiExample {
    #[serde(default)]
    usage: String,
    #[serde(default)]
    description: String,
}

/// Whether a parsed JSON document looks like an API dump rather than a list
/// of native definitions.
pub(crate) fn is_api_dump(value: &serde_json::Value) -> bool {
    match value.as_array() {
        Some(entries) => entries
            .iter()
            .any(|entry| entry.get("definition").is_some()),
        None => false,
    }
}

pub(crate) fn convert(entries: Vec<ApiEntry>) -> Vec<VariableDefinition> {
    entries
        .into_iter()
        .filter_map(|entry| entry.definition)
        .filter_map(convert_definition)
        .collect()
}

fn convert_definition(api: ApiDefinition) -> Option<VariableDefinition> {
    let handle = api.handle?;

    let handle = match handle.as_str() {
        "$name" => "$".to_string(),
        "&name" => "&".to_string(),
        _ => handle,
    };
    let name = format!("${}", handle);

    let mut definition = VariableDefinition::new(&name, &api.description);
    definition.accepts_nesting = true;
    definition.aliases = api.aliases;

    if api
        .description
        .to_lowercase()
        .contains("deprecated")
    {
        let note = crate::regex!(r"\((.*?)\)")
            .captures(&api.description)
            .and_then(|captures| captures.get(1))
            .map(|note| {
                note.as_str()
                    .to_string()
            });

        definition.deprecated = api.hidden;
        definition.replaced_by = note
            .as_ref()
            .map(|note| note.replace("Deprecated: use ", ""));
        definition.deprecated_message = note;
    }

    if let Some(categories) = &api.categories {
        definition.category = title_case(
            &categories
                .join(", ")
                .to_uppercase(),
        );
    }

    if api
        .usage
        .is_some()
        || api
            .examples
            .is_some()
    {
        definition.accepts_optional_arguments = true;
    }

    if let Some(usage) = &api.usage {
        if usage.contains("default") {
            definition.requires_default = true;
        }
    }

    if let Some(examples) = api.examples {
        definition.examples = examples
            .into_iter()
            .map(|example| Example {
                example: format!("${}", example.usage),
                description: example.description,
            })
            .collect();
    }

    debug!(name = %definition.name, "Converted API variable");
    Some(definition)
}

/// Capitalize the first letter of every whitespace separated word and
/// lowercase the rest.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut start = true;

    for c in text.chars() {
        if c.is_whitespace() {
            start = true;
            result.push(c);
        } else if start {
            result.extend(c.to_uppercase());
            start = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }

    result
}
