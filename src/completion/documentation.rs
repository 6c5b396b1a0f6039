use serde::Serialize;
use tinytemplate::TinyTemplate;
use tracing::warn;

use crate::catalog::{Example, VariableDefinition};

static TEMPLATE: &str = "**{name}**

{description}{{ if examples }}

**Examples:**
{{ for example in examples }}
- `{example.example}`: {example.description}{{ endfor }}{{ endif }}{{ if deprecated }}

**Deprecated**{{ if replaced_by }}: use `{replaced_by}` instead.{{ else }}{{ if deprecated_message }}: {deprecated_message}{{ endif }}{{ endif }}{{ endif }}";

#[derive(Serialize)]
struct Context<'a> {
    name: &'a str,
    description: &'a str,
    examples: &'a [Example],
    deprecated: bool,
    replaced_by: Option<&'a str>,
    deprecated_message: Option<&'a str>,
}

/// Markdown describing a variable, shown alongside its completion.
pub(super) fn render(definition: &VariableDefinition) -> String {
    let context = Context {
        name: &definition.name,
        description: &definition.description,
        examples: &definition.examples,
        deprecated: definition.deprecated,
        replaced_by: definition
            .replaced_by
            .as_deref(),
        deprecated_message: definition
            .deprecated_message
            .as_deref(),
    };

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);

    let rendered = tt
        .add_template("documentation", TEMPLATE)
        .and_then(|_| tt.render("documentation", &context));

    match rendered {
        Ok(text) => text,
        Err(error) => {
            warn!("Unable to render documentation for {}: {}", definition.name, error);
            plain(definition)
        }
    }
}

fn plain(definition: &VariableDefinition) -> String {
    format!("{}\n\n{}", definition.name, definition.description)
}
