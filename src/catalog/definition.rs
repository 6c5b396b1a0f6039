use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub example: String,
    pub description: String,
}

/// One entry of the variable catalog: what a variable is called, what it
/// does, and the flags that drive validation and completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDefinition {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub accepts_nesting: bool,
    #[serde(default)]
    pub accepts_optional_arguments: bool,
    #[serde(default)]
    pub requires_default: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<String>,
}

impl VariableDefinition {
    pub fn new(name: &str, description: &str) -> VariableDefinition {
        VariableDefinition {
            name: name.to_string(),
            description: description.to_string(),
            category: String::new(),
            examples: Vec::new(),
            aliases: Vec::new(),
            accepts_nesting: false,
            accepts_optional_arguments: false,
            requires_default: false,
            deprecated: false,
            deprecated_message: None,
            replaced_by: None,
        }
    }

    /// Whether this variable is ever written with a bracketed argument list.
    /// Variables for which this is false are plain references like `$user`.
    pub fn takes_brackets(&self) -> bool {
        self.accepts_optional_arguments
            || self.requires_default
            || self
                .examples
                .iter()
                .any(|example| {
                    example
                        .example
                        .contains('[')
                })
    }
}
