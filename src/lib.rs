//! Autocomplete and validation for Firebot variable expressions such as
//! `$math[$arg[1] * 2]` embedded in overlay markup, stylesheets, and scripts.

/// Compile a regular expression once and reuse it on every subsequent call.
#[macro_export]
macro_rules! regex {
    ($pattern:expr) => {{
        use std::sync::OnceLock;
        static REGEX: OnceLock<::regex::Regex> = OnceLock::new();
        REGEX.get_or_init(|| ::regex::Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}

pub mod catalog;
pub mod checking;
pub mod completion;
pub mod context;
pub mod language;
