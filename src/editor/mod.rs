use std::path::PathBuf;

use firebot_variables::catalog::Catalog;
use lsp_server::Connection;
use lsp_types::{
    CompletionOptions, InitializeParams, ServerCapabilities, TextDocumentSyncCapability,
    TextDocumentSyncKind,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

mod server;

/// Characters after which the editor should ask for completions.
const TRIGGER_CHARACTERS: [&str; 7] = ["$", "[", "(", "{", ":", ";", " "];

/// Settings the editor may pass in `initializationOptions`.
#[derive(Debug, Default, Deserialize)]
struct Options {
    catalog: Option<PathBuf>,
}

pub(crate) fn run_language_server(
    catalog: Catalog,
) -> Result<(), Box<dyn std::error::Error + Sync + Send>> {
    debug!("Starting Firebot Language Server");

    let (connection, threads) = Connection::stdio();

    let capabilities = serde_json::to_value(ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(
                TRIGGER_CHARACTERS
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            ),
            ..Default::default()
        }),
        ..Default::default()
    })?;

    // extract any initialization parameters passed from the editor.
    let params = connection.initialize(capabilities)?;
    let params = serde_json::from_value::<InitializeParams>(params)?;

    let catalog = match override_catalog(&params) {
        Some(catalog) => catalog,
        None => catalog,
    };

    info!(
        "Firebot Language Server starting on stdin with {} variables",
        catalog.len()
    );

    let server = server::FirebotLanguageServer::new(catalog);
    server.run(connection)?;

    threads.join()?;
    Ok(())
}

fn override_catalog(params: &InitializeParams) -> Option<Catalog> {
    let options = params
        .initialization_options
        .clone()?;

    let options: Options = match serde_json::from_value(options) {
        Ok(options) => options,
        Err(error) => {
            warn!("Ignoring malformed initialization options: {}", error);
            return None;
        }
    };

    let path = options.catalog?;
    match Catalog::load(&path) {
        Ok(catalog) => {
            info!("Using variable catalog from {}", path.display());
            Some(catalog)
        }
        Err(error) => {
            warn!("Unable to load catalog {}: {}", path.display(), error);
            None
        }
    }
}
