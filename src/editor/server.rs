use std::collections::HashMap;

use firebot_variables::catalog::Catalog;
use firebot_variables::checking;
use firebot_variables::completion::{self, Suggestion, SuggestionKind};
use firebot_variables::context;
use firebot_variables::language::{DocumentKind, Finding, Severity};
use lsp_server::{Connection, Message, Notification, Request, Response};
use lsp_types::{
    CompletionItem, CompletionItemKind, CompletionItemTag, CompletionParams, CompletionResponse,
    Diagnostic, DiagnosticSeverity, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DidSaveTextDocumentParams, Documentation, InsertTextFormat,
    MarkupContent, MarkupKind, Position, PublishDiagnosticsParams, Range, Uri,
};
use serde_json::{from_value, to_value, Value};
use tracing::{debug, error, info, warn};

use crate::problem::calculate_line_number;

/// An open document and how it should be checked.
struct Document {
    text: String,
    kind: Option<DocumentKind>,
}

pub struct FirebotLanguageServer {
    catalog: Catalog,
    /// Map from URI to document content
    documents: HashMap<Uri, Document>,
}

impl FirebotLanguageServer {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            documents: HashMap::new(),
        }
    }

    /// Main server loop that handles incoming LSP messages
    pub fn run(
        mut self,
        connection: Connection,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>> {
        info!("Starting Language Server main loop");

        for message in &connection.receiver {
            match message {
                Message::Request(request) => {
                    if let Err(err) = self.handle_request(request, &|msg| {
                        connection
                            .sender
                            .send(msg)
                    }) {
                        error!("Error handling request: {}", err);
                    }
                }
                Message::Notification(notification) => {
                    if notification.method == "exit" {
                        break;
                    }

                    if let Err(error) = self.handle_notification(notification, &|message| {
                        connection
                            .sender
                            .send(message)
                    }) {
                        error!("Error handling notification: {}", error);
                    }
                }
                Message::Response(_resp) => {
                    // We don't expect responses as a server
                    warn!("Received unexpected response message");
                }
            }
        }

        Ok(())
    }

    fn handle_request<E>(
        &mut self,
        req: Request,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug!("Request: {}", req.method);

        match req
            .method
            .as_str()
        {
            "textDocument/completion" => {
                let params: CompletionParams = from_value(req.params)?;
                let result = self.handle_completion(params);
                let response = Response::new_ok(req.id, result);
                sender(Message::Response(response))?;
            }
            "shutdown" => {
                info!("Language Server received shutdown request");
                let response = Response::new_ok(req.id, Value::Null);
                sender(Message::Response(response))?;
            }
            _ => {
                warn!("Unhandled request method: {}", req.method);
                let response = Response::new_err(
                    req.id,
                    lsp_server::ErrorCode::MethodNotFound as i32,
                    format!("Method not found: {}", req.method),
                );
                sender(Message::Response(response))?;
            }
        }
        Ok(())
    }

    fn handle_notification<E>(
        &mut self,
        notification: Notification,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug!("Notification: {}", notification.method);

        match notification
            .method
            .as_str()
        {
            "textDocument/didOpen" => {
                let params: DidOpenTextDocumentParams = from_value(notification.params)?;
                self.handle_did_open(params, sender)?;
            }
            "textDocument/didChange" => {
                let params: DidChangeTextDocumentParams = from_value(notification.params)?;
                self.handle_did_change(params, sender)?;
            }
            "textDocument/didSave" => {
                let params: DidSaveTextDocumentParams = from_value(notification.params)?;
                self.handle_did_save(params, sender)?;
            }
            "textDocument/didClose" => {
                let params: DidCloseTextDocumentParams = from_value(notification.params)?;
                self.handle_did_close(params, sender)?;
            }
            _ => {
                debug!("Unhandled notification method: {}", notification.method);
            }
        }
        Ok(())
    }

    fn handle_did_open<E>(
        &mut self,
        params: DidOpenTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let item = params.text_document;
        let kind = DocumentKind::from_language_id(&item.language_id);

        debug!("Document opened: {:?} ({})", item.uri, item.language_id);

        self.documents
            .insert(
                item.uri
                    .clone(),
                Document {
                    text: item.text,
                    kind,
                },
            );

        self.check_and_report(item.uri, sender)
    }

    fn handle_did_change<E>(
        &mut self,
        params: DidChangeTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;

        // full sync, so the last change carries the whole text
        if let Some(change) = params
            .content_changes
            .into_iter()
            .last()
        {
            debug!("Document changed: {:?}", uri);

            match self
                .documents
                .get_mut(&uri)
            {
                Some(document) => document.text = change.text,
                None => {
                    self.documents
                        .insert(
                            uri.clone(),
                            Document {
                                text: change.text,
                                kind: None,
                            },
                        );
                }
            }

            self.check_and_report(uri, sender)?;
        }
        Ok(())
    }

    fn handle_did_save<E>(
        &mut self,
        params: DidSaveTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;
        debug!("Document saved: {:?}", uri);

        if let Some(text) = params.text {
            if let Some(document) = self
                .documents
                .get_mut(&uri)
            {
                document.text = text;
            }
        }

        self.check_and_report(uri, sender)
    }

    fn handle_did_close<E>(
        &mut self,
        params: DidCloseTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;
        debug!("Document closed: {:?}", uri);

        self.documents
            .remove(&uri);

        // Clear diagnostics for closed document
        self.publish_diagnostics(uri, vec![], sender)
    }

    fn handle_completion(&self, params: CompletionParams) -> Option<CompletionResponse> {
        let position = params.text_document_position;
        let uri = position
            .text_document
            .uri;

        debug!("Completion request: {:?} at {:?}", uri, position.position);

        let document = self
            .documents
            .get(&uri)?;

        let kind = document
            .kind
            .unwrap_or(DocumentKind::Script);
        let offset = position_to_offset(&document.text, position.position);

        let context = context::classify(&document.text, offset, kind);
        let items = completion::suggest(&context, &self.catalog)
            .iter()
            .map(convert_suggestion)
            .collect();

        Some(CompletionResponse::Array(items))
    }

    /// Check document and publish the resulting diagnostics. Documents in
    /// languages we don't understand get an empty set.
    fn check_and_report<E>(
        &self,
        uri: Uri,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let diagnostics = match self
            .documents
            .get(&uri)
        {
            Some(Document {
                text,
                kind: Some(kind),
            }) => {
                let findings = checking::check(text, *kind, &self.catalog);
                convert_findings(text, &findings)
            }
            _ => vec![],
        };

        self.publish_diagnostics(uri, diagnostics, sender)
    }

    fn publish_diagnostics<E>(
        &self,
        uri: Uri,
        diagnostics: Vec<Diagnostic>,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let params = PublishDiagnosticsParams {
            uri,
            diagnostics,
            version: None,
        };

        let notification = Notification::new(
            "textDocument/publishDiagnostics".to_string(),
            to_value(params)?,
        );

        sender(Message::Notification(notification))?;
        Ok(())
    }
}

fn convert_findings(content: &str, findings: &[Finding]) -> Vec<Diagnostic> {
    findings
        .iter()
        .map(|finding| {
            let offset = finding.offset();
            let start = offset_to_position(content, offset);
            let end = offset_to_position(content, offset + finding.width());

            let severity = match finding.severity() {
                Severity::Error => DiagnosticSeverity::ERROR,
                Severity::Warning => DiagnosticSeverity::WARNING,
                Severity::Info => DiagnosticSeverity::INFORMATION,
            };

            Diagnostic {
                range: Range { start, end },
                severity: Some(severity),
                source: Some("firebot".to_string()),
                message: finding.message(),
                ..Default::default()
            }
        })
        .collect()
}

fn convert_suggestion(suggestion: &Suggestion) -> CompletionItem {
    let kind = match suggestion.kind {
        SuggestionKind::Variable => CompletionItemKind::VARIABLE,
        SuggestionKind::Snippet => CompletionItemKind::SNIPPET,
    };

    let tags = if suggestion.deprecated {
        Some(vec![CompletionItemTag::DEPRECATED])
    } else {
        None
    };

    CompletionItem {
        label: suggestion
            .label
            .clone(),
        kind: Some(kind),
        detail: suggestion
            .detail
            .clone(),
        documentation: Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: suggestion
                .documentation
                .clone(),
        })),
        sort_text: Some(suggestion.sort_text()),
        insert_text: Some(
            suggestion
                .insert_template
                .clone(),
        ),
        insert_text_format: Some(InsertTextFormat::SNIPPET),
        tags,
        ..Default::default()
    }
}

/// Convert byte offset to LSP Position. Characters are counted in UTF-16
/// code units, as the protocol requires.
fn offset_to_position(text: &str, offset: usize) -> Position {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let line = calculate_line_number(text, offset) as u32;
    let start = match text[..offset].rfind('\n') {
        Some(i) => i + 1,
        None => 0,
    };
    let character = text[start..offset]
        .encode_utf16()
        .count() as u32;

    Position { line, character }
}

/// Convert LSP Position to byte offset, clamping to the end of the line (or
/// of the text) when the position lies beyond it.
fn position_to_offset(text: &str, position: Position) -> usize {
    let mut start = 0;
    for _ in 0..position.line {
        match text[start..].find('\n') {
            Some(i) => start += i + 1,
            None => return text.len(),
        }
    }

    let line = match text[start..].find('\n') {
        Some(i) => &text[start..start + i],
        None => &text[start..],
    };

    let mut units = 0;
    for (i, c) in line.char_indices() {
        if units >= position.character as usize {
            return start + i;
        }
        units += c.len_utf16();
    }

    start + line.len()
}
