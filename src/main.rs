use clap::value_parser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, error, Level};

use firebot_variables::catalog::Catalog;
use firebot_variables::checking;
use firebot_variables::language::{DocumentKind, Severity};

mod editor;
mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("firebot-variables")
        .version(VERSION)
        .propagate_version(true)
        .about("Validation and completion for Firebot variable expressions.")
        .disable_help_subcommand(true)
        .subcommand(
            Command::new("check")
                .about("Check the variable expressions in the given files")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["markup", "stylesheet", "script"])
                        .help("Treat every file as this kind of document rather than guessing from its extension."),
                )
                .arg(
                    Arg::new("catalog")
                        .long("catalog")
                        .value_parser(value_parser!(PathBuf))
                        .help("Load variable definitions from this JSON file instead of the built-in catalog."),
                )
                .arg(
                    Arg::new("full")
                        .long("full")
                        .action(ArgAction::SetTrue)
                        .help("Show the offending source line beneath each problem."),
                )
                .arg(
                    Arg::new("debug")
                        .long("debug")
                        .action(ArgAction::SetTrue)
                        .help("Emit debug logging to standard error."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf))
                        .help("The files containing the expressions you want to check."),
                ),
        )
        .subcommand(
            Command::new("language")
                .about("Run a Language Server Protocol server on standard input and output")
                .arg(
                    Arg::new("catalog")
                        .long("catalog")
                        .value_parser(value_parser!(PathBuf))
                        .help("Load variable definitions from this JSON file instead of the built-in catalog."),
                )
                .arg(
                    Arg::new("debug")
                        .long("debug")
                        .action(ArgAction::SetTrue)
                        .help("Emit debug logging to standard error."),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            setup_logging(submatches, Level::WARN);
            let catalog = load_catalog(submatches);
            let clean = run_check(submatches, &catalog);
            if !clean {
                process::exit(1);
            }
        }
        Some(("language", submatches)) => {
            setup_logging(submatches, Level::INFO);
            let catalog = load_catalog(submatches);
            if let Err(e) = editor::run_language_server(catalog) {
                error!("Server error: {}", e);
                process::exit(1);
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: firebot-variables [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

/// Logging goes to stderr; stdout is reserved for the language server
/// protocol.
fn setup_logging(submatches: &ArgMatches, default: Level) {
    let level = if submatches.get_flag("debug") {
        Level::DEBUG
    } else {
        default
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_catalog(submatches: &ArgMatches) -> Catalog {
    match submatches.get_one::<PathBuf>("catalog") {
        Some(path) => match Catalog::load(path) {
            Ok(catalog) => {
                debug!("Loaded {} variables from {}", catalog.len(), path.display());
                catalog
            }
            Err(e) => {
                eprintln!(
                    "{}: {}: {}",
                    "error".bright_red(),
                    path.display(),
                    e.bold()
                );
                process::exit(1);
            }
        },
        None => Catalog::embedded(),
    }
}

/// Check each file, printing what was found. Returns false if any file could
/// not be read or had an error-severity finding.
fn run_check(submatches: &ArgMatches, catalog: &Catalog) -> bool {
    let forced = submatches
        .get_one::<String>("kind")
        .and_then(|kind| {
            kind.parse::<DocumentKind>()
                .ok()
        });
    let full = submatches.get_flag("full");

    let mut clean = true;

    let filenames = submatches
        .get_many::<PathBuf>("filename")
        .into_iter()
        .flatten();

    for filename in filenames {
        if !check_file(filename, forced, full, catalog) {
            clean = false;
        }
    }

    clean
}

fn check_file(filename: &Path, forced: Option<DocumentKind>, full: bool, catalog: &Catalog) -> bool {
    let kind = forced
        .or_else(|| DocumentKind::from_path(filename))
        .unwrap_or(DocumentKind::Script);

    debug!("Checking {} as {:?}", filename.display(), kind);

    let source = match checking::load(filename) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            return false;
        }
    };

    let findings = checking::check(&source, kind, catalog);

    for finding in &findings {
        let output = if full {
            problem::full_finding(finding, filename, &source)
        } else {
            problem::concise_finding(finding, filename, &source)
        };
        eprintln!("{}", output);
    }

    !findings
        .iter()
        .any(|finding| finding.severity() == Severity::Error)
}
