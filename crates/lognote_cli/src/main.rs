//! JSON-in/JSON-out shell for the note synthesis engine.
//!
//! # Responsibility
//! - Read one summarize request (stdin or `--input`), run the core service,
//!   print a single-line JSON result envelope.
//! - Keep every failure inside the envelope contract (`ok: false` plus an
//!   error string) instead of aborting.

use clap::Parser;
use lognote_core::{
    default_log_level, init_logging, FsNoteRepository, NoteService, SummarizeOutcome,
    SummarizeRequest,
};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

/// Summarize raw text into a structured markdown note.
#[derive(Debug, Parser)]
#[command(name = "lognote", version, about)]
struct Cli {
    /// Path to input JSON. Reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Root directory of the notes repository. Must exist.
    #[arg(long)]
    notes_root: PathBuf,

    /// Absolute directory for rolling file logs. Logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level used with `--log-dir`.
    #[arg(long)]
    log_level: Option<String>,
}

/// Wire shape of the result envelope printed to stdout.
#[derive(Debug, Serialize)]
struct ResultEnvelope {
    ok: bool,
    note_path: String,
    note_id: String,
    title: String,
    tags: Vec<String>,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ResultEnvelope {
    fn success(outcome: SummarizeOutcome) -> Self {
        Self {
            ok: true,
            note_path: outcome.note_path.to_string_lossy().into_owned(),
            note_id: outcome.note_id,
            title: outcome.title,
            tags: outcome.tags,
            summary: outcome.summary,
            error: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            note_path: String::new(),
            note_id: String::new(),
            title: String::new(),
            tags: Vec::new(),
            summary: String::new(),
            error: Some(message),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        if let Err(err) = init_logging(&level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let envelope = match run(&cli) {
        Ok(outcome) => ResultEnvelope::success(outcome),
        Err(message) => {
            log::warn!("event=summarize module=cli status=error error={message}");
            ResultEnvelope::failure(message)
        }
    };

    match serde_json::to_string(&envelope) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("failed to encode result envelope: {err}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<SummarizeOutcome, String> {
    let raw = read_input(cli.input.as_deref())?;
    let request: SummarizeRequest =
        serde_json::from_str(&raw).map_err(|err| format!("invalid JSON input: {err}"))?;

    let repo = FsNoteRepository::try_new(&cli.notes_root).map_err(|err| err.to_string())?;
    NoteService::new(repo)
        .summarize(&request)
        .map_err(|err| err.to_string())
}

fn read_input(path: Option<&std::path::Path>) -> Result<String, String> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read input `{}`: {err}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed to read stdin: {err}"))?;
            buffer
        }
    };
    if raw.trim().is_empty() {
        return Err("no input JSON provided".to_string());
    }
    Ok(raw)
}
