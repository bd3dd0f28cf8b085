//! Markdown note rendering.
//!
//! # Responsibility
//! - Assemble all note fields into the fixed document structure.
//! - Keep metadata-block scalars YAML-safe.
//!
//! # Invariants
//! - Section order is fixed: metadata block, title, TL;DR, key findings,
//!   evidence, next steps, links.
//! - Empty evidence/links render a literal placeholder bullet, never an
//!   empty section.
//! - The renderer performs no shaping; all bounds are enforced upstream.

use crate::model::note::Note;
use once_cell::sync::Lazy;
use regex::Regex;

const EVIDENCE_PLACEHOLDER: &str = "(no excerpts found)";
const LINKS_PLACEHOLDER: &str = "(none)";

static YAML_PLAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._/-]+$").expect("valid yaml scalar regex"));

/// Renders one note into its final markdown document.
pub fn render_note(note: &Note) -> String {
    let mut lines: Vec<String> = vec![
        "---".to_string(),
        format!("id: {}", note.identity.composed_id()),
        format!("date: {}", note.identity.date_string()),
        format!("project: {}", yaml_safe(&note.project)),
        format!("topic: {}", yaml_safe(&note.topic)),
        format!("tags: {}", yaml_inline_list(&note.tags)),
        format!("source: {}", yaml_safe(&note.source)),
        format!("confidence: {}", note.confidence.as_str()),
        "---".to_string(),
        format!("# {}", note.title),
        String::new(),
        "## TL;DR".to_string(),
    ];
    for bullet in &note.tldr {
        lines.push(format!("- {bullet}"));
    }

    lines.push(String::new());
    lines.push("## Key findings".to_string());
    for bullet in &note.findings {
        lines.push(format!("- {bullet}"));
    }

    lines.push(String::new());
    lines.push("## Evidence (excerpts)".to_string());
    if note.evidence.is_empty() {
        lines.push(format!("- {EVIDENCE_PLACEHOLDER}"));
    } else {
        for excerpt in &note.evidence {
            lines.push(format!("- {excerpt}"));
        }
    }

    lines.push(String::new());
    lines.push("## Next steps".to_string());
    for bullet in &note.next_steps {
        lines.push(format!("- {bullet}"));
    }

    lines.push(String::new());
    lines.push("## Links / References".to_string());
    if note.links.is_empty() {
        lines.push(format!("- {LINKS_PLACEHOLDER}"));
    } else {
        for link in &note.links {
            lines.push(format!("- {link}"));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Quotes a metadata scalar unless it is plain `[A-Za-z0-9._/-]+`.
fn yaml_safe(value: &str) -> String {
    if YAML_PLAIN_RE.is_match(value) {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Renders tags as a YAML inline list. Tags are already `[a-z0-9-]`.
fn yaml_inline_list(items: &[String]) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    format!("[{}]", items.join(", "))
}
