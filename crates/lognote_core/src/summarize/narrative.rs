//! Narrative builders: TL;DR, key findings, next steps, links, confidence.
//!
//! # Responsibility
//! - Turn evidence, references and metadata into bounded bullet lists.
//! - Derive the confidence bucket and the one-paragraph result summary.
//!
//! # Invariants
//! - Each builder is a pure function over an immutable context; no builder
//!   observes another builder's output except through that context.
//! - Bullets append in fixed priority order, then truncate to the cap.
//! - Every builder degrades to a fixed fallback instead of failing.

use crate::model::note::Confidence;
use crate::model::request::NoteMeta;
use crate::summarize::title::clean_title_line;
use crate::summarize::{dedupe_preserve, refs, ERROR_KEYWORD_RE, WARNING_KEYWORD_RE};
use once_cell::sync::Lazy;
use regex::Regex;

/// Bullet caps per section.
pub const MAX_TLDR_BULLETS: usize = 6;
pub const MAX_FINDING_BULLETS: usize = 5;
pub const MAX_NEXT_STEP_BULLETS: usize = 5;
pub const MAX_LINKS: usize = 8;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

/// Literal marker in the lowercased full text mapped to one fixed next step.
struct StepRule {
    marker: &'static str,
    step: &'static str,
}

const STEP_RULES: &[StepRule] = &[
    StepRule {
        marker: "implicit declaration",
        step: "Verify C99 headers or missing prototypes for implicit declaration errors.",
    },
    StepRule {
        marker: "redefinition",
        step: "Search for duplicate definitions or conflicting headers causing redefinition.",
    },
];

/// Immutable inputs shared by every narrative builder.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeContext<'a> {
    /// Inferred note title.
    pub title: &'a str,
    /// Request metadata.
    pub meta: &'a NoteMeta,
    /// Selected evidence lines (already truncated).
    pub evidence: &'a [String],
    /// Extracted `path:line[:col]` references.
    pub refs: &'a [String],
    /// Full raw text.
    pub text: &'a str,
}

fn context_label(meta: &NoteMeta) -> Option<String> {
    let parts: Vec<&str> = [meta.project.as_deref(), meta.topic.as_deref()]
        .into_iter()
        .flatten()
        .filter(|value| !value.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" / "))
    }
}

/// Builds the TL;DR bullet list (at most 6 bullets).
pub fn build_tldr(ctx: &NarrativeContext<'_>) -> Vec<String> {
    let mut bullets = Vec::new();
    if !ctx.title.is_empty() {
        bullets.push(format!("Main issue: {}.", ctx.title));
    }
    if let Some(label) = context_label(ctx.meta) {
        bullets.push(format!("Context: {label}."));
    }
    if let Some(first_ref) = ctx.refs.first() {
        bullets.push(format!("Likely location: {first_ref}."));
    }
    if !ctx.evidence.is_empty() {
        bullets.push(format!("Evidence lines captured: {}.", ctx.evidence.len()));
    }
    if bullets.len() < 3 {
        bullets.push(
            "Next step: review the evidence and reproduce the issue with a minimal case."
                .to_string(),
        );
    }
    bullets.truncate(MAX_TLDR_BULLETS);
    bullets
}

/// Builds the key-findings bullet list (at most 5 bullets).
///
/// Each evidence line lands in exactly one category, checked in priority
/// order: implicit declaration, redefinition, error, warning, file
/// reference. Reference and metadata summaries append after the per-line
/// bullets.
pub fn build_key_findings(ctx: &NarrativeContext<'_>) -> Vec<String> {
    let mut findings = Vec::new();
    for line in ctx.evidence {
        let lower = line.to_lowercase();
        if lower.contains("implicit declaration") {
            findings.push("Implicit declaration detected in output.".to_string());
            continue;
        }
        if lower.contains("redefinition") {
            findings.push("Redefinition reported in output.".to_string());
            continue;
        }
        if ERROR_KEYWORD_RE.is_match(line) {
            findings.push(format!("Error: {}", clean_title_line(line)));
            continue;
        }
        if WARNING_KEYWORD_RE.is_match(line) {
            findings.push(format!("Warning: {}", clean_title_line(line)));
            continue;
        }
        if refs::contains_reference(line) {
            findings.push(format!("Location referenced: {}", line.trim()));
        }
    }

    if !ctx.refs.is_empty() {
        let shown: Vec<&str> = ctx.refs.iter().take(3).map(String::as_str).collect();
        findings.push(format!("File references include: {}", shown.join(", ")));
    }
    if !ctx.meta.files.is_empty() {
        let shown: Vec<&str> = ctx.meta.files.iter().take(5).map(String::as_str).collect();
        findings.push(format!("Files mentioned: {}", shown.join(", ")));
    }
    if !ctx.meta.functions.is_empty() {
        let shown: Vec<&str> = ctx.meta.functions.iter().take(5).map(String::as_str).collect();
        findings.push(format!("Functions mentioned: {}", shown.join(", ")));
    }

    let mut findings = dedupe_preserve(findings);
    if findings.is_empty() {
        findings.push("No explicit error lines found; review excerpts for context.".to_string());
    }
    findings.truncate(MAX_FINDING_BULLETS);
    findings
}

/// Builds the next-steps bullet list (at most 5 bullets).
pub fn build_next_steps(ctx: &NarrativeContext<'_>) -> Vec<String> {
    let mut steps = Vec::new();
    let lower = ctx.text.to_lowercase();
    for rule in STEP_RULES {
        if lower.contains(rule.marker) {
            steps.push(rule.step.to_string());
        }
    }
    if let Some(first_ref) = ctx.refs.first() {
        steps.push(format!("Inspect {first_ref} around the referenced line."));
    }
    if !ctx.meta.files.is_empty() {
        let shown: Vec<&str> = ctx.meta.files.iter().take(3).map(String::as_str).collect();
        steps.push(format!("Review related files: {}.", shown.join(", ")));
    }
    if steps.is_empty() {
        steps.push(
            "Reproduce the issue with a minimal input and capture a short log excerpt."
                .to_string(),
        );
    }
    steps.truncate(MAX_NEXT_STEP_BULLETS);
    steps
}

/// Collects links from metadata and the raw text (at most 8, deduplicated).
pub fn build_links(text: &str, meta: &NoteMeta) -> Vec<String> {
    let mut links: Vec<String> = meta
        .links
        .iter()
        .map(|link| link.trim().to_string())
        .collect();
    links.extend(
        URL_RE
            .find_iter(text)
            .map(|found| found.as_str().trim().to_string()),
    );
    let mut links = dedupe_preserve(links);
    links.truncate(MAX_LINKS);
    links
}

/// Maps evidence volume to the confidence bucket.
///
/// `>= 4` lines is high, `<= 1` is low, everything between is medium.
pub fn estimate_confidence(evidence_count: usize) -> Confidence {
    if evidence_count >= 4 {
        Confidence::High
    } else if evidence_count <= 1 {
        Confidence::Low
    } else {
        Confidence::Medium
    }
}

/// Builds the one-paragraph result summary (at most 3 sentences).
pub fn build_summary(ctx: &NarrativeContext<'_>) -> String {
    let mut parts = Vec::new();
    if !ctx.title.is_empty() {
        parts.push(format!("Main issue: {}.", ctx.title));
    }
    if let Some(label) = context_label(ctx.meta) {
        parts.push(format!("Context: {label}."));
    }
    if !ctx.evidence.is_empty() {
        parts.push(format!("Evidence includes {} key lines.", ctx.evidence.len()));
    }
    if parts.is_empty() {
        "Summary not available.".to_string()
    } else {
        parts.truncate(3);
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        build_key_findings, build_links, build_next_steps, build_summary, build_tldr,
        estimate_confidence, NarrativeContext, MAX_FINDING_BULLETS, MAX_TLDR_BULLETS,
    };
    use crate::model::note::Confidence;
    use crate::model::request::NoteMeta;

    fn ctx<'a>(
        title: &'a str,
        meta: &'a NoteMeta,
        evidence: &'a [String],
        refs: &'a [String],
        text: &'a str,
    ) -> NarrativeContext<'a> {
        NarrativeContext {
            title,
            meta,
            evidence,
            refs,
            text,
        }
    }

    fn meta_with(project: Option<&str>, topic: Option<&str>) -> NoteMeta {
        NoteMeta {
            project: project.map(str::to_string),
            topic: topic.map(str::to_string),
            ..NoteMeta::default()
        }
    }

    #[test]
    fn tldr_orders_title_context_location_and_count() {
        let meta = meta_with(Some("demo"), Some("build"));
        let evidence = vec!["error: boom".to_string()];
        let refs = vec!["src/main.c:42".to_string()];
        let bullets = build_tldr(&ctx("boom", &meta, &evidence, &refs, "error: boom"));
        assert_eq!(
            bullets,
            vec![
                "Main issue: boom.".to_string(),
                "Context: demo / build.".to_string(),
                "Likely location: src/main.c:42.".to_string(),
                "Evidence lines captured: 1.".to_string(),
            ]
        );
        assert!(bullets.len() <= MAX_TLDR_BULLETS);
    }

    #[test]
    fn sparse_tldr_gets_the_generic_next_step() {
        let meta = NoteMeta::default();
        let bullets = build_tldr(&ctx("only title", &meta, &[], &[], "text"));
        assert_eq!(bullets.len(), 2);
        assert!(bullets[1].starts_with("Next step:"));
    }

    #[test]
    fn findings_classify_each_line_into_one_category() {
        let meta = NoteMeta::default();
        let evidence = vec![
            "warning: implicit declaration of function 'foo'".to_string(),
            "redefinition of 'bar'".to_string(),
            "error: boom".to_string(),
            "warning: odd cast".to_string(),
            "seen at src/lib.rs:7".to_string(),
        ];
        let findings = build_key_findings(&ctx("t", &meta, &evidence, &[], "text"));
        assert_eq!(
            findings,
            vec![
                "Implicit declaration detected in output.".to_string(),
                "Redefinition reported in output.".to_string(),
                "Error: boom".to_string(),
                "Warning: odd cast".to_string(),
                "Location referenced: seen at src/lib.rs:7".to_string(),
            ]
        );
        assert!(findings.len() <= MAX_FINDING_BULLETS);
    }

    #[test]
    fn findings_fall_back_when_nothing_qualifies() {
        let meta = NoteMeta::default();
        let findings = build_key_findings(&ctx("t", &meta, &[], &[], "text"));
        assert_eq!(
            findings,
            vec!["No explicit error lines found; review excerpts for context.".to_string()]
        );
    }

    #[test]
    fn findings_summarize_refs_and_metadata_lists() {
        let meta = NoteMeta {
            files: vec!["a.c".to_string(), "b.c".to_string()],
            functions: vec!["init".to_string()],
            ..NoteMeta::default()
        };
        let refs = vec!["a.c:1".to_string()];
        let findings = build_key_findings(&ctx("t", &meta, &[], &refs, "text"));
        assert_eq!(
            findings,
            vec![
                "File references include: a.c:1".to_string(),
                "Files mentioned: a.c, b.c".to_string(),
                "Functions mentioned: init".to_string(),
            ]
        );
    }

    #[test]
    fn next_steps_trigger_on_markers_and_references() {
        let meta = NoteMeta {
            files: vec!["x.c".to_string()],
            ..NoteMeta::default()
        };
        let refs = vec!["x.c:3".to_string()];
        let steps = build_next_steps(&ctx(
            "t",
            &meta,
            &[],
            &refs,
            "implicit declaration of foo, then redefinition of bar",
        ));
        assert_eq!(steps.len(), 4);
        assert!(steps[0].contains("C99"));
        assert!(steps[1].contains("duplicate definitions"));
        assert_eq!(steps[2], "Inspect x.c:3 around the referenced line.");
        assert_eq!(steps[3], "Review related files: x.c.");
    }

    #[test]
    fn next_steps_fall_back_to_the_generic_bullet() {
        let meta = NoteMeta::default();
        let steps = build_next_steps(&ctx("t", &meta, &[], &[], "calm text"));
        assert_eq!(
            steps,
            vec!["Reproduce the issue with a minimal input and capture a short log excerpt."
                .to_string()]
        );
    }

    #[test]
    fn links_merge_metadata_and_text_urls() {
        let meta = NoteMeta {
            links: vec!["https://issue.example/42".to_string()],
            ..NoteMeta::default()
        };
        let links = build_links(
            "see https://docs.example/ref and https://issue.example/42 again",
            &meta,
        );
        assert_eq!(
            links,
            vec![
                "https://issue.example/42".to_string(),
                "https://docs.example/ref".to_string(),
            ]
        );
    }

    #[test]
    fn confidence_buckets_follow_evidence_volume() {
        assert_eq!(estimate_confidence(0), Confidence::Low);
        assert_eq!(estimate_confidence(1), Confidence::Low);
        assert_eq!(estimate_confidence(2), Confidence::Medium);
        assert_eq!(estimate_confidence(3), Confidence::Medium);
        assert_eq!(estimate_confidence(4), Confidence::High);
        assert_eq!(estimate_confidence(9), Confidence::High);
    }

    #[test]
    fn summary_caps_at_three_sentences() {
        let meta = meta_with(Some("demo"), None);
        let evidence = vec!["error: boom".to_string(), "more".to_string()];
        let summary = build_summary(&ctx("boom", &meta, &evidence, &[], "text"));
        assert_eq!(
            summary,
            "Main issue: boom. Context: demo. Evidence includes 2 key lines."
        );
    }

    #[test]
    fn summary_degrades_to_the_fixed_fallback() {
        let meta = NoteMeta::default();
        assert_eq!(
            build_summary(&ctx("", &meta, &[], &[], "text")),
            "Summary not available."
        );
    }
}
