use lognote_core::{
    FsNoteRepository, NoteService, NoteServiceError, RequestError, SummarizeRequest,
};

fn service_in(dir: &std::path::Path) -> NoteService<FsNoteRepository> {
    NoteService::new(FsNoteRepository::try_new(dir).expect("temp root should be a directory"))
}

fn request_from_json(json: &str) -> SummarizeRequest {
    serde_json::from_str(json).expect("request JSON should deserialize")
}

#[test]
fn summarize_writes_a_structured_note_and_strips_the_error_prefix() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = service_in(dir.path());
    let request = request_from_json(
        r#"{
            "text": "error: something broke at src/main.c:42\nMore details...",
            "meta": {"project": "demo", "topic": "build"},
            "date": "2026-02-24"
        }"#,
    );

    let outcome = service.summarize(&request).expect("summarize should succeed");

    assert_eq!(outcome.title, "something broke at src/main.c:42");
    assert!(outcome.note_id.starts_with("2026-02-24-demo-build-"));
    assert!(outcome.note_path.is_absolute());
    assert!(outcome.summary.contains("Main issue:"));

    let expected_dir: std::path::PathBuf =
        ["notes", "2026", "2026-02"].iter().collect();
    assert!(outcome
        .note_path
        .parent()
        .expect("note has a parent dir")
        .ends_with(&expected_dir));

    let rendered = std::fs::read_to_string(&outcome.note_path).expect("note readable");
    assert!(rendered.contains(&format!("id: {}", outcome.note_id)));
    assert!(rendered.contains("# something broke at src/main.c:42"));
    assert!(rendered.contains("## TL;DR"));
    assert!(rendered.contains("project: demo"));
    assert!(rendered.contains("topic: build"));
    assert!(rendered.contains("- Likely location: src/main.c:42."));
}

#[test]
fn identical_text_and_date_yield_identical_identifiers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let request = request_from_json(
        r#"{"text": "error: boom\ncontext line", "date": "2026-02-24"}"#,
    );

    let first = service_in(dir.path())
        .summarize(&request)
        .expect("first run should succeed");
    let second = service_in(dir.path())
        .summarize(&request)
        .expect("second run should succeed");

    assert_eq!(first.note_id, second.note_id);
    assert_eq!(first.note_path, second.note_path);
}

#[test]
fn changed_text_changes_the_identifier_hash() {
    let dir = tempfile::tempdir().expect("temp dir");
    let base = request_from_json(r#"{"text": "error: boom", "date": "2026-02-24"}"#);
    let changed = request_from_json(r#"{"text": "error: boom!", "date": "2026-02-24"}"#);

    let first = service_in(dir.path()).summarize(&base).expect("base run");
    let second = service_in(dir.path()).summarize(&changed).expect("changed run");
    assert_ne!(first.note_id, second.note_id);
}

#[test]
fn confidence_reflects_evidence_volume() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = service_in(dir.path());

    let low = request_from_json(r#"{"text": "error: lone line", "date": "2026-02-24"}"#);
    let rendered = std::fs::read_to_string(
        service.summarize(&low).expect("low run").note_path,
    )
    .expect("note readable");
    assert!(rendered.contains("confidence: low"));

    let high = request_from_json(
        r#"{
            "text": "error: a\nerror: b\nerror: c\nerror: d",
            "date": "2026-02-25"
        }"#,
    );
    let rendered = std::fs::read_to_string(
        service.summarize(&high).expect("high run").note_path,
    )
    .expect("note readable");
    assert!(rendered.contains("confidence: high"));
}

#[test]
fn plain_text_without_markers_degrades_gracefully() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = service_in(dir.path());
    let request = request_from_json(
        r#"{"text": "just a calm line\nanother calm line", "date": "2026-02-24"}"#,
    );

    let outcome = service.summarize(&request).expect("degenerate input still succeeds");

    assert_eq!(outcome.title, "just a calm line");
    assert!(outcome.tags.is_empty());

    let rendered = std::fs::read_to_string(&outcome.note_path).expect("note readable");
    assert!(rendered.contains("tags: []"));
    assert!(rendered.contains("project: general"));
    assert!(rendered.contains("source: chat"));
    assert!(rendered.contains("- No explicit error lines found; review excerpts for context."));
    assert!(rendered
        .contains("- Reproduce the issue with a minimal input and capture a short log excerpt."));
}

#[test]
fn slug_hint_is_used_when_metadata_is_absent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = service_in(dir.path());
    let request = request_from_json(
        r#"{"text": "error: boom", "date": "2026-02-24", "slug_hint": "Weekly Triage"}"#,
    );

    let outcome = service.summarize(&request).expect("summarize should succeed");
    assert!(outcome.note_id.starts_with("2026-02-24-weekly-triage-"));
}

#[test]
fn zero_excerpt_bound_is_rejected_before_writing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = service_in(dir.path());
    let request = request_from_json(
        r#"{"text": "error: boom", "date": "2026-02-24", "max_excerpt_lines": 0}"#,
    );

    let err = service.summarize(&request).expect_err("zero bound must fail");
    assert!(matches!(
        err,
        NoteServiceError::Request(RequestError::NonPositiveExcerptBound)
    ));
    assert!(err.to_string().contains("positive integer"));
    assert!(!dir.path().join("notes").exists());
}

#[test]
fn blank_text_and_bad_date_and_bad_timezone_fail_fast() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = service_in(dir.path());

    let blank = request_from_json(r#"{"text": "   "}"#);
    let err = service.summarize(&blank).expect_err("blank text must fail");
    assert!(err.to_string().contains("must not be empty"));

    let bad_date = request_from_json(r#"{"text": "x", "date": "Feb 24"}"#);
    let err = service.summarize(&bad_date).expect_err("bad date must fail");
    assert!(err.to_string().contains("YYYY-MM-DD"));

    let bad_zone = request_from_json(r#"{"text": "x", "timezone": "Moon/Crater"}"#);
    let err = service.summarize(&bad_zone).expect_err("bad timezone must fail");
    assert!(err.to_string().contains("invalid timezone"));

    assert!(!dir.path().join("notes").exists());
}

#[test]
fn missing_notes_root_is_a_configuration_error() {
    let missing = std::env::temp_dir().join("lognote-missing-root-for-tests");
    let err = FsNoteRepository::try_new(&missing).expect_err("missing root must fail");
    assert!(err.to_string().contains("does not exist"));
}
