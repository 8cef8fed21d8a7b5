//! Error handling integration tests.
//!
//! These tests verify that meaningful errors are returned for failure
//! conditions, and that the batch loop survives failing sources.

use std::path::Path;

use frametier::{BatchFrameExporter, ExportError, ExportOptions, VideoDecoder, VideoSource};

#[test]
fn open_nonexistent_file() {
    let result = VideoDecoder::open("this_file_does_not_exist.mp4");
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open video source"),
        "Error message should mention the open failure: {error_message}",
    );
    assert!(
        error_message.contains("this_file_does_not_exist.mp4"),
        "Error message should carry the path: {error_message}",
    );
}

#[test]
fn open_invalid_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    let result = VideoDecoder::open(&invalid_file_path);
    assert!(result.is_err(), "Expected error for invalid media file");
}

#[test]
fn open_audio_only_file_is_an_open_failure() {
    let path = "tests/fixtures/audio_only.mp4";
    if !Path::new(path).exists() {
        return;
    }

    // A file with no video stream fails at open time, like any other
    // unopenable source, so the batch loop skips it.
    let result = VideoDecoder::open(path);
    let error = result.expect_err("Expected error for audio-only file");
    assert!(
        matches!(error, ExportError::SourceOpen { .. }),
        "Expected SourceOpen, got: {error:?}",
    );
    assert!(
        error.to_string().contains("no video stream"),
        "Error should mention the missing video stream: {error}",
    );
}

#[test]
fn export_unopenable_source_writes_nothing() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output_dir = temporary_directory.path().join("out");

    let exporter = BatchFrameExporter::new(ExportOptions::new());
    let source = VideoSource::new("missing_video.mp4", &output_dir);

    let result = exporter.export_video(&source);
    assert!(result.is_err());
    // Open happens before directory setup, so nothing is created on disk.
    assert!(!output_dir.exists());
}

#[test]
fn batch_skips_failing_sources_and_continues() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");

    let exporter = BatchFrameExporter::new(ExportOptions::new());
    let sources = vec![
        VideoSource::new("missing_one.mp4", temporary_directory.path().join("one")),
        VideoSource::new("missing_two.mp4", temporary_directory.path().join("two")),
    ];

    // Neither source aborts the batch; both are skipped with no entry.
    let report = exporter.run(&sources);
    assert!(report.is_empty());
    assert!(report.get("missing_one.mp4").is_none());
    assert!(report.get("missing_two.mp4").is_none());
}
