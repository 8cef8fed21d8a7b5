//! BatchReport aggregation and summary formatting tests.

use frametier::{BatchReport, VideoStats};

fn stats(frame_count: u64, frames_per_second: f64) -> VideoStats {
    VideoStats {
        frame_count,
        frames_per_second,
    }
}

#[test]
fn empty_report() {
    let report = BatchReport::new();
    assert!(report.is_empty());
    assert_eq!(report.len(), 0);
    assert_eq!(report.to_string(), "");
}

#[test]
fn entries_keyed_by_full_path() {
    // Two sources whose output-dir basenames would collide must still get
    // two distinct entries, because the key is the source path.
    let mut report = BatchReport::new();
    report.record("vids/a/idle.mp4", stats(10, 24.0));
    report.record("vids/b/idle.mp4", stats(20, 30.0));

    assert_eq!(report.len(), 2);
    assert_eq!(report.get("vids/a/idle.mp4").unwrap().frame_count, 10);
    assert_eq!(report.get("vids/b/idle.mp4").unwrap().frame_count, 20);
}

#[test]
fn same_path_replaces_entry() {
    let mut report = BatchReport::new();
    report.record("clip.mp4", stats(5, 24.0));
    report.record("clip.mp4", stats(8, 24.0));

    assert_eq!(report.len(), 1);
    assert_eq!(report.get("clip.mp4").unwrap().frame_count, 8);
}

#[test]
fn iteration_preserves_processing_order() {
    let mut report = BatchReport::new();
    report.record("z.mp4", stats(1, 24.0));
    report.record("a.mp4", stats(2, 24.0));

    let order: Vec<_> = report.iter().map(|(path, _)| path.to_path_buf()).collect();
    assert_eq!(order[0].to_str(), Some("z.mp4"));
    assert_eq!(order[1].to_str(), Some("a.mp4"));
}

#[test]
fn summary_line_format() {
    let mut report = BatchReport::new();
    report.record("frames/idle.mp4", stats(142, 29.97));

    assert_eq!(
        report.to_string(),
        "frames/idle.mp4: 142 frames à 29.97 FPS\n",
    );
}

#[test]
fn missing_path_lookup() {
    let mut report = BatchReport::new();
    report.record("present.mp4", stats(1, 24.0));
    assert!(report.get("absent.mp4").is_none());
}
