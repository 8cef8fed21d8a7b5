//! ExportOptions, QualityTier, and VideoSource tests.

use frametier::{ExportOptions, QualityTier, VideoSource, default_tiers, scaled_dimensions};

// ── QualityTier ──────────────────────────────────────────────

#[test]
fn tier_accepts_valid_scales() {
    assert!(QualityTier::new("full", 1.0).is_ok());
    assert!(QualityTier::new("demi", 0.5).is_ok());
    assert!(QualityTier::new("tiny", 0.001).is_ok());
}

#[test]
fn tier_rejects_out_of_range_scales() {
    assert!(QualityTier::new("zero", 0.0).is_err());
    assert!(QualityTier::new("negative", -0.5).is_err());
    assert!(QualityTier::new("upscale", 1.5).is_err());
    assert!(QualityTier::new("nan", f64::NAN).is_err());
}

#[test]
fn tier_rejection_names_the_tier() {
    let error = QualityTier::new("huge", 2.0).unwrap_err();
    let message = error.to_string();
    assert!(
        message.contains("huge") && message.contains('2'),
        "Error should carry tier name and scale: {message}",
    );
}

#[test]
fn tier_identity_only_at_exactly_one() {
    assert!(QualityTier::new("full", 1.0).unwrap().is_identity());
    assert!(!QualityTier::new("near", 0.999).unwrap().is_identity());
}

#[test]
fn default_ladder_order_and_scales() {
    let tiers = default_tiers();
    let summary: Vec<(&str, f64)> = tiers
        .iter()
        .map(|tier| (tier.name.as_str(), tier.scale))
        .collect();
    assert_eq!(
        summary,
        vec![("full", 1.0), ("demi", 0.5), ("quart", 0.25)],
    );
}

// ── scaled_dimensions ────────────────────────────────────────

#[test]
fn odd_dimensions_truncate() {
    // floor, not round: 101 * 0.5 = 50.5 -> 50
    assert_eq!(scaled_dimensions(101, 101, 0.5), (50, 50));
    assert_eq!(scaled_dimensions(101, 101, 0.25), (25, 25));
}

#[test]
fn stock_ladder_dimensions_for_hd() {
    assert_eq!(scaled_dimensions(1920, 1080, 1.0), (1920, 1080));
    assert_eq!(scaled_dimensions(1920, 1080, 0.5), (960, 540));
    assert_eq!(scaled_dimensions(1920, 1080, 0.25), (480, 270));
}

// ── ExportOptions builder ────────────────────────────────────

#[test]
fn options_defaults() {
    let options = ExportOptions::new();
    assert_eq!(options.jpeg_quality(), 80);
    assert_eq!(options.tiers().len(), 3);

    let debug = format!("{options:?}");
    assert!(debug.contains("jpeg_quality: 80"));
    assert!(debug.contains("progress_interval: 30"));
}

#[test]
fn options_quality_clamped() {
    assert_eq!(ExportOptions::new().with_jpeg_quality(0).jpeg_quality(), 1);
    assert_eq!(
        ExportOptions::new().with_jpeg_quality(255).jpeg_quality(),
        100
    );
    assert_eq!(
        ExportOptions::new().with_jpeg_quality(92).jpeg_quality(),
        92
    );
}

#[test]
fn options_tiers_replaceable_and_ordered() {
    let options = ExportOptions::new().with_tiers(vec![
        QualityTier::new("b", 0.5).unwrap(),
        QualityTier::new("a", 0.25).unwrap(),
    ]);
    let names: Vec<&str> = options.tiers().iter().map(|t| t.name.as_str()).collect();
    // List order is processing order, not alphabetical.
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn options_progress_interval_clamps_zero() {
    let options = ExportOptions::new().with_progress_interval(0);
    let debug = format!("{options:?}");
    assert!(debug.contains("progress_interval: 1"));
}

// ── VideoSource ──────────────────────────────────────────────

#[test]
fn source_keeps_both_paths() {
    let source = VideoSource::new("vids/idle.mp4", "frames/idle");
    assert_eq!(source.path.to_str(), Some("vids/idle.mp4"));
    assert_eq!(source.output_dir.to_str(), Some("frames/idle"));
}
