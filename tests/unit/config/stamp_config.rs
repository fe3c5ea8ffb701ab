use super::*;
use crate::composite::geometry::{BoxShape, MarginBasis};

#[test]
fn empty_object_yields_defaults() {
    let cfg = StampConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, StampConfig::default());
    assert_eq!(cfg.scale.get(), 0.2);
    assert_eq!(cfg.preview_throttle_ms, 200);
    assert_eq!(cfg.session_opts().preview_throttle, Duration::from_millis(200));
}

#[test]
fn parses_full_document() {
    let cfg = StampConfig::from_json_str(
        r#"{
            "watermark": "wm.png",
            "scale": 0.35,
            "geometry": { "margin_basis": "short_side", "box_shape": "asset_aspect" },
            "resample": "lanczos3",
            "max_surface_bytes": 1048576,
            "preview_throttle_ms": 50
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.watermark, Some(PathBuf::from("wm.png")));
    assert_eq!(cfg.scale.get(), 0.35);
    assert_eq!(cfg.geometry.margin_basis, MarginBasis::ShortSide);
    assert_eq!(cfg.geometry.box_shape, BoxShape::AssetAspect);
    assert_eq!(cfg.geometry.margin_ratio, 0.015);
    assert_eq!(cfg.resample, ResampleFilter::Lanczos3);
    assert_eq!(cfg.compositor_opts().allocator.max_surface_bytes(), 1_048_576);
}

#[test]
fn rejects_unknown_fields_and_bad_values() {
    assert!(matches!(
        StampConfig::from_json_str(r#"{ "opacity": 0.5 }"#),
        Err(StampError::Serde(_))
    ));
    assert!(matches!(
        StampConfig::from_json_str(r#"{ "scale": 1.5 }"#),
        Err(StampError::Serde(_))
    ));
    assert!(matches!(
        StampConfig::from_json_str(r#"{ "geometry": { "margin_ratio": 0.6 } }"#),
        Err(StampError::InvalidInput(_))
    ));
    assert!(matches!(
        StampConfig::from_json_str(r#"{ "max_surface_bytes": 0 }"#),
        Err(StampError::InvalidInput(_))
    ));
}

#[test]
fn load_resolves_watermark_relative_to_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("camstamp.json");
    std::fs::write(&path, r#"{ "watermark": "wm.png" }"#).unwrap();
    let cfg = StampConfig::load(&path).unwrap();
    assert_eq!(cfg.watermark, Some(dir.path().join("wm.png")));
}

#[test]
fn build_compositor_without_watermark_fails_fast() {
    assert!(matches!(
        StampConfig::default().build_compositor(),
        Err(StampError::AssetLoad(_))
    ));
}
