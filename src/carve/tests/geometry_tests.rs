//! Tests for geometry enumeration and presets

use proptest::prelude::*;

use crate::carve::errors::CarveError;
use crate::carve::geometry::{auto_height, GeometryPlan, Presets, COMMON_WIDTHS};
use crate::carve::layout::ChannelLayout;

#[test]
fn test_default_presets() {
    let presets = Presets::default();
    assert_eq!(presets.widths, COMMON_WIDTHS.to_vec());
    let modes: Vec<String> = presets.modes.iter().map(|m| m.to_string()).collect();
    assert_eq!(modes, vec!["RGB", "RGBA", "BGRX"]);
}

#[test]
fn test_plan_uses_presets_when_unset() {
    let plan = GeometryPlan::new(&Presets::default(), None, None, None);
    assert_eq!(plan.combinations().count(), COMMON_WIDTHS.len() * 3);

    let first: Vec<(u32, String)> = plan
        .combinations()
        .take(4)
        .map(|(w, l)| (w, l.to_string()))
        .collect();
    assert_eq!(
        first,
        vec![
            (800, "RGB".to_string()),
            (800, "RGBA".to_string()),
            (800, "BGRX".to_string()),
            (1024, "RGB".to_string()),
        ]
    );
}

#[test]
fn test_plan_overrides() {
    let layout = ChannelLayout::parse("BGRA").unwrap();
    let plan = GeometryPlan::new(&Presets::default(), Some(640), Some(480), Some(layout));
    let combos: Vec<(u32, String)> = plan.combinations().map(|(w, l)| (w, l.to_string())).collect();
    assert_eq!(combos, vec![(640, "BGRA".to_string())]);
    assert_eq!(plan.height_for(10_000_000, 640, &plan.layouts[0]), 480);
}

#[test]
fn test_auto_height_covers_remainder() {
    assert_eq!(auto_height(12, 2, 3), 2);
    assert_eq!(auto_height(13, 2, 3), 3);
    assert_eq!(auto_height(1, 800, 4), 1);
}

#[test]
fn test_auto_height_degenerate_inputs() {
    assert_eq!(auto_height(0, 800, 3), 0);
    assert_eq!(auto_height(100, 0, 3), 0);
    assert_eq!(auto_height(100, 800, 0), 0);
}

#[test]
fn test_presets_from_toml() {
    let presets = Presets::from_toml_str(
        r#"
        widths = [320, 640, 320]
        modes = ["rgb", "XBGR"]
        "#,
    )
    .unwrap();
    assert_eq!(presets.widths, vec![320, 640, 320]);
    assert_eq!(presets.modes[1].to_string(), "XBGR");

    // duplicates collapse in the plan
    let plan = GeometryPlan::new(&presets, None, None, None);
    assert_eq!(plan.widths, vec![320, 640]);
}

#[test]
fn test_presets_partial_toml_keeps_defaults() {
    let presets = Presets::from_toml_str("widths = [256]").unwrap();
    assert_eq!(presets.widths, vec![256]);
    assert_eq!(presets.modes, Presets::default().modes);
}

#[test]
fn test_presets_rejects_bad_values() {
    assert!(matches!(
        Presets::from_toml_str("widths = [0]"),
        Err(CarveError::InvalidPresets(_))
    ));
    assert!(matches!(
        Presets::from_toml_str("widths = \"wide\""),
        Err(CarveError::InvalidPresets(_))
    ));
    assert!(matches!(
        Presets::from_toml_str("modes = []"),
        Err(CarveError::InvalidPresets(_))
    ));
    assert!(matches!(
        Presets::from_toml_str("modes = [\"RRGB\"]"),
        Err(CarveError::InvalidMode(_))
    ));
    assert!(Presets::from_toml_str("widths = [").is_err());
}

#[test]
fn test_presets_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.toml");
    std::fs::write(&path, "modes = [\"BGRA\"]\n").unwrap();

    let presets = Presets::load(&path).unwrap();
    assert_eq!(presets.modes.len(), 1);
    assert!(presets.modes[0].has_alpha());

    assert!(Presets::load(dir.path().join("missing.toml")).is_err());
}

proptest! {
    #[test]
    fn prop_auto_height_is_smallest_sufficient(
        remaining in 1u64..5_000_000,
        width in 1u32..4096,
        bpp in 3usize..7,
    ) {
        let height = auto_height(remaining, width, bpp);
        let row = width as u64 * bpp as u64;
        prop_assert!(row * height >= remaining);
        prop_assert!(row * (height - 1) < remaining);
    }
}
