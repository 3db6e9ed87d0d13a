//! Integration tests for the raw image scanner

use std::fs;
use std::path::Path;

use rawcarve::commands::{build_cli, Command, ScanCommand};
use rawcarve::{CarveError, RawCarve, ScanConfig};

fn png_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_default_presets_scan_small_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let api = RawCarve::new(ScanConfig {
        output_dir: dir.path().to_path_buf(),
        show_progress: false,
        ..ScanConfig::default()
    });

    let data = [0x00, 0x00, 0xFF, 0x11, 0x22, 0x33, 0xFF, 0x00, 0x00, 0x44, 0x55, 0x66];
    let reports = api.scan_bytes(&data).unwrap();

    // 9 widths x 3 modes, each a single one-row image
    assert_eq!(reports.len(), 27);
    let files = png_files(dir.path());
    assert_eq!(files.len(), 27);
    assert!(files.contains(&"RGB-800x1.png".to_string()));
    assert!(files.contains(&"BGRX-2048x1.png".to_string()));
}

#[test]
fn test_scan_file_with_cli_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.bin");
    let mut data = vec![0u8; 16];
    data.extend((0..64u8).map(|v| v.wrapping_mul(37)));
    fs::write(&input, &data).unwrap();
    let out = dir.path().join("images");

    let matches = build_cli()
        .try_get_matches_from([
            "rawcarve",
            input.to_str().unwrap(),
            "--width", "4",
            "--height", "2",
            "--mode", "bgra",
            "--offset", "16",
            "--count", "3",
            "--out", out.to_str().unwrap(),
            "--quiet",
        ])
        .unwrap();

    let command = ScanCommand::new(&matches).unwrap();
    command.execute().unwrap();

    assert_eq!(
        png_files(&out),
        vec!["BGRA-4x2-0.png", "BGRA-4x2-1.png"]
    );
}

#[test]
fn test_invalid_mode_fails_before_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never");

    let matches = build_cli()
        .try_get_matches_from(["rawcarve", "missing.bin", "--mode", "RRGB", "--out", out.to_str().unwrap()])
        .unwrap();

    let result = ScanCommand::new(&matches);
    assert!(matches!(result, Err(CarveError::InvalidMode(_))));
    assert!(!out.exists());
}

#[test]
fn test_bad_numbers_are_rejected() {
    for (flag, value) in [("--width", "wide"), ("--count", "many"), ("--offset", "0x10")] {
        let matches = build_cli()
            .try_get_matches_from(["rawcarve", "in.bin", flag, value])
            .unwrap();
        assert!(matches!(ScanCommand::new(&matches), Err(CarveError::InvalidArgument(_))));
    }
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let api = RawCarve::new(ScanConfig {
        output_dir: dir.path().join("out"),
        show_progress: false,
        ..ScanConfig::default()
    });

    let result = api.scan_file(dir.path().join("nope.bin").to_str().unwrap());
    assert!(matches!(result, Err(CarveError::InvalidArgument(_))));
}

#[test]
fn test_decode_single_chunk() {
    let image = RawCarve::decode(&[9, 8, 7, 1, 2, 3], 2, 1, "BGR").unwrap().unwrap();
    assert_eq!(image.as_bytes(), &[7, 8, 9, 3, 2, 1]);

    assert!(RawCarve::decode(&[0x7F; 12], 2, 2, "RGB").unwrap().is_none());
    assert!(RawCarve::decode(&[1, 2, 3], 1, 1, "RGBAA").is_err());
}
