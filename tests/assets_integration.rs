//! Integration tests for the asset generation commands
//!
//! Runs the binary against a throwaway directory and checks the produced
//! PNGs by reopening them.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn run_tool(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rebalance-tools"))
        .args(args)
        .output()
        .expect("failed to run rebalance-tools")
}

#[test]
fn test_feature_graphic_without_icon() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("playstore/feature_graphic.png");

    // No icon at the given path; the graphic is still produced.
    let output = run_tool(&[
        "feature-graphic",
        dir.path().join("no_such_icon.png").to_str().unwrap(),
        output_path.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let img = image::open(&output_path).unwrap();
    assert_eq!((img.width(), img.height()), (1024, 500));
}

#[test]
fn test_feature_graphic_with_icon() {
    let dir = TempDir::new().unwrap();
    let icon_path = dir.path().join("app_icon-512.png");
    let output_path = dir.path().join("feature_graphic.png");

    let icon = image::RgbaImage::from_pixel(512, 512, image::Rgba([10, 200, 10, 255]));
    icon.save(&icon_path).unwrap();

    let output = run_tool(&[
        "feature-graphic",
        icon_path.to_str().unwrap(),
        output_path.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let img = image::open(&output_path).unwrap();
    assert_eq!((img.width(), img.height()), (1024, 500));
}

#[test]
fn test_alternates_produce_full_and_thumb_sizes() {
    let dir = TempDir::new().unwrap();

    let output = run_tool(&["alternates", dir.path().to_str().unwrap()]);
    assert!(output.status.success());

    let names = [
        "feature_graphic_left_brand",
        "feature_graphic_centered",
        "feature_graphic_minimal",
        "feature_graphic_choice",
    ];

    for name in names {
        let full = image::open(dir.path().join(format!("{name}.png"))).unwrap();
        assert_eq!((full.width(), full.height()), (1024, 500));

        let thumb = image::open(dir.path().join(format!("{name}_thumb.png"))).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (512, 250));
    }
}

#[test]
fn test_previews_skip_missing_sources() {
    let dir = TempDir::new().unwrap();

    // Only one of the expected sources exists.
    let img = image::RgbaImage::from_pixel(800, 400, image::Rgba([1, 2, 3, 255]));
    img.save(dir.path().join("feature_graphic.png")).unwrap();

    let output = run_tool(&["previews", dir.path().to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Missing"));
    assert!(stdout.contains("feature_graphic_preview_1024x500.png"));

    let preview = image::open(dir.path().join("feature_graphic_preview_1024x500.png")).unwrap();
    assert_eq!((preview.width(), preview.height()), (1024, 500));
}

#[test]
fn test_check_sizes_reports_missing_files() {
    let dir = TempDir::new().unwrap();

    let img = image::RgbaImage::from_pixel(1024, 500, image::Rgba([0, 0, 0, 255]));
    img.save(dir.path().join("feature_graphic.png")).unwrap();

    let output = run_tool(&["check-sizes", dir.path().to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("feature_graphic.png (1024, 500)"));
    assert!(stdout.contains("MISSING"));
}

#[test]
fn test_resize_fits_and_pads() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("wide.png");
    let output_path = dir.path().join("fitted.png");

    let img = image::RgbaImage::from_pixel(2000, 500, image::Rgba([200, 50, 50, 255]));
    img.save(&input).unwrap();

    let output = run_tool(&[
        "resize",
        input.to_str().unwrap(),
        output_path.to_str().unwrap(),
        "1024",
        "500",
    ]);

    assert!(output.status.success());
    let fitted = image::open(&output_path).unwrap().to_rgba8();
    assert_eq!((fitted.width(), fitted.height()), (1024, 500));

    // 2000x500 scaled to fit 1024x500 is 1024x256, centered vertically.
    assert_eq!(fitted.get_pixel(0, 0).0[3], 0);
    assert_eq!(fitted.get_pixel(512, 250).0[3], 255);

    let dims = fs::metadata(&output_path).map(|m| m.len()).unwrap();
    assert!(dims > 0);
}
