use image::{Rgba, RgbaImage};
use palette_gradient::{compose, load_image, AdjustmentParameters, GradientError, Session};
use std::path::PathBuf;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("palette-gradient-{}-{}", std::process::id(), name))
}

fn solid_red_source() -> RgbaImage {
    RgbaImage::from_pixel(64, 10, RED)
}

#[test]
fn test_red_source_with_default_parameters() {
    let output = compose(&solid_red_source(), &AdjustmentParameters::default()).unwrap();
    assert_eq!(output.dimensions(), (64, 110));
    assert!(output.pixels().all(|p| *p == RED));
}

#[test]
fn test_red_source_with_zero_brightness_starts_red_and_ends_black() {
    let params = AdjustmentParameters {
        brightness_factor: 0.0,
        ..Default::default()
    };
    let output = compose(&solid_red_source(), &params).unwrap();
    assert_eq!(output.dimensions(), (64, 110));
    for x in [0, 31, 32, 63] {
        assert_eq!(*output.get_pixel(x, 0), RED);
        assert_eq!(*output.get_pixel(x, 109), Rgba([0, 0, 0, 255]));
    }
}

#[test]
fn test_uniform_source_with_zero_brightness_everywhere() {
    // Both endpoints are black when the sampled color itself is black.
    let source = RgbaImage::from_pixel(64, 10, Rgba([0, 0, 0, 255]));
    let params = AdjustmentParameters {
        brightness_factor: 0.0,
        ..Default::default()
    };
    let output = compose(&source, &params).unwrap();
    assert_eq!(output.dimensions(), (64, 110));
    assert!(output.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
}

#[test]
fn test_output_width_truncates_to_whole_blocks() {
    let source = RgbaImage::from_pixel(100, 3, Rgba([30, 60, 90, 255]));
    let output = compose(&source, &AdjustmentParameters::default()).unwrap();
    assert_eq!(output.dimensions(), (96, 33));
}

#[test]
fn test_save_before_load_writes_nothing() {
    let path = temp_path("never-written.png");
    let _ = std::fs::remove_file(&path);

    let session = Session::new();
    let err = session.save(&path).unwrap_err();
    assert!(matches!(err, GradientError::NoResult));
    assert!(!path.exists());
}

#[test]
fn test_load_process_save_round_trip() {
    let input = temp_path("input.png");
    let output = temp_path("output.png");
    solid_red_source().save(&input).unwrap();

    let mut session = Session::new();
    session.load(&input).unwrap();
    session.set_parameters(AdjustmentParameters {
        hue_shift_degrees: 60.0,
        ..Default::default()
    });
    session.save(&output).unwrap();

    let saved = load_image(&output).unwrap();
    assert_eq!(saved.dimensions(), (64, 110));
    assert_eq!(*saved.get_pixel(10, 0), RED);
    assert_eq!(*saved.get_pixel(10, 109), Rgba([255, 255, 0, 255]));

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}

#[test]
fn test_transparent_source_renders_opaque_gradient() {
    let input = temp_path("transparent.png");
    let output = temp_path("transparent-out.png");
    RgbaImage::from_pixel(32, 4, Rgba([0, 128, 0, 0])).save(&input).unwrap();

    let mut session = Session::new();
    session.load(&input).unwrap();
    session.save(&output).unwrap();

    // Hidden green carries no weight, so the block samples as opaque black.
    let saved = load_image(&output).unwrap();
    assert_eq!(saved.dimensions(), (32, 44));
    assert!(saved.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}

#[test]
fn test_corrupt_file_is_a_load_error() {
    let path = temp_path("corrupt.png");
    std::fs::write(&path, b"not really a png").unwrap();

    let mut session = Session::new();
    let err = session.load(&path).unwrap_err();
    assert!(matches!(err, GradientError::Load { .. }));
    assert!(session.source().is_none());
    assert!(session.output().is_none());

    let _ = std::fs::remove_file(&path);
}
