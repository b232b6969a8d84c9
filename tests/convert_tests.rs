use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use tempfile::TempDir;

use opti_webp::config::{resolve_inputs, Config};
use opti_webp::convert::{convert_image, execute_conversion};

fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    DynamicImage::new_rgb8(width, height).save(&path).unwrap();
    path
}

fn config_for(inputs: Vec<PathBuf>, max_dimension: Option<u32>, sanitize_names: bool) -> Config {
    Config {
        inputs,
        output_dir: None,
        max_dimension,
        sanitize_names,
        no_progress: true,
    }
}

fn has_intermediate(dir: &Path) -> bool {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| e.file_name().to_string_lossy().ends_with("_resized.png"))
}

#[test]
fn converts_sanitized_name_without_resize() {
    let tmp = TempDir::new().unwrap();
    let input = write_test_image(tmp.path(), "Photo Name!.JPG", 10, 10);

    let config = config_for(vec![input], None, true);
    let report = execute_conversion(&config).unwrap();

    assert_eq!(report.converted(), 1);
    assert_eq!(report.failed(), 0);
    assert!(tmp.path().join("Photo_Name_.webp").is_file());
    // no max dimension, so no intermediate artifact at any point
    assert!(!has_intermediate(tmp.path()));
}

#[test]
fn resizes_to_fit_and_removes_intermediate() {
    let tmp = TempDir::new().unwrap();
    let input = write_test_image(tmp.path(), "wide.png", 400, 100);

    let config = config_for(vec![input], Some(100), false);
    let report = execute_conversion(&config).unwrap();

    assert_eq!(report.converted(), 1);
    let output = tmp.path().join("wide.webp");
    assert!(output.is_file());
    assert_eq!(image::open(&output).unwrap().dimensions(), (100, 25));
    assert!(!has_intermediate(tmp.path()));
}

#[test]
fn directory_batch_skips_unsupported_and_survives_corrupt_files() {
    let tmp = TempDir::new().unwrap();
    write_test_image(tmp.path(), "valid.jpg", 8, 8);
    fs::write(tmp.path().join("corrupt.png"), b"not really a png").unwrap();
    fs::write(tmp.path().join("notes.txt"), b"ignore me").unwrap();

    let inputs = resolve_inputs(&[], Some(tmp.path())).unwrap();
    assert_eq!(inputs.len(), 2);

    let config = config_for(inputs, None, false);
    let report = execute_conversion(&config).unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.converted(), 1);
    assert_eq!(report.failed(), 1);
    assert!(tmp.path().join("valid.webp").is_file());
    assert!(!tmp.path().join("corrupt.webp").exists());
}

#[test]
fn corrupt_file_does_not_stop_later_jobs() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a_corrupt.png"), b"garbage").unwrap();
    write_test_image(tmp.path(), "b_valid.png", 12, 6);

    let inputs = resolve_inputs(&[], Some(tmp.path())).unwrap();
    let config = config_for(inputs, None, false);
    let report = execute_conversion(&config).unwrap();

    // listing order puts the corrupt file first; the valid one still runs
    assert!(report.outcomes[0].result.is_err());
    assert!(report.outcomes[1].result.is_ok());
    assert!(tmp.path().join("b_valid.webp").is_file());
}

#[test]
fn encode_failure_still_removes_intermediate() {
    let tmp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let input = write_test_image(tmp.path(), "img.png", 300, 300);
    // a directory squatting on the destination makes the WebP write fail
    fs::create_dir(out.path().join("img.webp")).unwrap();

    let config = Config {
        inputs: vec![input.clone()],
        output_dir: Some(out.path().to_path_buf()),
        max_dimension: Some(100),
        sanitize_names: false,
        no_progress: true,
    };
    let result = convert_image(&input, &config);

    assert!(result.is_err());
    assert!(!out.path().join("img_resized.png").exists());
}

#[test]
fn output_directory_override_is_respected() {
    let tmp = TempDir::new().unwrap();
    let input = write_test_image(tmp.path(), "photo.png", 20, 10);
    let out = tmp.path().join("converted");

    let config = Config {
        inputs: vec![input],
        output_dir: Some(out.clone()),
        max_dimension: None,
        sanitize_names: false,
        no_progress: true,
    };
    let report = execute_conversion(&config).unwrap();

    assert_eq!(report.converted(), 1);
    assert!(out.join("photo.webp").is_file());
    assert!(!tmp.path().join("photo.webp").exists());
}
