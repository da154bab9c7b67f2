use assert_fs::prelude::*;
use assert_fs::TempDir;
use image::{GenericImageView, ImageFormat, RgbImage};
use std::process::{Command, Output};

fn panelpress(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_panelpress"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run panelpress")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn no_arguments_prints_usage_and_exits_1() {
    let output = panelpress(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage:"), "stdout: {}", stdout(&output));
}

#[test]
fn batch_on_a_file_exits_1() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.child("page.png");
    RgbImage::new(4, 4).save(input.path()).unwrap();

    let output = panelpress(&[input.path().to_str().unwrap(), "--batch"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Batch mode requires a directory path"));
}

#[test]
fn missing_input_file_exits_1() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.png");

    let output = panelpress(&[missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Input file not found"));
}

#[test]
fn out_of_range_quality_exits_1() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.child("page.png");
    RgbImage::new(4, 4).save(input.path()).unwrap();

    let output = panelpress(&[input.path().to_str().unwrap(), "--quality", "0"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Quality must be between 1 and 100"));
}

#[test]
fn single_file_prints_output_path_and_info() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.child("page.png");
    RgbImage::new(1600, 1200).save(input.path()).unwrap();
    let target = temp_dir.child("small.jpg");

    let output = panelpress(&[
        input.path().to_str().unwrap(),
        target.path().to_str().unwrap(),
        "--width",
        "800",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Image optimized successfully"));
    assert!(text.contains(&format!("Image Info: {}", target.path().display())));
    assert!(text.contains("Dimensions: 800x600"));
    assert!(text.contains("Format: JPEG"));
    assert!(text.contains("Color Mode: RGB"));
    assert!(text.contains(" KB"));
    assert!(text.contains("Has EXIF metadata: false"));
    assert_eq!(image::open(target.path()).unwrap().dimensions(), (800, 600));
}

#[test]
fn logs_stay_quiet_unless_verbose() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.child("page.png");
    RgbImage::new(64, 64).save(input.path()).unwrap();
    let path = input.path().to_str().unwrap();

    let quiet = panelpress(&[path]);
    assert!(quiet.status.success());
    assert_eq!(stderr(&quiet), "");

    let verbose = panelpress(&[path, "--verbose"]);
    assert!(verbose.status.success());
    let log = stderr(&verbose);
    assert!(log.contains("DEBUG"), "stderr: {}", log);
    assert!(log.contains("Saving image to"), "stderr: {}", log);
}

#[test]
fn thumbnail_mode_writes_thumb() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.child("cover.png");
    RgbImage::new(800, 1200).save(input.path()).unwrap();

    let output = panelpress(&[
        input.path().to_str().unwrap(),
        "--thumbnail",
        "--thumb-size",
        "200x300",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let thumb = temp_dir.path().join("cover_thumb.jpg");
    assert_eq!(image::open(thumb).unwrap().dimensions(), (200, 300));
}

#[test]
fn batch_prints_status_lines_and_summary() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["p1.png", "p2.png"] {
        RgbImage::new(16, 16)
            .save_with_format(temp_dir.child(name).path(), ImageFormat::Png)
            .unwrap();
    }
    temp_dir.child("broken.webp").write_binary(b"RIFF0000WEBP").unwrap();
    temp_dir.child("readme.md").write_str("# pages").unwrap();

    let output = panelpress(&[temp_dir.path().to_str().unwrap(), "--batch"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Optimized: p1.png ->"));
    assert!(text.contains("Optimized: p2.png ->"));
    assert!(text.contains("Error processing broken.webp"));
    assert!(text.contains("Successfully optimized 2 images"));
    assert!(text.contains("Failed: 1 images"));
    assert!(stderr(&output).contains("Error processing broken.webp"));
    assert!(temp_dir.path().join("optimized/p1.jpg").exists());
    assert!(!temp_dir.path().join("optimized/broken.jpg").exists());
}

#[test]
fn info_mode_leaves_input_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.child("fixture.png");
    RgbImage::new(800, 600).save(input.path()).unwrap();

    let output = panelpress(&[input.path().to_str().unwrap(), "--info"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Dimensions: 800x600"));
    assert!(text.contains("Format: PNG"));
    assert!(text.contains("Color Mode: RGB"));
    assert!(!temp_dir.path().join("fixture_optimized.jpg").exists());
}
