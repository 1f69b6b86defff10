use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use lib_pink::{TileGridHeader, TileGridWriter};

const EXE: &str = env!("CARGO_BIN_EXE_showHeatmap");

fn write_grid(path: &Path, header: TileGridHeader) {
    let len = header.tile_len().unwrap();
    let mut writer = TileGridWriter::new(Vec::new(), header).unwrap();
    for t in 0..header.image_count().unwrap() {
        let tile: Vec<f32> = (0..len).map(|p| (t * 1000 + p) as f32).collect();
        writer.write_tile(&tile).unwrap();
    }
    fs::write(path, writer.finish().unwrap()).unwrap();
}

fn small_grid(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("som.bin");
    write_grid(&path, TileGridHeader::new(2, 4, 4, 3));
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(EXE).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_exits_zero() {
    for args in [&["--help"][..], &["-h", "a.bin", "b.bin"], &["-i", "9", "--help"]] {
        let output = run(args);
        assert_eq!(output.status.code(), Some(0));
        assert!(stdout(&output).contains("showHeatmap [Options] <inputfile>"));
    }
}

#[test]
fn test_missing_input_file_argument() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Input file is missing."));
    assert!(text.contains("showHeatmap [Options] <inputfile>"));
}

#[test]
fn test_two_input_files() {
    let output = run(&["a.bin", "b.bin"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("ERROR"));
}

#[test]
fn test_image_number_too_large() {
    let dir = tempfile::tempdir().unwrap();
    let path = small_grid(dir.path());

    let output = Command::new(EXE)
        .args(["-i", "2"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let text = stdout(&output);
    assert!(text.contains("Image number is 2"));
    assert!(text.contains("Number of images = 2"));
    assert!(text.contains("SOM_depth = 3"));
    assert!(text.contains("Image number too large."));
    assert!(!text.contains("All done."));
}

#[test]
fn test_png_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = small_grid(dir.path());
    let png = dir.path().join("tile.png");

    let output = Command::new(EXE)
        .args(["--image", "1", "--output"])
        .arg(&png)
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).trim_end().ends_with("All done."));

    // 4 columns and 12 rows of 16 px cells, a 12 px gap and a 24 px colour bar.
    let image = image::open(&png).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (4 * 16 + 12 + 24, 12 * 16));

    // Cell (0, 0) holds the smallest value of tile 1, cell (11, 3) the largest.
    assert_eq!(image.get_pixel(0, 0).0, lib_pink::heatmap::jet(0.0));
    assert_eq!(image.get_pixel(63, 191).0, lib_pink::heatmap::jet(1.0));
}

#[test]
fn test_unreadable_inputs_fail() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.bin");
    let output = Command::new(EXE).arg(&missing).output().unwrap();
    assert!(!output.status.success());

    let negative = dir.path().join("negative.bin");
    let mut bytes = Vec::new();
    for field in [1i32, -4, 4, 3] {
        bytes.extend_from_slice(&field.to_le_bytes());
    }
    fs::write(&negative, bytes).unwrap();
    let output = Command::new(EXE).arg(&negative).output().unwrap();
    assert!(!output.status.success());
    assert!(!stdout(&output).contains("All done."));
}

#[test]
fn test_scale_out_of_range_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = small_grid(dir.path());
    let png = dir.path().join("huge.png");

    let output = Command::new(EXE)
        .args(["--scale", "2000000000", "--output"])
        .arg(&png)
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("ERROR"));
    assert!(!png.exists());
}
