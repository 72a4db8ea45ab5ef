use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{GenericImageView, Rgb, RgbImage};
use lopdf::{Document, Object, Stream, dictionary};
use predicates::prelude::*;
use tempfile::TempDir;

fn squeeze() -> Command {
    Command::cargo_bin("squeeze").unwrap()
}

/// An empty JSON config so tests never pick up a user's config file.
fn isolated_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    fs::write(&path, "{}").unwrap();
    path
}

fn photo(dir: &Path) -> PathBuf {
    let image = RgbImage::from_fn(320, 240, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    let path = dir.join("holiday.png");
    image.save(&path).unwrap();
    path
}

/// A PDF with one blank page per `(width, height)` in points.
fn blank_pdf(dir: &Path, page_sizes: &[(i64, i64)]) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));

    let kids: Vec<Object> = page_sizes
        .iter()
        .map(|&(width, height)| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ],
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join("scan.pdf");
    doc.save(&path).unwrap();
    path
}

/// A stand-in for gs that copies its input to the `-sOutputFile=` target.
#[cfg(unix)]
fn copying_gs(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-gs");
    fs::write(
        &path,
        "#!/bin/sh\n\
         for arg; do\n\
           case \"$arg\" in -sOutputFile=*) out=\"${arg#-sOutputFile=}\" ;; esac\n\
           last=\"$arg\"\n\
         done\n\
         cp \"$last\" \"$out\"\n",
    )
    .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    squeeze()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("jpeg"))
        .stdout(predicate::str::contains("pdf"))
        .stdout(predicate::str::contains("combine"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    squeeze()
        .arg("-c")
        .arg(&config)
        .args(["jpeg", "/nonexistent/photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_jpeg_writes_resized_output() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let input = photo(dir.path());

    squeeze()
        .arg("-c")
        .arg(&config)
        .arg("jpeg")
        .arg(&input)
        .args(["--max-kb", "500", "--min-kb", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tried quality=95"))
        .stdout(predicate::str::contains("Saved"));

    let output = dir.path().join("holiday_resized.jpg");
    let written = image::open(&output).unwrap();
    assert_eq!((written.width(), written.height()), (160, 212));
}

#[test]
fn test_jpeg_json_report() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let input = photo(dir.path());
    let output = dir.path().join("small.jpg");

    squeeze()
        .arg("-c")
        .arg(&config)
        .arg("jpeg")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--width", "32", "--height", "32", "--max-kb", "50", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"below_minimum\""))
        .stdout(predicate::str::contains("\"level\": 95"));

    assert!(output.exists());
}

#[test]
fn test_pdf_with_missing_ghostscript() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let input = dir.path().join("doc.pdf");
    fs::write(&input, b"%PDF-1.4").unwrap();

    squeeze()
        .arg("-c")
        .arg(&config)
        .arg("pdf")
        .arg(&input)
        .args(["--gs", "nonexistent_gs_12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("external tool not found"));
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    squeeze()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "pdf.max_kb", "250"])
        .assert()
        .success();

    squeeze()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "pdf.max_kb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("250"));

    squeeze()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "jpeg.width"])
        .assert()
        .success()
        .stdout(predicate::str::contains("160"));
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    squeeze()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "jpeg.max_kb", "0"])
        .assert()
        .failure();

    squeeze()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "jpeg.no_such_key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    squeeze()
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    squeeze()
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_input_path_read_from_piped_stdin() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let input = photo(dir.path());

    squeeze()
        .arg("-c")
        .arg(&config)
        .args(["jpeg", "--max-kb", "500", "--min-kb", "1"])
        .write_stdin(format!("{}\n", input.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    assert!(dir.path().join("holiday_resized.jpg").exists());
}

#[test]
fn test_empty_piped_stdin_fails() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    squeeze()
        .arg("-c")
        .arg(&config)
        .arg("pdf")
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input file given"));
}

#[test]
fn test_combine_stacks_pages_into_one_jpeg() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let input = blank_pdf(dir.path(), &[(72, 72), (72, 144)]);

    squeeze()
        .arg("-c")
        .arg(&config)
        .arg("combine")
        .arg(&input)
        .args(["--dpi", "72"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tried quality=95"))
        .stdout(predicate::str::contains("Saved"));

    let written = image::open(dir.path().join("scan_combined.jpg")).unwrap();
    let (width, height) = written.dimensions();
    assert!(width > 0);
    assert!(height > width * 2, "pages not stacked: {width}x{height}");
}

#[cfg(unix)]
#[test]
fn test_pdf_runs_optimizer_and_keeps_first_preset() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let input = blank_pdf(dir.path(), &[(612, 792)]);
    let gs = copying_gs(dir.path());

    squeeze()
        .arg("-c")
        .arg(&config)
        .arg("pdf")
        .arg(&input)
        .arg("--gs")
        .arg(&gs)
        .args(["--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"level\": \"screen\""))
        .stdout(predicate::str::contains("\"status\": \"below_minimum\""));

    let output = dir.path().join("scan_compressed.pdf");
    assert_eq!(fs::read(&output).unwrap(), fs::read(&input).unwrap());

    let leftovers = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".squeeze-"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn test_config_set_rejects_repeated_presets() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    squeeze()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "pdf.presets", r#"["screen","screen"]"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than once"));

    assert_eq!(fs::read_to_string(&config).unwrap(), "{}");
}
