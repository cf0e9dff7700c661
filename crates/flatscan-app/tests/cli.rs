// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line behaviour of the `flatscan` binary.

use std::path::Path;

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use tempfile::TempDir;

fn flatscan() -> Command {
    Command::new(env!("CARGO_BIN_EXE_flatscan"))
}

fn write_photo(path: &Path) {
    let mut img = RgbImage::from_pixel(240, 320, Rgb([20, 20, 20]));
    for y in 30..290 {
        for x in 25..215 {
            img.put_pixel(x, y, Rgb([230, 230, 225]));
        }
    }
    img.save(path).unwrap();
}

#[test]
fn help_lists_flags() {
    flatscan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--adjust"))
        .stdout(predicate::str::contains("--ppi"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn version_is_printed() {
    flatscan()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn images_are_required() {
    flatscan()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn zero_ppi_exits_with_config_error() {
    flatscan()
        .args(["-p", "0", "photo.jpg"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ppi"));
}

#[test]
fn writes_page_under_output_dir() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    write_photo(&dir.path().join("photo.png"));

    flatscan()
        .current_dir(dir.path())
        .args(["-p", "20", "-o"])
        .arg(&out)
        .arg("photo.png")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing: photo.png"));

    let page = image::open(out.join("photo.png")).unwrap();
    assert_eq!((page.width(), page.height()), (165, 234));
}

#[test]
fn broken_image_exits_nonzero_but_batch_continues() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    std::fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
    write_photo(&dir.path().join("good.png"));
    let report = dir.path().join("report.json");

    flatscan()
        .current_dir(dir.path())
        .args(["-p", "20", "--report"])
        .arg(&report)
        .arg("-o")
        .arg(&out)
        .args(["broken.png", "good.png"])
        .assert()
        .code(1);

    assert!(out.join("good.png").exists());
    assert!(!out.join("broken.png").exists());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["images"][0]["status"], "skipped");
    assert_eq!(json["images"][1]["status"], "written");
}
