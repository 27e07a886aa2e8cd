//! End-to-end tests for the command-line interface.

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

use mp4gps::consts::{GPS_MARKER_TAG_SIZE, RECORD_HEADER, RECORD_SIZE, TABLE_BLOCK_SIZE};

/// Raw `mvhd` creation time (1904 epoch) for 2024-07-10T00:00:00Z.
const CREATION_RAW: u32 = 3_803_414_400;

/// One valid record: 2024-07-10 12:34:56, status `A01`, a fix.
fn record() -> [u8; RECORD_SIZE] {
    let mut buf = [0_u8; RECORD_SIZE];
    buf[..0x30].copy_from_slice(&RECORD_HEADER);
    for (i, value) in [12_u32, 34, 56, 24, 7, 10].into_iter().enumerate() {
        buf[0x30 + 4 * i..][..4].copy_from_slice(&value.to_le_bytes());
    }
    buf[0x48..0x4b].copy_from_slice(b"A01");
    for (i, value) in [4512.3456_f32, 1234.5678, 12.5, 90.0].into_iter().enumerate() {
        buf[0x4c + 4 * i..][..4].copy_from_slice(&value.to_le_bytes());
    }
    buf
}

/// Minimal valid container holding one telemetry record.
fn container() -> Vec<u8> {
    let mut out = Vec::new();
    let media = [0_u8; 64];
    out.extend_from_slice(&((8 + media.len()) as u32).to_be_bytes());
    out.extend_from_slice(b"mdat");
    out.extend_from_slice(&media);

    let mvhd_size = 100_u32;
    out.extend_from_slice(&(8 + mvhd_size).to_be_bytes());
    out.extend_from_slice(b"moov");
    out.extend_from_slice(&mvhd_size.to_be_bytes());
    out.extend_from_slice(b"mvhd");
    out.extend_from_slice(&[0_u8; 4]);
    out.extend_from_slice(&CREATION_RAW.to_be_bytes());
    out.extend_from_slice(&[0_u8; 84]);

    let position = out.len() as u32;
    out.extend_from_slice(&record());

    let pad = TABLE_BLOCK_SIZE as usize - GPS_MARKER_TAG_SIZE - 8 - 8;
    out.extend_from_slice(&vec![0_u8; pad]);
    out.extend_from_slice(b"pgps ");
    out.extend_from_slice(&0_u32.to_be_bytes());
    out.extend_from_slice(&1_u32.to_be_bytes());
    out.extend_from_slice(&position.to_be_bytes());
    out.extend_from_slice(&TABLE_BLOCK_SIZE.to_be_bytes());
    out
}

fn write_fixtures() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.mp4");
    let good = dir.path().join("good.mp4");
    fs::write(&bad, [0_u8; 64]).unwrap();
    fs::write(&good, container()).unwrap();
    (dir, bad, good)
}

#[test]
fn skips_unreadable_file_and_continues() {
    let (_dir, bad, good) = write_fixtures();

    Command::cargo_bin("mp4gps")
        .unwrap()
        .args([&bad, &good])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("# 2024-07-10T00:00:00Z")
                .and(predicate::str::contains("2024-07-10 12:34:56")),
        )
        .stderr(predicate::str::contains("skipping file"));
}

#[test]
fn debug_flag_promotes_skip_to_abort() {
    let (_dir, bad, good) = write_fixtures();

    Command::cargo_bin("mp4gps")
        .unwrap()
        .arg("--debug")
        .args([&bad, &good])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mdat"));
}

#[test]
fn gpx_mode_emits_one_document_per_run() {
    let (_dir, _bad, good) = write_fixtures();

    let assert = Command::cargo_bin("mp4gps")
        .unwrap()
        .arg("-x")
        .args([&good, &good])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.starts_with("<?xml version=\"1.0\""));
    assert_eq!(stdout.matches("<?xml").count(), 1);
    assert_eq!(stdout.matches("<trkpt").count(), 2);
    assert!(stdout.ends_with("</gpx>\n"));
}

#[test]
fn rejects_missing_input_files() {
    Command::cargo_bin("mp4gps").unwrap().assert().code(2);
}
