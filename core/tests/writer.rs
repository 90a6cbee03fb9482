//! Batch writer behavior: splitting, per-batch headers, empty tables,
//! codec round-trips and temp-file hygiene.

mod common;

use common::{decompress, read_table, table_files};
use datagen_core::writer::BatchWriter;
use datagen_core::Compression;
use serde::Serialize;
use std::fs;

#[derive(Serialize)]
struct Row {
    id: u64,
    label: String,
}

const HEADERS: &[&str] = &["id", "label"];

fn row(id: u64) -> Row {
    Row {
        id,
        label: format!("label-{id}"),
    }
}

#[test]
fn rows_split_into_fixed_size_batches() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = BatchWriter::new(dir.path(), "things", HEADERS, Compression::Snappy, 10);
    for i in 0..25 {
        writer.write(&row(i)).unwrap();
    }
    let report = writer.finish().unwrap();
    assert_eq!(report.rows, 25);
    assert_eq!(report.batches, 3);

    let files = table_files(dir.path(), "things");
    assert_eq!(files.len(), 3);
    for file in &files {
        let bytes = decompress(file);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("id,label\n"), "missing header in {file:?}");
    }

    let (_, rows) = read_table(dir.path(), "things");
    assert_eq!(rows.len(), 25);
    assert_eq!(&rows[24][1], "label-24");
}

#[test]
fn empty_table_still_emits_a_header_only_batch() {
    let dir = tempfile::tempdir().unwrap();
    let writer = BatchWriter::new(dir.path(), "empty", HEADERS, Compression::Gzip, 100);
    let report = writer.finish().unwrap();
    assert_eq!(report.rows, 0);
    assert_eq!(report.batches, 1);

    let files = table_files(dir.path(), "empty");
    assert_eq!(files.len(), 1);
    let text = String::from_utf8(decompress(&files[0])).unwrap();
    assert_eq!(text, "id,label\n");
}

#[test]
fn all_codecs_round_trip() {
    for codec in [Compression::Snappy, Compression::Gzip, Compression::Lz4] {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = BatchWriter::new(dir.path(), "rt", HEADERS, codec, 1_000);
        for i in 0..50 {
            writer.write(&row(i)).unwrap();
        }
        writer.finish().unwrap();

        let files = table_files(dir.path(), "rt");
        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].extension().unwrap().to_str().unwrap(),
            codec.extension()
        );
        let (headers, rows) = read_table(dir.path(), "rt");
        assert_eq!(headers, vec!["id", "label"]);
        assert_eq!(rows.len(), 50);
    }
}

#[test]
fn dropped_writer_leaves_no_partial_files() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut writer =
            BatchWriter::new(dir.path(), "doomed", HEADERS, Compression::Snappy, 1_000);
        writer.write(&row(1)).unwrap();
        // Dropped without finish(): simulates an abort mid-table.
    }
    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "stray files: {leftovers:?}");
}

#[test]
fn partial_final_batch_is_flushed_on_finish() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = BatchWriter::new(dir.path(), "tail", HEADERS, Compression::Lz4, 10);
    for i in 0..12 {
        writer.write(&row(i)).unwrap();
    }
    let report = writer.finish().unwrap();
    assert_eq!(report.batches, 2);

    let (_, rows) = read_table(dir.path(), "tail");
    assert_eq!(rows.len(), 12);
}
