//! Shared helpers for the integration tests: run small configurations
//! and read the compressed batch files back.
#![allow(dead_code)]

use datagen_core::{Compression, GeneratorConfig, UseCase};
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

pub fn small_config(out: &Path, customers: u64) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.customers = customers;
    config.output_dir = out.to_path_buf();
    config.batch_size = 1_000;
    config.compression = Compression::Snappy;
    config.use_case = UseCase::Both;
    config
}

pub fn decompress(path: &Path) -> Vec<u8> {
    let raw = fs::read(path).unwrap();
    let ext = path.extension().unwrap().to_str().unwrap();
    let mut out = Vec::new();
    match ext {
        "gz" => {
            flate2::read::GzDecoder::new(&raw[..])
                .read_to_end(&mut out)
                .unwrap();
        }
        "sz" => {
            snap::read::FrameDecoder::new(&raw[..])
                .read_to_end(&mut out)
                .unwrap();
        }
        "lz4" => {
            lz4_flex::frame::FrameDecoder::new(&raw[..])
                .read_to_end(&mut out)
                .unwrap();
        }
        other => panic!("unexpected extension '{other}' on {}", path.display()),
    }
    out
}

/// All batch files for one table, in batch order.
pub fn table_files(dir: &Path, table: &str) -> Vec<PathBuf> {
    let prefix = format!("{table}_");
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_str().unwrap();
            name.starts_with(&prefix)
                && name[prefix.len()..].starts_with(|c: char| c.is_ascii_digit())
        })
        .collect();
    files.sort();
    files
}

/// Concatenate a table across its batches. Every batch must carry the
/// same header row; the returned rows exclude headers.
pub fn read_table(dir: &Path, table: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
    let files = table_files(dir, table);
    assert!(!files.is_empty(), "no batch files for table '{table}'");

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for file in &files {
        let bytes = decompress(file);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(&bytes[..]);
        let batch_headers: Vec<String> =
            reader.headers().unwrap().iter().map(String::from).collect();
        match &headers {
            None => headers = Some(batch_headers),
            Some(expected) => assert_eq!(&batch_headers, expected, "header drift in {file:?}"),
        }
        for record in reader.records() {
            rows.push(record.unwrap());
        }
    }
    (headers.unwrap(), rows)
}

/// Column index lookup by header name.
pub fn col(headers: &[String], name: &str) -> usize {
    headers
        .iter()
        .position(|h| h == name)
        .unwrap_or_else(|| panic!("no column '{name}' in {headers:?}"))
}

/// Map of relative path -> file bytes for a whole output tree.
pub fn snapshot_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            walk(root, &path, out);
        } else {
            let rel = path.strip_prefix(root).unwrap().to_str().unwrap().to_string();
            out.insert(rel, fs::read(&path).unwrap());
        }
    }
}

/// Cents from the canonical `X.YY` money string.
pub fn parse_cents(s: &str) -> i64 {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let (dollars, cents) = rest.split_once('.').unwrap();
    assert_eq!(cents.len(), 2, "money '{s}' must have two decimals");
    sign * (dollars.parse::<i64>().unwrap() * 100 + cents.parse::<i64>().unwrap())
}
