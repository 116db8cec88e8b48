#![allow(dead_code)]

use std::path::Path;

pub const NUKE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/nuke.jsonl");
pub const NUKE_TRUNCATED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/nuke_truncated.jsonl");

pub fn nuke() -> Vec<u8> {
    std::fs::read(NUKE).unwrap()
}

pub fn nuke_truncated() -> Vec<u8> {
    std::fs::read(NUKE_TRUNCATED).unwrap()
}

/// Copies the fixture into `dir` once for every file name.
pub fn place(dir: &Path, fixture: &str, names: &[&str]) {
    for name in names {
        std::fs::copy(fixture, dir.join(name)).unwrap();
    }
}

pub fn config(args: &[&str]) -> ingest::Config {
    use clap::Parser;

    let mut full = vec!["ingest"];
    full.extend_from_slice(args);
    ingest::Config::try_parse_from(full).unwrap()
}
