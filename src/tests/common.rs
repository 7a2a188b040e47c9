// src/tests/common.rs

//! Fixtures shared by the tests of _sslib_.

use crate::common::FPaths;
use crate::data::record::{Record, TimestampMs};
use crate::readers::batchemitter::{BatchEmitter, ScanConfig};

/// A well-formed single-line block of the showstart dialect.
pub const LINE_HELLO: &str = "ShowStart:|t|1234|n|L|tag|f|5|fn|x|message:hello|$";

/// A showstart block line with timestamp text `ts` and message `msg`.
pub fn block_line(
    ts: &str,
    msg: &str,
) -> String {
    format!("ShowStart:|2024-01-02 03:04:05.678|{}|app|I|Net|conn.cc|42|Open|r|message:{}|$", ts, msg)
}

/// The `Record` parsed from [`block_line`]`(ts, msg)`.
pub fn block_record(
    ts: TimestampMs,
    msg: &str,
) -> Record {
    Record::new(
        String::from("2024-01-02 03:04:05.678"),
        ts,
        String::from("app"),
        String::from("I"),
        String::from("Net"),
        String::from("conn.cc"),
        String::from("42"),
        Some(String::from("Open")),
        String::from(msg),
        None,
    )
}

/// The `Record` parsed from [`LINE_HELLO`].
pub fn record_hello() -> Record {
    Record::new(
        String::from("t"),
        1234,
        String::from("n"),
        String::from("L"),
        String::from("tag"),
        String::from("f"),
        String::from("5"),
        Some(String::from("fn")),
        String::from("hello"),
        None,
    )
}

/// `count` block lines with timestamps `start..start + count`, each
/// followed by a newline.
pub fn block_lines(
    start: TimestampMs,
    count: usize,
) -> String {
    let mut s = String::new();
    for i in 0..count {
        let ts = start + i as TimestampMs;
        s.push_str(&block_line(&ts.to_string(), &format!("m{}", ts)));
        s.push('\n');
    }

    s
}

/// Pull every `Batch` until the first empty one. Returns the length of
/// each non-empty batch and all records in order.
pub fn emit_all(emitter: &mut BatchEmitter) -> (Vec<usize>, Vec<Record>) {
    let mut lens = Vec::<usize>::new();
    let mut records = Vec::<Record>::new();
    loop {
        let batch = match emitter.next_batch() {
            Ok(val) => val,
            Err(err) => panic!("next_batch() returned Err {}", err),
        };
        if batch.is_empty() {
            break;
        }
        lens.push(batch.len());
        records.extend(batch.into_records());
    }

    (lens, records)
}

/// Helper to create a `BatchEmitter` or panic.
pub fn new_emitter(
    paths: &FPaths,
    config: ScanConfig,
) -> BatchEmitter {
    match BatchEmitter::new(paths.clone(), config) {
        Ok(val) => val,
        Err(err) => panic!("BatchEmitter::new() returned Err {}", err),
    }
}
