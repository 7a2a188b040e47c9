// src/tests/printers_tests.rs

//! tests for `printer/printers.rs`

#![allow(non_snake_case)]

use crate::data::record::Record;
use crate::data::schema::{Value, SCHEMA_SHOWSTART, SCHEMA_XLOG};
use crate::printer::printers::{
    color_level,
    format_header_tsv,
    format_record_json,
    format_record_text,
    format_record_tsv,
    tsv_escape,
    value_to_text,
    Color,
    ColorChoice,
    OutputFormat,
    PrinterRecord,
    COLOR_DEFAULT,
};
use crate::tests::common::record_hello;

use ::test_case::test_case;

// -------------------------------------------------------------------------------------------------

fn record_multiline() -> Record {
    Record::new(
        String::from("12:00"),
        1_700_000_000_123,
        String::from("svc"),
        String::from("E"),
        String::from("db"),
        String::from("pool.rs"),
        String::from("88"),
        None,
        String::from("timed out\n\tretrying"),
        Some(String::from("x y")),
    )
}

// -------------------------------------------------------------------------------------------------

#[test_case("E", Color::Red; "e")]
#[test_case("fatal", Color::Red; "fatal")]
#[test_case(" W ", Color::Yellow; "w_padded")]
#[test_case("Info", Color::Green; "info")]
#[test_case("D", Color::Cyan; "d")]
#[test_case("V", Color::Rgb(128, 128, 128); "v")]
#[test_case("", COLOR_DEFAULT; "empty")]
#[test_case("Q", COLOR_DEFAULT; "unknown")]
fn test_color_level(
    level: &str,
    expect: Color,
) {
    assert_eq!(color_level(level), expect);
}

#[test_case(Value::Null, false, ""; "null")]
#[test_case(Value::Text(String::from("a b")), false, "a b"; "text")]
#[test_case(Value::Blob(b"\xFFz".to_vec()), false, "\u{FFFD}z"; "blob_lossy")]
#[test_case(Value::TimestampMs(1234), false, "1234"; "timestamp")]
#[test_case(Value::TimestampMs(1234), true, "1970-01-01T00:00:01.234Z"; "timestamp_datetime")]
#[test_case(Value::TimestampMs(1_700_000_000_123), true, "2023-11-14T22:13:20.123Z"; "timestamp_datetime_2023")]
#[test_case(Value::TimestampMs(i64::MAX), true, "9223372036854775807"; "timestamp_out_of_range")]
#[test_case(Value::Text(String::from("t")), true, "t"; "text_datetime")]
fn test_value_to_text(
    value: Value,
    datetime: bool,
    expect: &str,
) {
    assert_eq!(value_to_text(&value, datetime), expect);
}

#[test_case("plain", "plain"; "plain")]
#[test_case("a\tb", "a\\tb"; "tab")]
#[test_case("a\nb\r", "a\\nb\\r"; "newlines")]
#[test_case("back\\slash", "back\\\\slash"; "backslash")]
#[test_case("", ""; "empty")]
fn test_tsv_escape(
    text: &str,
    expect: &str,
) {
    assert_eq!(tsv_escape(text), expect);
}

#[test]
fn test_format_header_tsv() {
    assert_eq!(
        format_header_tsv(&SCHEMA_SHOWSTART),
        "time\ttimestamp\tname\tlevel\ttag\tfile\tfunc\tmessage\textra"
    );
    assert_eq!(format_header_tsv(&SCHEMA_XLOG), "time\ttimestamp\tname\tlevel\ttag\tfile\tmessage");
}

#[test]
fn test_format_record_tsv() {
    assert_eq!(
        format_record_tsv(&record_hello(), &SCHEMA_SHOWSTART, false),
        "t\t1234\tn\tL\ttag\tf.5\tfn\thello\t"
    );
    assert_eq!(
        format_record_tsv(&record_multiline(), &SCHEMA_SHOWSTART, true),
        "12:00\t2023-11-14T22:13:20.123Z\tsvc\tE\tdb\tpool.rs.88\t\ttimed out\\n\\tretrying\tx y"
    );
}

#[test]
fn test_format_record_json() {
    let s = format_record_json(&record_hello(), &SCHEMA_SHOWSTART, false);
    assert!(!s.contains('\n'), "{}", s);
    let value: serde_json::Value = serde_json::from_str(&s).unwrap();
    assert_eq!(value["time"], "t");
    assert_eq!(value["timestamp"], 1234);
    assert_eq!(value["file"], "f.5");
    assert_eq!(value["func"], "fn");
    assert_eq!(value["message"], "hello");
    assert!(value["extra"].is_null());
    assert_eq!(value.as_object().unwrap().len(), 9);
}

#[test]
fn test_format_record_json_datetime_multiline() {
    let s = format_record_json(&record_multiline(), &SCHEMA_SHOWSTART, true);
    assert!(!s.contains('\n'), "{}", s);
    let value: serde_json::Value = serde_json::from_str(&s).unwrap();
    assert_eq!(value["timestamp"], "2023-11-14T22:13:20.123Z");
    assert_eq!(value["func"], "");
    assert_eq!(value["message"], "timed out\n\tretrying");
    assert_eq!(value["extra"], "x y");
}

#[test]
fn test_format_record_json_xlog_blob() {
    let s = format_record_json(&record_hello(), &SCHEMA_XLOG, false);
    let value: serde_json::Value = serde_json::from_str(&s).unwrap();
    assert_eq!(value["message"], "hello");
    assert_eq!(value.as_object().unwrap().len(), 7);
    assert!(value.get("func").is_none());
}

#[test_case(false, "t [L] n tag f.5 fn: hello"; "time_text")]
#[test_case(true, "1970-01-01T00:00:01.234Z [L] n tag f.5 fn: hello"; "datetime")]
fn test_format_record_text_hello(
    datetime: bool,
    expect: &str,
) {
    assert_eq!(format_record_text(&record_hello(), datetime), expect);
}

#[test]
fn test_format_record_text_no_func_extra() {
    assert_eq!(
        format_record_text(&record_multiline(), false),
        "12:00 [E] svc db pool.rs.88: timed out\n\tretrying x y"
    );
}

#[test]
fn test_PrinterRecord_tsv() {
    let mut printer = PrinterRecord::new(ColorChoice::Never, OutputFormat::Tsv, &SCHEMA_SHOWSTART, false);
    let header = format_header_tsv(&SCHEMA_SHOWSTART);
    assert_eq!(printer.print_header().unwrap(), header.len() + 1);
    let line = format_record_tsv(&record_hello(), &SCHEMA_SHOWSTART, false);
    assert_eq!(printer.print_record(&record_hello()).unwrap(), line.len() + 1);
    printer.finish().unwrap();
}

#[test]
fn test_PrinterRecord_text_no_header() {
    let mut printer = PrinterRecord::new(ColorChoice::Never, OutputFormat::Text, &SCHEMA_SHOWSTART, false);
    assert_eq!(printer.print_header().unwrap(), 0);
    printer.finish().unwrap();
}
