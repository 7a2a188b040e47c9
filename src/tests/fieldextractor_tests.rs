// src/tests/fieldextractor_tests.rs

//! tests for `fieldextractor.rs`

use crate::data::record::Record;
use crate::data::schema::{SCHEMA_SHOWSTART, SCHEMA_XLOG};
use crate::readers::fieldextractor::{
    parse_timestamp_ms,
    Discard,
    FieldExtractor,
    MissingPrefixPolicy,
    ResultExtract,
    TimestampErrorPolicy,
};
use crate::tests::common::record_hello;

use std::io::ErrorKind;

use ::lazy_static::lazy_static;
use ::test_case::test_case;

// -------------------------------------------------------------------------------------------------

lazy_static! {
    static ref FE_DEFAULT: FieldExtractor = FieldExtractor::new(
        &SCHEMA_SHOWSTART,
        TimestampErrorPolicy::Abort,
        MissingPrefixPolicy::PassThrough,
    );
    static ref FE_LENIENT: FieldExtractor = FieldExtractor::new(
        &SCHEMA_SHOWSTART,
        TimestampErrorPolicy::Skip,
        MissingPrefixPolicy::Discard,
    );
    static ref FE_XLOG: FieldExtractor = FieldExtractor::new(
        &SCHEMA_XLOG,
        TimestampErrorPolicy::Abort,
        MissingPrefixPolicy::PassThrough,
    );
}

/// helper to unwrap a `ResultExtract::Found`
fn extract_found(
    fe: &FieldExtractor,
    rawblock: &str,
) -> Record {
    match fe.extract(rawblock) {
        ResultExtract::Found(record) => record,
        result => panic!("extract({:?}) returned {:?}, expected Found", rawblock, result),
    }
}

// -------------------------------------------------------------------------------------------------

#[test]
fn test_extract_hello() {
    let record = extract_found(&FE_DEFAULT, "t|1234|n|L|tag|f|5|fn|x|message:hello");
    assert_eq!(record, record_hello());
    assert_eq!(record.timestamp_ms(), 1234);
    assert_eq!(record.message(), "hello");
    assert_eq!(record.file(), "f.5");
    assert_eq!(record.func(), Some("fn"));
    assert_eq!(record.extra(), None);
}

#[test_case("a|1|b|c|d|e"; "six_fields")]
#[test_case("a|1|b|c|d|e|f|g|h"; "nine_fields")]
#[test_case(""; "empty")]
fn test_extract_short(rawblock: &str) {
    let expect = rawblock.split('|').count();
    match FE_DEFAULT.extract(rawblock) {
        ResultExtract::Discarded(Discard::Short(n)) => assert_eq!(n, expect),
        result => panic!("expected Short, got {:?}", result),
    }
}

#[test]
fn test_extract_empty_fields_are_positional() {
    let record = extract_found(&FE_DEFAULT, "|7|||||||x|message:");
    assert_eq!(record.time(), "");
    assert_eq!(record.timestamp_ms(), 7);
    assert_eq!(record.name(), "");
    assert_eq!(record.file(), ".");
    assert_eq!(record.func(), Some(""));
    assert_eq!(record.message(), "");
}

#[test_case(" 1234 ", 1234; "padded")]
#[test_case("-5", -5; "negative")]
#[test_case("0", 0; "zero")]
#[test_case("9223372036854775807", i64::MAX; "max")]
fn test_parse_timestamp_ms_ok(
    text: &str,
    expect: i64,
) {
    assert_eq!(parse_timestamp_ms(text), Ok(expect));
}

#[test_case("abc"; "letters")]
#[test_case(""; "empty")]
#[test_case("12.5"; "decimal")]
#[test_case("9223372036854775808"; "overflow")]
fn test_parse_timestamp_ms_err(text: &str) {
    assert!(parse_timestamp_ms(text).is_err());
}

#[test]
fn test_extract_bad_timestamp_abort() {
    match FE_DEFAULT.extract("t|12x4|n|L|tag|f|5|fn|x|message:hello") {
        ResultExtract::Err(err) => {
            assert_eq!(err.kind(), ErrorKind::InvalidData);
            let msg = err.to_string();
            assert!(msg.contains("12x4"), "message {:?}", msg);
        }
        result => panic!("expected Err, got {:?}", result),
    }
}

#[test]
fn test_extract_bad_timestamp_skip() {
    match FE_LENIENT.extract("t|12x4|n|L|tag|f|5|fn|x|message:hello") {
        ResultExtract::Discarded(Discard::BadTimestamp(text)) => assert_eq!(text, "12x4"),
        result => panic!("expected BadTimestamp, got {:?}", result),
    }
}

#[test]
fn test_extract_short_before_timestamp() {
    // arity is checked first
    match FE_DEFAULT.extract("t|bad|n") {
        ResultExtract::Discarded(Discard::Short(3)) => {}
        result => panic!("expected Short(3), got {:?}", result),
    }
}

#[test]
fn test_extract_missing_prefix_passthrough() {
    match FE_DEFAULT.extract("t|1|n|L|tag|f|5|fn|x|hello raw") {
        ResultExtract::FoundRawMessage(record) => assert_eq!(record.message(), "hello raw"),
        result => panic!("expected FoundRawMessage, got {:?}", result),
    }
}

#[test]
fn test_extract_missing_prefix_discard() {
    match FE_LENIENT.extract("t|1|n|L|tag|f|5|fn|x|hello raw") {
        ResultExtract::Discarded(Discard::NoMessagePrefix) => {}
        result => panic!("expected NoMessagePrefix, got {:?}", result),
    }
}

#[test]
fn test_extract_prefix_stripped_once() {
    let record = extract_found(&FE_DEFAULT, "t|1|n|L|tag|f|5|fn|x|message:message:twice");
    assert_eq!(record.message(), "message:twice");
}

#[test_case("t|1|n|L|tag|f|5|fn|x|message:m|a|b", None; "twelve_fields")]
#[test_case("t|1|n|L|tag|f|5|fn|x|message:m|a|b|c", Some("c"); "thirteen_fields")]
#[test_case("t|1|n|L|tag|f|5|fn|x|message:m|a|b|c|d|e", Some("c d e"); "fifteen_fields")]
#[test_case("t|1|n|L|tag|f|5|fn|x|message:m|a|b||", Some(" "); "fourteen_empty")]
fn test_extract_extra(
    rawblock: &str,
    expect: Option<&str>,
) {
    let record = extract_found(&FE_DEFAULT, rawblock);
    assert_eq!(record.message(), "m");
    assert_eq!(record.extra(), expect);
}

#[test]
fn test_extract_multi_line_message() {
    let record = extract_found(&FE_DEFAULT, "t|1|n|L|tag|f|5|fn|x|message:one\ntwo\nthree");
    assert_eq!(record.message(), "one\ntwo\nthree");
}

#[test]
fn test_extract_xlog() {
    let record = extract_found(&FE_XLOG, "t|99|n|W|tag|f.cc|7|message:hi");
    assert_eq!(record.timestamp_ms(), 99);
    assert_eq!(record.level(), "W");
    assert_eq!(record.file(), "f.cc.7");
    assert_eq!(record.func(), None);
    assert_eq!(record.message(), "hi");
    assert_eq!(record.extra(), None);
}

#[test]
fn test_extract_xlog_prefix_not_required() {
    let record = extract_found(&FE_XLOG, "t|99|n|W|tag|f.cc|7|plain text|more");
    assert_eq!(record.message(), "plain text");
}

#[test]
fn test_extract_xlog_short() {
    match FE_XLOG.extract("t|99|n|W|tag|f.cc|7") {
        ResultExtract::Discarded(Discard::Short(7)) => {}
        result => panic!("expected Short(7), got {:?}", result),
    }
}
