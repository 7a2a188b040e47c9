// src/tests/filepreprocessor_tests.rs

//! tests for `filepreprocessor.rs`

use crate::common::{FPath, FPaths};
use crate::data::schema::Dialect;
use crate::debug::helpers::{create_files_and_tmpdir, tmpdir_fpath};
use crate::readers::filepreprocessor::{
    dialect_accepts_filename,
    glob_pattern,
    is_glob,
    process_path,
    valid_paths,
    ProcessPathResult,
};
use crate::readers::helpers::basename;

use std::path::MAIN_SEPARATOR;

use ::test_case::test_case;

// -------------------------------------------------------------------------------------------------

/// file names of the `FileValid` results
fn valid_names(results: &[ProcessPathResult]) -> Vec<FPath> {
    valid_paths(results)
        .iter()
        .map(basename)
        .collect()
}

fn join(
    dir: &FPath,
    name: &str,
) -> FPath {
    format!("{}{}{}", dir, MAIN_SEPARATOR, name)
}

const FILES: &[(&str, &str)] = &[
    ("b.log", "b"),
    ("a.xlog.log", "a"),
    ("c.XLOG.LOG", "c"),
    ("sub/d.log", "d"),
    ("sub/e.xlog.log", "e"),
    ("a1.txt", "a1"),
];

// -------------------------------------------------------------------------------------------------

#[test_case("*.log", "a.log", true; "star_match")]
#[test_case("*.log", "a.log.1", false; "star_anchored")]
#[test_case("*", "", true; "star_empty")]
#[test_case("a?.log", "a1.log", true; "question")]
#[test_case("a?.log", "a.log", false; "question_needs_one")]
#[test_case("a[12].log", "a2.log", true; "class")]
#[test_case("a[12].log", "a3.log", false; "class_miss")]
#[test_case("a[!12].log", "a3.log", true; "class_negated")]
#[test_case("a[!12].log", "a1.log", false; "class_negated_miss")]
#[test_case("a[0-9].log", "a7.log", true; "class_range")]
#[test_case("a[[].log", "a[.log", true; "bracket_escaped")]
#[test_case("a.log", "aXlog", false; "dot_literal")]
#[test_case("(x)+.log", "(x)+.log", true; "regex_chars_literal")]
#[test_case("ä*.log", "äb.log", true; "unicode")]
#[test_case("*.LOG", "a.log", false; "case_sensitive")]
fn test_glob_pattern(
    pattern: &str,
    name: &str,
    expect: bool,
) {
    let glob = match glob_pattern(pattern) {
        Some(val) => val,
        None => panic!("glob_pattern({:?}) returned None", pattern),
    };
    assert_eq!(glob.matches(name), expect, "pattern {:?} name {:?}", pattern, name);
}

#[test_case("a[.log"; "unclosed_bracket")]
#[test_case("[]"; "empty_class")]
fn test_glob_pattern_malformed(pattern: &str) {
    assert!(glob_pattern(pattern).is_none());
}

#[test_case("*.log", true; "star")]
#[test_case("a?", true; "question")]
#[test_case("[ab]", true; "bracket")]
#[test_case("a]", true; "close_bracket")]
#[test_case("a.log", false; "plain")]
#[test_case("", false; "empty")]
fn test_is_glob(
    name: &str,
    expect: bool,
) {
    assert_eq!(is_glob(name), expect);
}

#[test_case(Dialect::ShowStart, "a.log", true; "showstart_any")]
#[test_case(Dialect::ShowStart, "a.txt", true; "showstart_txt")]
#[test_case(Dialect::Xlog, "a.xlog.log", true; "xlog_suffix")]
#[test_case(Dialect::Xlog, "A.XLOG.LOG", true; "xlog_suffix_case")]
#[test_case(Dialect::Xlog, ".xlog.log", true; "xlog_only_suffix")]
#[test_case(Dialect::Xlog, "a.log", false; "xlog_plain_log")]
#[test_case(Dialect::Xlog, "a.xlog.log.1", false; "xlog_rotated")]
#[test_case(Dialect::Xlog, "ü.log", false; "xlog_short_unicode")]
fn test_dialect_accepts_filename(
    dialect: Dialect,
    name: &str,
    expect: bool,
) {
    assert_eq!(dialect_accepts_filename(dialect, name), expect);
}

// -------------------------------------------------------------------------------------------------

#[test]
fn test_process_path_file() {
    let (_tmpdir, paths) = create_files_and_tmpdir(&[("x.txt", "")]);
    let results = process_path(&paths[0], Dialect::Xlog);
    // a user-passed file is always attempted
    assert_eq!(results, vec![ProcessPathResult::FileValid(paths[0].clone())]);
}

#[test]
fn test_process_path_dir_showstart() {
    let (tmpdir, _paths) = create_files_and_tmpdir(FILES);
    let results = process_path(&tmpdir_fpath(&tmpdir), Dialect::ShowStart);
    // sorted by file name per directory, byte order
    assert_eq!(
        valid_names(&results),
        vec!["a.xlog.log", "a1.txt", "b.log", "c.XLOG.LOG", "d.log", "e.xlog.log"]
    );
}

#[test]
fn test_process_path_dir_xlog() {
    let (tmpdir, _paths) = create_files_and_tmpdir(FILES);
    let results = process_path(&tmpdir_fpath(&tmpdir), Dialect::Xlog);
    assert_eq!(valid_names(&results), vec!["a.xlog.log", "c.XLOG.LOG", "e.xlog.log"]);
}

#[test]
fn test_process_path_dir_empty() {
    let (tmpdir, _paths) = create_files_and_tmpdir(&[]);
    let results = process_path(&tmpdir_fpath(&tmpdir), Dialect::ShowStart);
    assert!(results.is_empty());
}

#[test]
fn test_process_path_glob() {
    let (tmpdir, _paths) = create_files_and_tmpdir(FILES);
    let pattern = join(&tmpdir_fpath(&tmpdir), "*.log");
    let results = process_path(&pattern, Dialect::ShowStart);
    // not recursive, exact case
    assert_eq!(valid_names(&results), vec!["a.xlog.log", "b.log"]);
}

#[test]
fn test_process_path_glob_class() {
    let (tmpdir, _paths) = create_files_and_tmpdir(FILES);
    let pattern = join(&tmpdir_fpath(&tmpdir), "[ab]*");
    let results = process_path(&pattern, Dialect::Xlog);
    // the dialect does not filter a glob
    assert_eq!(valid_names(&results), vec!["a.xlog.log", "a1.txt", "b.log"]);
}

#[test]
fn test_process_path_glob_matches_nothing() {
    let (tmpdir, _paths) = create_files_and_tmpdir(FILES);
    let pattern = join(&tmpdir_fpath(&tmpdir), "*.nothing");
    let results = process_path(&pattern, Dialect::ShowStart);
    assert!(results.is_empty());
}

#[test]
fn test_process_path_glob_malformed() {
    let (tmpdir, _paths) = create_files_and_tmpdir(FILES);
    let pattern = join(&tmpdir_fpath(&tmpdir), "b[.log");
    let results = process_path(&pattern, Dialect::ShowStart);
    assert_eq!(results, vec![ProcessPathResult::FileErrNotExist(pattern.clone())]);
}

#[test]
fn test_process_path_not_exist() {
    let (tmpdir, _paths) = create_files_and_tmpdir(&[]);
    let path = join(&tmpdir_fpath(&tmpdir), "missing.log");
    let results = process_path(&path, Dialect::ShowStart);
    assert_eq!(results, vec![ProcessPathResult::FileErrNotExist(path.clone())]);
    assert_eq!(valid_paths(&results), FPaths::new());
}

#[test]
fn test_valid_paths_order() {
    let results = vec![
        ProcessPathResult::FileValid(FPath::from("z")),
        ProcessPathResult::FileErrNotAFile(FPath::from("y")),
        ProcessPathResult::FileValid(FPath::from("a")),
    ];
    assert_eq!(valid_paths(&results), vec![FPath::from("z"), FPath::from("a")]);
}
