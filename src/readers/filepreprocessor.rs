// src/readers/filepreprocessor.rs

//! A collection of functions to expand user-passed paths into the ordered
//! list of files a [`BatchEmitter`] will scan.
//!
//! [`BatchEmitter`]: crate::readers::batchemitter::BatchEmitter

use crate::common::{FPath, FPaths};
use crate::data::schema::Dialect;
use crate::readers::helpers::{basename, fpath_to_path, path_to_fpath};

use std::path::Path;

use ::glob::Pattern;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FilePreProcessor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Initial path processing return type.
#[derive(Debug, Eq, PartialEq)]
pub enum ProcessPathResult {
    /// File can be scanned
    FileValid(FPath),
    /// Path exists and is not a file nor a directory
    FileErrNotAFile(FPath),
    /// Path does not exist and is not a glob pattern
    FileErrNotExist(FPath),
}

pub type ProcessPathResults = Vec<ProcessPathResult>;

/// File name suffix of files found in a directory for [`Dialect::Xlog`].
///
/// [`Dialect::Xlog`]: crate::data::schema::Dialect
pub const XLOG_FILENAME_SUFFIX: &str = ".xlog.log";

/// Does the file name `name` contain glob pattern characters?
pub fn is_glob(name: &str) -> bool {
    Pattern::escape(name) != name
}

/// Compile a glob pattern for one file name.
///
/// `*` matches any run of characters, `?` matches one character,
/// `[abc]` and `[!abc]` match a class. Returns `None` for a malformed
/// pattern such as an unclosed `[`.
pub fn glob_pattern(pattern: &str) -> Option<Pattern> {
    match Pattern::new(pattern) {
        Ok(val) => Some(val),
        Err(_err) => {
            defñ!("Pattern::new({:?}) Err {}", pattern, _err);
            None
        }
    }
}

/// Should a file found while walking a directory be scanned?
pub fn dialect_accepts_filename(
    dialect: Dialect,
    file_name: &str,
) -> bool {
    match dialect {
        Dialect::ShowStart => true,
        Dialect::Xlog => {
            let len = file_name.len();
            let suffix_len = XLOG_FILENAME_SUFFIX.len();
            len >= suffix_len
                && file_name.is_char_boundary(len - suffix_len)
                && file_name[len - suffix_len..].eq_ignore_ascii_case(XLOG_FILENAME_SUFFIX)
        }
    }
}

/// Return every file in the directory `path`, recursively, sorted by file
/// name.
fn process_path_dir(
    path: &FPath,
    dialect: Dialect,
) -> ProcessPathResults {
    defn!("({:?}, {:?})", path, dialect);
    let mut results = ProcessPathResults::new();
    for entry in walkdir::WalkDir::new(path.as_str())
        .follow_links(true)
        .sort_by_file_name()
    {
        let path_entry = match entry {
            Ok(val) => val,
            Err(_err) => {
                defo!("Err({:?})", _err);
                continue;
            }
        };
        let fpath_entry: FPath = path_to_fpath(path_entry.path());
        if path_entry.file_type().is_dir() {
            continue;
        }
        if !path_entry.file_type().is_file() {
            defo!("not a file {:?}", fpath_entry);
            results.push(ProcessPathResult::FileErrNotAFile(fpath_entry));
            continue;
        }
        let file_name = path_entry.file_name().to_string_lossy();
        if !dialect_accepts_filename(dialect, &file_name) {
            defo!("skip {:?}", fpath_entry);
            continue;
        }
        results.push(ProcessPathResult::FileValid(fpath_entry));
    }
    defx!("return {} results", results.len());

    results
}

/// Return every file in the parent directory of `path` with a name
/// matching the glob pattern of the last component of `path`, sorted by
/// file name. Not recursive.
fn process_path_glob(path: &FPath) -> ProcessPathResults {
    defn!("({:?})", path);
    let std_path: &Path = fpath_to_path(path);
    let pattern: FPath = basename(path);
    let glob: Pattern = match glob_pattern(pattern.as_str()) {
        Some(val) => val,
        None => {
            defx!("bad pattern {:?}", pattern);
            return vec![ProcessPathResult::FileErrNotExist(path.clone())];
        }
    };
    let parent: &Path = match std_path.parent() {
        Some(val) if !val.as_os_str().is_empty() => val,
        _ => Path::new("."),
    };
    let mut results = ProcessPathResults::new();
    for entry in walkdir::WalkDir::new(parent)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let path_entry = match entry {
            Ok(val) => val,
            Err(_err) => {
                defo!("Err({:?})", _err);
                continue;
            }
        };
        if !path_entry.file_type().is_file() {
            continue;
        }
        let file_name = path_entry.file_name().to_string_lossy();
        if glob.matches(&file_name) {
            results.push(ProcessPathResult::FileValid(path_to_fpath(path_entry.path())));
        }
    }
    defx!("return {} results", results.len());

    results
}

/// Return all scannable files for the user-passed `path`.
///
/// Given a plain file path, returns that path; a user-passed file is always
/// attempted.<br/>
/// Given a directory, recurses the directory. For [`Dialect::Xlog`] only
/// files named `*.xlog.log` are kept.<br/>
/// Given a path whose file name is a glob pattern, returns the matching
/// files in the parent directory. Matching nothing is not an error.
///
/// [`Dialect::Xlog`]: crate::data::schema::Dialect
pub fn process_path(
    path: &FPath,
    dialect: Dialect,
) -> ProcessPathResults {
    defn!("({:?}, {:?})", path, dialect);
    let std_path: &Path = fpath_to_path(path);
    if std_path.is_file() {
        defx!("FileValid({:?})", path);
        return vec![ProcessPathResult::FileValid(path.clone())];
    }
    if std_path.is_dir() {
        defx!("directory");
        return process_path_dir(path, dialect);
    }
    if std_path.exists() {
        defx!("FileErrNotAFile({:?})", path);
        return vec![ProcessPathResult::FileErrNotAFile(path.clone())];
    }
    if is_glob(basename(path).as_str()) {
        defx!("glob");
        return process_path_glob(path);
    }
    defx!("FileErrNotExist({:?})", path);

    vec![ProcessPathResult::FileErrNotExist(path.clone())]
}

/// The `FileValid` paths of `results`, in order.
pub fn valid_paths(results: &[ProcessPathResult]) -> FPaths {
    results
        .iter()
        .filter_map(|result| match result {
            ProcessPathResult::FileValid(path) => Some(path.clone()),
            _ => None,
        })
        .collect()
}
