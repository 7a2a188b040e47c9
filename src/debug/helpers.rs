// src/debug/helpers.rs

//! Helper functions for writing test fixtures to temporary files.

use crate::common::{FPath, FPaths};
use crate::readers::helpers::path_to_fpath;

use std::fs::{create_dir_all, File};
use std::io::Write; // for `write_all`
use std::path::{Path, PathBuf};

use ::lazy_static::lazy_static;
#[allow(unused_imports)]
use ::si_trace_print::{defo, defñ};

#[doc(hidden)]
pub use ::tempfile::NamedTempFile;
#[doc(hidden)]
pub use ::tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix, for easy
/// cleanup of files left behind by an interrupted test run.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-sslog-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
}

/// Copy the `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    path_to_fpath(ntf.path())
}

/// Write `data` to a new temporary file with file name `suffix`.
pub fn create_temp_file_bytes_with_suffix(
    data: &[u8],
    suffix: &str,
) -> NamedTempFile {
    let mut ntf = match ::tempfile::Builder::new()
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .suffix::<str>(suffix)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::tempfile() returned Err {}", err);
        }
    };
    if let Err(err) = ntf.write_all(data) {
        panic!("NamedTempFile::write_all() returned Err {}", err);
    }
    defñ!("{:?}", ntf.path());

    ntf
}

/// Write `data` to a new temporary file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    create_temp_file_bytes_with_suffix(data.as_bytes(), "")
}

/// Write `data` to a new temporary file.
pub fn create_temp_file_bytes(data: &[u8]) -> NamedTempFile {
    create_temp_file_bytes_with_suffix(data, "")
}

/// Create a temporary directory. It is removed when dropped.
pub fn create_temp_dir() -> TempDir {
    match ::tempfile::Builder::new()
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempdir()
    {
        Ok(val) => val,
        Err(err) => panic!("tempfile::Builder::tempdir() returned Err {}", err),
    }
}

/// Write `data` to the file `name` relative to `tempdir`. Leading
/// directories of `name`, e.g. `foo` of `foo/bar`, are created.
pub fn create_file_in_tmpdir(
    data: &[u8],
    name: &str,
    tempdir: &TempDir,
) -> FPath {
    let path: PathBuf = tempdir.path().join(name);
    if let Some(parent) = path.parent() {
        if let Err(err) = create_dir_all(parent) {
            panic!("create_dir_all({:?}) returned Err {}", parent, err);
        }
    }
    defo!("File::create({:?})", path);
    let mut file = match File::create(&path) {
        Ok(val) => val,
        Err(err) => panic!("File::create({:?}) returned Err {}", path, err),
    };
    if let Err(err) = file.write_all(data) {
        panic!("File::write_all({:?}) returned Err {}", path, err);
    }

    path_to_fpath(&path)
}

/// Create a `TempDir` holding files `(name, data)`. Returns the paths of
/// the files in the same order.
pub fn create_files_and_tmpdir(files: &[(&str, &str)]) -> (TempDir, FPaths) {
    let tempdir = create_temp_dir();
    let fpaths: FPaths = files
        .iter()
        .map(|(name, data)| create_file_in_tmpdir(data.as_bytes(), name, &tempdir))
        .collect();

    (tempdir, fpaths)
}

/// The path of the `TempDir` as a `FPath`.
pub fn tmpdir_fpath(tempdir: &TempDir) -> FPath {
    path_to_fpath(Path::new(tempdir.path()))
}
