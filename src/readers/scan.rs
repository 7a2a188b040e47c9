// src/readers/scan.rs

//! The host integration surface: [`bind`] a path pattern to get the output
//! [`Column`s] and a [`ShowStartScan`], then pull [`Batch`es] with
//! [`ShowStartScan::next_batch`].
//!
//! [`Column`s]: crate::data::schema::Column
//! [`Batch`es]: crate::data::batch::Batch

use crate::common::{FPath, FPaths};
use crate::data::batch::Batch;
use crate::data::schema::{Column, Schema};
use crate::readers::batchemitter::{BatchEmitter, ScanConfig};
use crate::readers::filepreprocessor::{process_path, valid_paths, ProcessPathResult, ProcessPathResults};
use crate::readers::parsecursor::ParseCursor;
use crate::readers::summary::SummaryScan;

use std::io::{Error, ErrorKind, Result};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// An opaque handle on one scan, returned by [`bind`].
///
/// Dropping a `ShowStartScan` closes any open file.
#[derive(Debug)]
pub struct ShowStartScan {
    emitter: BatchEmitter,
}

impl ShowStartScan {
    /// Create a scan over already expanded `paths`, in order.
    pub fn from_paths(
        paths: FPaths,
        config: ScanConfig,
    ) -> Result<ShowStartScan> {
        Ok(ShowStartScan {
            emitter: BatchEmitter::new(paths, config)?,
        })
    }

    /// Continue a scan over the same `paths` from a [`ParseCursor`].
    ///
    /// [`ParseCursor`]: crate::readers::parsecursor::ParseCursor
    pub fn resume(
        paths: FPaths,
        config: ScanConfig,
        cursor: ParseCursor,
    ) -> Result<ShowStartScan> {
        Ok(ShowStartScan {
            emitter: BatchEmitter::resume(paths, config, cursor)?,
        })
    }

    /// The next [`Batch`]. An empty `Batch` signals the end of the scan.
    ///
    /// [`Batch`]: crate::data::batch::Batch
    pub fn next_batch(&mut self) -> Result<Batch> {
        self.emitter.next_batch()
    }

    pub fn schema(&self) -> &'static Schema {
        self.emitter.schema()
    }

    pub fn columns(&self) -> &'static [Column] {
        self.emitter.schema().columns
    }

    pub fn cursor(&self) -> ParseCursor {
        self.emitter.cursor()
    }

    pub fn summary(&self) -> SummaryScan {
        self.emitter.summary()
    }

    pub fn is_finished(&self) -> bool {
        self.emitter.is_finished()
    }
}

/// Expand each of `paths` with [`process_path`] into one ordered list of
/// files.
///
/// Fails with `ErrorKind::NotFound` for a path that does not exist and is
/// not a glob pattern.
///
/// [`process_path`]: crate::readers::filepreprocessor::process_path
pub fn expand_paths(
    paths: &[FPath],
    config: &ScanConfig,
) -> Result<FPaths> {
    defn!("({:?})", paths);
    let mut results = ProcessPathResults::new();
    for path in paths.iter() {
        for result in process_path(path, config.dialect) {
            match result {
                ProcessPathResult::FileErrNotExist(path_) => {
                    defx!("NotFound {:?}", path_);
                    return Err(Error::new(
                        ErrorKind::NotFound,
                        format!("No such file or directory {:?}", path_),
                    ));
                }
                ProcessPathResult::FileErrNotAFile(_path) => {
                    defo!("not a file {:?}", _path);
                }
                result => results.push(result),
            }
        }
    }
    let fpaths = valid_paths(&results);
    defx!("return {} paths", fpaths.len());

    Ok(fpaths)
}

/// Bind the file, directory, or glob pattern `path` to a new scan.
///
/// Returns the output [`Column`s] of the configured dialect and the scan
/// handle. No file is opened until the first [`ShowStartScan::next_batch`].
///
/// [`Column`s]: crate::data::schema::Column
pub fn bind(
    path: &FPath,
    config: ScanConfig,
) -> Result<(&'static [Column], ShowStartScan)> {
    defn!("({:?}, {:?})", path, config);
    config.validate()?;
    let paths: FPaths = expand_paths(std::slice::from_ref(path), &config)?;
    let scan = ShowStartScan::from_paths(paths, config)?;
    defx!();

    Ok((scan.columns(), scan))
}
