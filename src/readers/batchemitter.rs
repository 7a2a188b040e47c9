// src/readers/batchemitter.rs

//! Implements a [`BatchEmitter`], the driver of the whole pipeline:
//! [`FileSequencer`] to [`BlockFramer`] to [`FieldExtractor`] to [`Batch`].
//!
//! [`FileSequencer`]: crate::readers::filesequencer::FileSequencer
//! [`BlockFramer`]: crate::readers::blockframer::BlockFramer
//! [`FieldExtractor`]: crate::readers::fieldextractor::FieldExtractor
//! [`Batch`]: crate::data::batch::Batch

use crate::common::{Count, FPath, FPaths, LineNumber, ResultS3};
use crate::data::batch::{Batch, BATCH_SZ_DEFAULT, BATCH_SZ_MAX, BATCH_SZ_MIN};
use crate::data::record::Record;
use crate::data::schema::{Dialect, Schema};
use crate::de_wrn;
use crate::readers::blockframer::{BlockFramer, ResultFrame};
use crate::readers::fieldextractor::{
    Discard,
    FieldExtractor,
    MissingPrefixPolicy,
    ResultExtract,
    TimestampErrorPolicy,
};
use crate::readers::filesequencer::FileSequencer;
use crate::readers::parsecursor::ParseCursor;
use crate::readers::summary::SummaryScan;

use std::fmt;
use std::io::{Error, ErrorKind, Result};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ScanConfig
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Settings of one scan, fixed at scan construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScanConfig {
    pub dialect: Dialect,
    /// Maximum count of records in a [`Batch`].
    ///
    /// [`Batch`]: crate::data::batch::Batch
    pub batch_size: usize,
    pub timestamp_errors: TimestampErrorPolicy,
    pub missing_message_prefix: MissingPrefixPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            dialect: Dialect::default(),
            batch_size: BATCH_SZ_DEFAULT,
            timestamp_errors: TimestampErrorPolicy::default(),
            missing_message_prefix: MissingPrefixPolicy::default(),
        }
    }
}

impl ScanConfig {
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_timestamp_errors(mut self, policy: TimestampErrorPolicy) -> Self {
        self.timestamp_errors = policy;
        self
    }

    pub fn with_missing_message_prefix(mut self, policy: MissingPrefixPolicy) -> Self {
        self.missing_message_prefix = policy;
        self
    }

    pub fn schema(&self) -> &'static Schema {
        self.dialect.schema()
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if !(BATCH_SZ_MIN..=BATCH_SZ_MAX).contains(&self.batch_size) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "batch size {} is not within {} to {}",
                    self.batch_size, BATCH_SZ_MIN, BATCH_SZ_MAX,
                ),
            ));
        }

        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BatchEmitter
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Pulls lines from a [`FileSequencer`] through a [`BlockFramer`] and a
/// [`FieldExtractor`], and packs the resulting [`Record`s] into [`Batch`]es.
///
/// Single-threaded and pull-based; each call to [`next_batch`] reads files
/// on the caller's thread until a `Batch` is full or all files are
/// exhausted. A file ending does not end a `Batch`.
///
/// Dropping a `BatchEmitter` closes any open file.
///
/// [`FileSequencer`]: crate::readers::filesequencer::FileSequencer
/// [`BlockFramer`]: crate::readers::blockframer::BlockFramer
/// [`FieldExtractor`]: crate::readers::fieldextractor::FieldExtractor
/// [`Record`s]: crate::data::record::Record
/// [`Batch`]: crate::data::batch::Batch
/// [`next_batch`]: BatchEmitter::next_batch
pub struct BatchEmitter {
    config: ScanConfig,
    sequencer: FileSequencer,
    framer: BlockFramer,
    extractor: FieldExtractor,
    cursor: ParseCursor,
    summary: SummaryScan,
    /// A prior call returned a fatal error.
    aborted: bool,
}

impl fmt::Debug for BatchEmitter {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("BatchEmitter")
            .field("config", &self.config)
            .field("sequencer", &self.sequencer)
            .field("cursor", &self.cursor)
            .field("aborted", &self.aborted)
            .finish()
    }
}

impl BatchEmitter {
    /// Create a `BatchEmitter` over `paths`, in order. No file is opened
    /// until the first call to [`next_batch`].
    ///
    /// [`next_batch`]: BatchEmitter::next_batch
    pub fn new(
        paths: FPaths,
        config: ScanConfig,
    ) -> Result<BatchEmitter> {
        defñ!("({} paths, {:?})", paths.len(), config);
        config.validate()?;
        let schema: &'static Schema = config.schema();
        let summary = SummaryScan::new(config.dialect, paths.len() as Count);

        Ok(BatchEmitter {
            config,
            sequencer: FileSequencer::new(paths),
            framer: BlockFramer::new(schema),
            extractor: FieldExtractor::new(schema, config.timestamp_errors, config.missing_message_prefix),
            cursor: ParseCursor::new(),
            summary,
            aborted: false,
        })
    }

    /// Create a `BatchEmitter` that continues a scan from a [`ParseCursor`]
    /// previously taken with [`cursor`] from a scan over the same `paths`
    /// with the same `config`.
    ///
    /// [`ParseCursor`]: crate::readers::parsecursor::ParseCursor
    /// [`cursor`]: BatchEmitter::cursor
    pub fn resume(
        paths: FPaths,
        config: ScanConfig,
        cursor: ParseCursor,
    ) -> Result<BatchEmitter> {
        defn!("({:?})", cursor);
        let mut emitter = BatchEmitter::new(paths, config)?;
        if cursor.finished {
            emitter.sequencer.close();
            emitter.cursor = cursor;
            defx!("finished");
            return Ok(emitter);
        }
        emitter
            .sequencer
            .open_at(cursor.file_index, cursor.fileoffset, cursor.line_number)?;
        if cursor.framer.in_block() {
            emitter.summary.blocks_resumed += 1;
        }
        emitter.summary.files_opened = emitter.sequencer.count_files_opened();
        emitter.cursor = cursor;
        defx!();

        Ok(emitter)
    }

    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub const fn schema(&self) -> &'static Schema {
        self.framer.schema()
    }

    /// A snapshot of the scan position and partial state.
    pub fn cursor(&self) -> ParseCursor {
        self.cursor.clone()
    }

    /// All files are exhausted; [`next_batch`] returns only empty batches.
    ///
    /// [`next_batch`]: BatchEmitter::next_batch
    pub const fn is_finished(&self) -> bool {
        self.cursor.finished
    }

    /// Statistics of the scan so far.
    pub fn summary(&self) -> SummaryScan {
        let mut summary = self.summary.clone();
        summary.files_opened = self.sequencer.count_files_opened();
        summary.bytes = self.sequencer.count_bytes();
        summary.debug_check();

        summary
    }

    /// Path of the file being read, or most recently read.
    pub fn current_path(&self) -> Option<&FPath> {
        self.sequencer.current_path()
    }

    /// Stop the scan with `err`. Closes the open file.
    fn abort(&mut self, err: Error) -> Error {
        defñ!("{}", err);
        self.aborted = true;
        self.sequencer.close();
        if self.summary.error.is_none() {
            self.summary.error = Some(err.to_string());
        }

        err
    }

    /// Handle one closed raw block. Returns a `Record` to emit, if any.
    fn process_rawblock(
        &mut self,
        rawblock: &str,
        line_number: LineNumber,
    ) -> Result<Option<Record>> {
        self.summary.blocks_closed += 1;
        match self.extractor.extract(rawblock) {
            ResultExtract::Found(record) => Ok(Some(record)),
            ResultExtract::FoundRawMessage(record) => {
                de_wrn!(
                    "message field lacks {:?} at {:?} line {}",
                    self.schema().message_prefix,
                    self.current_path(),
                    line_number
                );
                self.summary.message_prefix_missing += 1;
                Ok(Some(record))
            }
            ResultExtract::Discarded(discard) => {
                defo!("discarded {:?} line {}", discard, line_number);
                match discard {
                    Discard::Short(_) => self.summary.blocks_short += 1,
                    Discard::BadTimestamp(_text) => {
                        de_wrn!(
                            "skipped invalid timestamp {:?} at {:?} line {}",
                            _text,
                            self.current_path(),
                            line_number
                        );
                        self.summary.timestamps_skipped += 1;
                    }
                    Discard::NoMessagePrefix => {
                        de_wrn!(
                            "discarded block without {:?} at {:?} line {}",
                            self.schema().message_prefix,
                            self.current_path(),
                            line_number
                        );
                        self.summary.message_prefix_discarded += 1;
                    }
                }
                Ok(None)
            }
            ResultExtract::Err(err) => {
                let path: &str = self
                    .current_path()
                    .map_or("", |p| p.as_str());
                Err(Error::new(
                    err.kind(),
                    format!("{} in file {:?} at line {}", err, path, line_number),
                ))
            }
        }
    }

    /// Return the next [`Batch`] of at most `config.batch_size` records.
    ///
    /// A `Batch` with fewer records than its capacity is returned only when
    /// all files are exhausted; every call after that returns an empty
    /// `Batch`.
    ///
    /// An `Err` is fatal: the open file is closed and every later call
    /// returns an `Err`.
    ///
    /// [`Batch`]: crate::data::batch::Batch
    pub fn next_batch(&mut self) -> Result<Batch> {
        defn!();
        if self.aborted {
            defx!("aborted");
            return Err(Error::new(ErrorKind::Other, "scan aborted by a prior error"));
        }
        let mut batch = Batch::new(self.config.batch_size);
        while !batch.is_full() && !self.cursor.finished {
            let (line_number, line) = match self.sequencer.next_line() {
                ResultS3::Found(found) => found,
                ResultS3::Done => {
                    // current file exhausted, or no file opened yet
                    match self.sequencer.open_next() {
                        Ok(true) => {
                            self.cursor.next_file(self.sequencer.file_index());
                        }
                        Ok(false) => {
                            if self.framer.abandon(&mut self.cursor.framer) {
                                de_wrn!("block not terminated at end of {:?}", self.current_path());
                                self.summary.blocks_abandoned += 1;
                            }
                            self.cursor.finished = true;
                            defo!("finished");
                        }
                        Err(err) => {
                            return Err(self.abort(err));
                        }
                    }
                    continue;
                }
                ResultS3::Err(err) => {
                    return Err(self.abort(err));
                }
            };
            self.cursor.line_number = line_number;
            self.cursor.fileoffset = self.sequencer.fileoffset();
            self.summary.lines += 1;

            match self.framer.frame_line(&mut self.cursor.framer, &line) {
                ResultFrame::Ignored => {
                    self.summary.lines_ignored += 1;
                }
                ResultFrame::Continued => {}
                ResultFrame::Started(abandoned) => {
                    self.summary.blocks_started += 1;
                    if abandoned {
                        self.summary.blocks_abandoned += 1;
                    }
                }
                ResultFrame::Closed(rawblock, abandoned) => {
                    if abandoned {
                        self.summary.blocks_abandoned += 1;
                    }
                    if line.starts_with(self.schema().sentinel) {
                        self.summary.blocks_started += 1;
                    }
                    match self.process_rawblock(&rawblock, line_number) {
                        Ok(Some(record)) => {
                            self.summary.records += 1;
                            batch.push(record);
                        }
                        Ok(None) => {}
                        Err(err) => {
                            return Err(self.abort(err));
                        }
                    }
                }
            }
        }
        if !batch.is_empty() {
            self.summary.batches += 1;
        }
        defx!("return Batch len {}", batch.len());

        Ok(batch)
    }
}
