// src/readers/filesequencer.rs

//! Implements a [`FileSequencer`], the driver of opening each file of a scan
//! in turn with a [`LineReader`].
//!
//! [`LineReader`]: crate::readers::linereader::LineReader

use crate::common::{Count, FPath, FPaths, FileOffset, LineNumber, ResultS3};
use crate::readers::linereader::{LineReader, ResultS3LineFind};

use std::fmt;
use std::io::Result;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Owns the ordered list of input files and the one open [`LineReader`].
///
/// Files are opened lazily, one at a time, by [`open_next`]. The open file is
/// closed when it is exhausted, when the next file is opened, or when the
/// `FileSequencer` is dropped.
///
/// [`LineReader`]: crate::readers::linereader::LineReader
/// [`open_next`]: FileSequencer::open_next
pub struct FileSequencer {
    paths: FPaths,
    /// Index into `paths` of the next file to open.
    file_index: usize,
    linereader: Option<LineReader>,
    /// `open_next` found no more files.
    finished: bool,
    /// `Count` of files opened.
    files_opened: Count,
    /// Bytes consumed of files already closed.
    bytes_closed: FileOffset,
}

impl fmt::Debug for FileSequencer {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("FileSequencer")
            .field("paths", &self.paths.len())
            .field("file_index", &self.file_index)
            .field("linereader", &self.linereader)
            .field("finished", &self.finished)
            .finish()
    }
}

impl FileSequencer {
    pub fn new(paths: FPaths) -> FileSequencer {
        defñ!("({} paths)", paths.len());
        FileSequencer {
            paths,
            file_index: 0,
            linereader: None,
            finished: false,
            files_opened: 0,
            bytes_closed: 0,
        }
    }

    pub fn paths(&self) -> &[FPath] {
        self.paths.as_slice()
    }

    /// Count of files opened so far. The open file, if any, is
    /// `paths()[file_index() - 1]`.
    pub const fn file_index(&self) -> usize {
        self.file_index
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    pub const fn is_open(&self) -> bool {
        self.linereader.is_some()
    }

    pub const fn count_files_opened(&self) -> Count {
        self.files_opened
    }

    /// Bytes consumed across all files so far. A file opened with
    /// [`open_at`] counts from the beginning of the file.
    ///
    /// [`open_at`]: FileSequencer::open_at
    pub fn count_bytes(&self) -> FileOffset {
        self.bytes_closed + self.fileoffset()
    }

    /// Path of the open file, or else the most recently opened file.
    pub fn current_path(&self) -> Option<&FPath> {
        match self.file_index {
            0 => None,
            i => self.paths.get(i - 1),
        }
    }

    /// Physical line number of the last line read from the open file.
    pub fn line_number(&self) -> LineNumber {
        match &self.linereader {
            Some(lr) => lr.line_number(),
            None => 0,
        }
    }

    /// Byte offset just past the last line read from the open file.
    pub fn fileoffset(&self) -> FileOffset {
        match &self.linereader {
            Some(lr) => lr.fileoffset(),
            None => 0,
        }
    }

    /// Close the open file, if any.
    pub fn close(&mut self) {
        if let Some(lr) = self.linereader.take() {
            defñ!("close {:?}", lr.path());
            self.bytes_closed += lr.fileoffset();
        }
    }

    /// Close the open file, if any, and open the next file.
    ///
    /// Returns `Ok(false)` and becomes finished if there are no more files.
    /// Returns `Err` if the next file cannot be opened; the error names the
    /// path.
    pub fn open_next(&mut self) -> Result<bool> {
        defn!("file_index {}", self.file_index);
        self.close();
        if self.file_index >= self.paths.len() {
            self.finished = true;
            defx!("finished");
            return Ok(false);
        }
        let path: FPath = self.paths[self.file_index].clone();
        self.file_index += 1;
        self.linereader = Some(LineReader::new(path)?);
        self.files_opened += 1;
        defx!("opened {:?}", self.current_path());

        Ok(true)
    }

    /// Open `paths[file_index - 1]` at `fileoffset`, continuing line
    /// numbering from `line_number`. For resuming a scan.
    pub fn open_at(
        &mut self,
        file_index: usize,
        fileoffset: FileOffset,
        line_number: LineNumber,
    ) -> Result<bool> {
        defn!("({}, {}, {})", file_index, fileoffset, line_number);
        self.close();
        if file_index == 0 || file_index > self.paths.len() {
            self.file_index = std::cmp::min(file_index, self.paths.len());
            defx!("no file at index {}", file_index);
            return Ok(false);
        }
        self.file_index = file_index;
        let path: FPath = self.paths[file_index - 1].clone();
        self.linereader = Some(LineReader::open_at(path, fileoffset, line_number)?);
        self.files_opened += 1;
        defx!();

        Ok(true)
    }

    /// Next trimmed, non-empty line of the open file.
    ///
    /// Returns `Done` if no file is open or the open file is exhausted; an
    /// exhausted file is closed.
    pub fn next_line(&mut self) -> ResultS3LineFind {
        let linereader: &mut LineReader = match self.linereader.as_mut() {
            Some(val) => val,
            None => return ResultS3::Done,
        };
        match linereader.next_line() {
            ResultS3::Found(found) => ResultS3::Found(found),
            ResultS3::Done => {
                self.close();
                ResultS3::Done
            }
            ResultS3::Err(err) => {
                self.close();
                ResultS3::Err(err)
            }
        }
    }
}
