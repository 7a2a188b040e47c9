// src/readers/linereader.rs

//! Implements a [`LineReader`],
//! the driver of deriving trimmed, non-empty lines from one file.

use crate::common::{
    CRu8,
    Count,
    FPath,
    FileOffset,
    LineNumber,
    NLu8,
    ResultS3,
};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind, Result, Seek, SeekFrom};

use ::bstr::ByteSlice;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LineReader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A line found by [`LineReader::next_line`]; the physical line number and
/// the trimmed text.
pub type LineFound = (LineNumber, String);

/// [`LineReader::next_line`] result.
pub type ResultS3LineFind = ResultS3<LineFound, Error>;

/// Size of the `BufReader` buffer in bytes.
pub const LINEREADER_BUFSZ: usize = 0x10000;

/// A specialized reader that yields the trimmed, non-empty lines of one file,
/// in order.
///
/// A line ends at `'\n'`, at `'\r'`, or at the end of the file. Bytes that
/// are not valid UTF-8 are replaced with `U+FFFD`.
///
/// The file is opened in [`LineReader::new`] and closed when the
/// `LineReader` is dropped.
///
/// _XXX: not a rust "Reader"; does not implement trait [`Read`]._
///
/// [`Read`]: std::io::Read
pub struct LineReader {
    path: FPath,
    reader: BufReader<File>,
    /// Reusable read buffer.
    buffer: Vec<u8>,
    /// Lines already split from `buffer` by a `'\r'`, not yet returned.
    /// Each with the file offset just past it.
    pending: VecDeque<(Vec<u8>, FileOffset)>,
    /// Count of physical lines passed, including empty lines.
    line_number: LineNumber,
    /// Offset just past the last returned line.
    fileoffset: FileOffset,
    /// Offset just past the last byte read from `reader`.
    fileoffset_read: FileOffset,
    /// `Count` of non-empty lines returned.
    lines_returned: Count,
    eof: bool,
}

impl fmt::Debug for LineReader {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LineReader")
            .field("path", &self.path)
            .field("line_number", &self.line_number)
            .field("fileoffset", &self.fileoffset)
            .field("pending", &self.pending.len())
            .field("lines_returned", &self.lines_returned)
            .field("eof", &self.eof)
            .finish()
    }
}

impl LineReader {
    /// Open the file at `path` for reading from the beginning.
    pub fn new(path: FPath) -> Result<LineReader> {
        LineReader::open_at(path, 0, 0)
    }

    /// Open the file at `path` for reading from byte `fileoffset`.
    ///
    /// `line_number` is the count of physical lines before `fileoffset`;
    /// it continues the numbering of a prior `LineReader`.
    pub fn open_at(
        path: FPath,
        fileoffset: FileOffset,
        line_number: LineNumber,
    ) -> Result<LineReader> {
        defn!("({:?}, {}, {})", path, fileoffset, line_number);
        let mut file: File = match File::open(&path) {
            Ok(val) => val,
            Err(err) => {
                defx!("File::open({:?}) error {}", path, err);
                return Err(Error::new(err.kind(), format!("Could not open file {:?}: {}", path, err)));
            }
        };
        if fileoffset != 0 {
            let at = file.seek(SeekFrom::Start(fileoffset))?;
            if at != fileoffset {
                defx!("seek to {} landed at {}", fileoffset, at);
                return Err(Error::new(
                    ErrorKind::UnexpectedEof,
                    format!("Could not seek to offset {} in file {:?}", fileoffset, path),
                ));
            }
        }
        defx!();

        Ok(LineReader {
            path,
            reader: BufReader::with_capacity(LINEREADER_BUFSZ, file),
            buffer: Vec::<u8>::with_capacity(256),
            pending: VecDeque::new(),
            line_number,
            fileoffset,
            fileoffset_read: fileoffset,
            lines_returned: 0,
            eof: false,
        })
    }

    pub const fn path(&self) -> &FPath {
        &self.path
    }

    /// Physical line number of the last returned line.
    pub const fn line_number(&self) -> LineNumber {
        self.line_number
    }

    /// File offset just past the last returned line.
    pub const fn fileoffset(&self) -> FileOffset {
        self.fileoffset
    }

    pub const fn count_lines_returned(&self) -> Count {
        self.lines_returned
    }

    /// Read one physical line into `pending`, splitting on `'\r'`.
    /// Returns `false` at end of file.
    fn read_physical(&mut self) -> Result<bool> {
        self.buffer.clear();
        let read: usize = self
            .reader
            .read_until(NLu8, &mut self.buffer)?;
        if read == 0 {
            return Ok(false);
        }
        let begin: FileOffset = self.fileoffset_read;
        self.fileoffset_read += read as FileOffset;
        // each '\r' or '\n' closes a line; `"\r\n"` closes one line
        let mut at: usize = 0;
        let mut prev_cr: bool = false;
        for (i, byte) in self.buffer.iter().enumerate() {
            match *byte {
                CRu8 => {
                    self.pending.push_back((self.buffer[at..i].to_vec(), begin + (i + 1) as FileOffset));
                    at = i + 1;
                    prev_cr = true;
                }
                NLu8 => {
                    if !prev_cr {
                        self.pending.push_back((self.buffer[at..i].to_vec(), begin + (i + 1) as FileOffset));
                    } else if let Some(last) = self.pending.back_mut() {
                        // `"\r\n"`, extend the line closed by `'\r'` over the `'\n'`
                        last.1 = begin + (i + 1) as FileOffset;
                    }
                    at = i + 1;
                    prev_cr = false;
                }
                _ => prev_cr = false,
            }
        }
        if at < self.buffer.len() {
            // last line of the file without a line terminator
            self.pending.push_back((self.buffer[at..].to_vec(), self.fileoffset_read));
        }

        Ok(true)
    }

    /// Return the next trimmed, non-empty line.
    ///
    /// Returns `Done` at the end of the file, and for every call after that.
    pub fn next_line(&mut self) -> ResultS3LineFind {
        loop {
            while let Some((bytes, fo_end)) = self.pending.pop_front() {
                self.line_number += 1;
                self.fileoffset = fo_end;
                let trimmed: &[u8] = bytes.trim();
                if trimmed.is_empty() {
                    continue;
                }
                defo!("line {} {:?}", self.line_number, buffer_to_String_noraw(trimmed));
                self.lines_returned += 1;
                let line: String = trimmed
                    .to_str_lossy()
                    .into_owned();
                return ResultS3::Found((self.line_number, line));
            }
            if self.eof {
                return ResultS3::Done;
            }
            match self.read_physical() {
                Ok(true) => {}
                Ok(false) => {
                    defñ!("EOF {:?}", self.path);
                    self.eof = true;
                }
                Err(err) => {
                    defñ!("read error {:?} {}", self.path, err);
                    return ResultS3::Err(Error::new(
                        err.kind(),
                        format!("Could not read file {:?}: {}", self.path, err),
                    ));
                }
            }
        }
    }
}
