// src/readers/parsecursor.rs

//! Implements a [`ParseCursor`], the position and partial state of one scan.

use crate::common::{FileOffset, LineNumber};
use crate::readers::blockframer::FramerState;

use ::serde::{Deserialize, Serialize};

/// Everything a scan must remember between calls to
/// [`BatchEmitter::next_batch`]: which file, where in that file, any
/// partially accumulated block, and whether the scan is finished.
///
/// A `ParseCursor` belongs to exactly one scan. It is plain data; a snapshot
/// may be serialized and later passed to [`BatchEmitter::resume`].
///
/// [`BatchEmitter::next_batch`]: crate::readers::batchemitter::BatchEmitter#method.next_batch
/// [`BatchEmitter::resume`]: crate::readers::batchemitter::BatchEmitter#method.resume
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct ParseCursor {
    /// Count of files opened so far; the file currently open is
    /// `paths[file_index - 1]`. Zero before the first file is opened.
    pub file_index: usize,
    /// Physical line number of the last line read in the current file.
    pub line_number: LineNumber,
    /// Byte offset just past the last line read in the current file.
    pub fileoffset: FileOffset,
    /// The open block, if any.
    pub framer: FramerState,
    /// All files are exhausted and all buffered content is drained.
    /// Set once; never unset.
    pub finished: bool,
}

impl ParseCursor {
    pub fn new() -> ParseCursor {
        ParseCursor::default()
    }

    /// Forget the in-file position, for moving on to the next file.
    /// The framer state is kept.
    pub(crate) fn next_file(&mut self, file_index: usize) {
        self.file_index = file_index;
        self.line_number = 0;
        self.fileoffset = 0;
    }
}
