// src/readers/blockframer.rs

//! Implements a [`BlockFramer`], the driver of deriving raw blocks from
//! lines.
//!
//! A raw block begins with a line starting with the [`Schema`] sentinel and
//! ends with the line after which the accumulated text ends with
//! [`TERMINATOR_END`] or [`TERMINATOR_ALT`].
//!
//! The accumulated text is kept in a [`FramerState`], owned by the caller,
//! so that a block may continue across calls and across files.
//!
//! [`Schema`]: crate::data::schema::Schema
//! [`TERMINATOR_END`]: crate::data::schema::TERMINATOR_END
//! [`TERMINATOR_ALT`]: crate::data::schema::TERMINATOR_ALT

use crate::common::NLc;
use crate::data::schema::{
    Schema,
    FIELD_SEP,
    TERMINATOR_ALT,
    TERMINATOR_END,
    TERMINATOR_LEN,
};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use ::serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// The text of one framed block, sentinel and terminator removed.
pub type RawBlock = String;

/// Accumulation state of the [`BlockFramer`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct FramerState {
    /// Text of the open block, including the sentinel. Empty if no block
    /// is open.
    buffer: String,
    /// A block is open.
    in_block: bool,
}

impl FramerState {
    pub fn new() -> FramerState {
        FramerState::default()
    }

    pub const fn in_block(&self) -> bool {
        self.in_block
    }

    /// The text accumulated so far for the open block.
    pub fn buffer(&self) -> &str {
        self.buffer.as_str()
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.in_block = false;
    }
}

/// What [`BlockFramer::frame_line`] did with a line.
#[derive(Debug, Eq, PartialEq)]
pub enum ResultFrame {
    /// The line began a new block. If another block was open, it was
    /// abandoned (`true`).
    Started(bool),
    /// The line was appended to the open block.
    Continued,
    /// The line is not part of any block and was dropped.
    Ignored,
    /// The line closed a block. If another block was open before this line
    /// started the closed block, that one was abandoned (`true`).
    Closed(RawBlock, bool),
}

/// Frames lines into raw blocks for one [`Schema`].
///
/// A `BlockFramer` holds no per-scan state; see [`FramerState`].
#[derive(Clone, Copy, Debug)]
pub struct BlockFramer {
    schema: &'static Schema,
}

impl BlockFramer {
    pub const fn new(schema: &'static Schema) -> BlockFramer {
        BlockFramer { schema }
    }

    pub const fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Does `text` end with a block terminator?
    #[inline(always)]
    pub fn is_terminated(text: &str) -> bool {
        text.ends_with(TERMINATOR_END) || text.ends_with(TERMINATOR_ALT)
    }

    /// Process the next trimmed, non-empty `line`.
    ///
    /// A line starting with the sentinel always starts a new block; a single
    /// line may start and close a block. Afterwards no block is open.
    pub fn frame_line(
        &self,
        state: &mut FramerState,
        line: &str,
    ) -> ResultFrame {
        defn!("({:?})", str_to_String_noraw(line));
        let mut abandoned: bool = false;
        let started: bool = line.starts_with(self.schema.sentinel);
        if started {
            abandoned = state.in_block;
            if abandoned {
                defo!("abandon open block {:?}", str_to_String_noraw(&state.buffer));
            }
            state.buffer.clear();
            state.buffer.push_str(line);
            state.in_block = true;
        } else if state.in_block {
            state.buffer.push(NLc);
            state.buffer.push_str(line);
        } else {
            defx!("Ignored");
            return ResultFrame::Ignored;
        }

        if !BlockFramer::is_terminated(&state.buffer) {
            if started {
                defx!("Started({})", abandoned);
                return ResultFrame::Started(abandoned);
            }
            defx!("Continued");
            return ResultFrame::Continued;
        }

        let rawblock: RawBlock = self.strip(&state.buffer);
        state.reset();
        defx!("Closed({:?}, {})", str_to_String_noraw(&rawblock), abandoned);

        ResultFrame::Closed(rawblock, abandoned)
    }

    /// Remove the sentinel and the terminator from the text of a closed
    /// block.
    fn strip(
        &self,
        text: &str,
    ) -> RawBlock {
        let beg: usize = self.schema.sentinel.len();
        let end: usize = text.len() - TERMINATOR_LEN;
        if end <= beg {
            // the terminator overlaps the sentinel, e.g. `"ShowStart:|$"`
            return RawBlock::new();
        }
        let mut inner: &str = &text[beg..end];
        if self.schema.sentinel_sep_optional {
            inner = inner
                .strip_prefix(FIELD_SEP)
                .unwrap_or(inner);
        }

        RawBlock::from(inner)
    }

    /// Give up the open block, if any. Returns `true` if a block was open.
    ///
    /// Called when the input ends.
    pub fn abandon(
        &self,
        state: &mut FramerState,
    ) -> bool {
        let was_open = state.in_block;
        if was_open {
            defñ!("abandon open block {:?}", str_to_String_noraw(&state.buffer));
        }
        state.reset();

        was_open
    }
}
