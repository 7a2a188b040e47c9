// src/readers/summary.rs

//! Implements `SummaryScan` statistics tracking struct.

use crate::common::{Count, FileOffset};
use crate::data::schema::Dialect;

use std::fmt;

use ::more_asserts::debug_assert_ge;

/// Accumulated statistics about one scan by a [`BatchEmitter`] and the
/// readers it drives.
///
/// For CLI option `--summary`.
///
/// [`BatchEmitter`]: crate::readers::batchemitter::BatchEmitter
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SummaryScan {
    pub dialect: Dialect,
    /// Count of files given to the scan.
    pub files_total: Count,
    pub files_opened: Count,
    pub bytes: FileOffset,
    /// Trimmed, non-empty lines read.
    pub lines: Count,
    /// Lines outside of any block.
    pub lines_ignored: Count,
    pub blocks_started: Count,
    /// Open block carried in by a resumed [`ParseCursor`].
    ///
    /// [`ParseCursor`]: crate::readers::parsecursor::ParseCursor
    pub blocks_resumed: Count,
    pub blocks_closed: Count,
    /// Blocks never terminated; replaced by a new block or cut off by the
    /// end of the last file.
    pub blocks_abandoned: Count,
    /// Blocks with too few fields.
    pub blocks_short: Count,
    pub timestamps_skipped: Count,
    /// Records emitted with a message field lacking the message prefix.
    pub message_prefix_missing: Count,
    /// Blocks dropped for lacking the message prefix.
    pub message_prefix_discarded: Count,
    pub records: Count,
    /// Non-empty batches returned.
    pub batches: Count,
    /// The first error, if any, as a `String`.
    pub error: Option<String>,
}

impl SummaryScan {
    pub fn new(
        dialect: Dialect,
        files_total: Count,
    ) -> SummaryScan {
        SummaryScan {
            dialect,
            files_total,
            ..Default::default()
        }
    }

    /// Blocks that produced no record.
    pub fn blocks_dropped(&self) -> Count {
        self.blocks_short
            + self.timestamps_skipped
            + self.message_prefix_discarded
    }

    /// Sanity checks of the counters relative to each other.
    pub fn debug_check(&self) {
        debug_assert_ge!(self.files_total, self.files_opened, "more files opened than given");
        debug_assert_ge!(
            self.blocks_started + self.blocks_resumed,
            self.blocks_closed,
            "more blocks closed than started"
        );
        debug_assert_ge!(self.blocks_closed, self.records, "more records than closed blocks");
        debug_assert_ge!(self.lines, self.blocks_started, "more blocks than lines");
    }
}

impl fmt::Display for SummaryScan {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        writeln!(f, "Dialect           : {}", self.dialect)?;
        writeln!(f, "Files             : {} (opened {})", self.files_total, self.files_opened)?;
        writeln!(f, "Bytes             : {}", self.bytes)?;
        writeln!(f, "Lines             : {} (ignored {})", self.lines, self.lines_ignored)?;
        writeln!(
            f,
            "Blocks            : started {}, resumed {}, closed {}, abandoned {}",
            self.blocks_started, self.blocks_resumed, self.blocks_closed, self.blocks_abandoned,
        )?;
        writeln!(
            f,
            "Blocks dropped    : {} (short {}, bad timestamp {}, no message prefix {})",
            self.blocks_dropped(),
            self.blocks_short,
            self.timestamps_skipped,
            self.message_prefix_discarded,
        )?;
        writeln!(f, "Records           : {} (raw message {})", self.records, self.message_prefix_missing)?;
        write!(f, "Batches           : {}", self.batches)?;
        if let Some(error) = &self.error {
            write!(f, "\nError             : {}", error)?;
        }

        Ok(())
    }
}
