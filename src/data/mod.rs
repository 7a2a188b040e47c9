// src/data/mod.rs

//! The `data` module is specialized data containers for
//! [`Record`]s and [`Batch`]es, and the [`Schema`] that types them.
//!
//! ## Definitions of data
//!
//! ### Line
//!
//! A "line" is a sequence of bytes in a file that:
//!
//! * begin after a prior "line" or the beginning of a file.
//! * end with a newline `'\n'`, a carriage return `'\r'`, or the end of a file.
//!
//! Lines are trimmed of surrounding whitespace. Empty lines are skipped.
//! Lines are found by a [`LineReader`].
//!
//! ### Block
//!
//! A "block" (or "raw block") is a sequence of "lines" that:
//!
//! * begin with a line starting with the sentinel, e.g. `ShowStart:|`.
//! * end with a line after which the joined lines end with `|$` or `|#`.
//!
//! The lines of a block are joined with `'\n'`. A block may begin in one
//! file and end in the next file.
//! Blocks are found by a [`BlockFramer`].
//!
//! ### Record
//!
//! A "record" is a "block" split on `'|'` into at least the minimum count of
//! fields for the [`Dialect`], with a valid integer timestamp.
//! It is represented by a [`Record`] and created by a [`FieldExtractor`].
//!
//! A `Record` represents a "log message".
//!
//! ### Batch
//!
//! A "batch" is up to a fixed count of "records", in the order they were
//! found. A [`Batch`] is filled by a [`BatchEmitter`].
//!
//! Also see [_Overview of readers_].
//!
//! [_Overview of readers_]: crate::readers
//! [`LineReader`]: crate::readers::linereader::LineReader
//! [`BlockFramer`]: crate::readers::blockframer::BlockFramer
//! [`FieldExtractor`]: crate::readers::fieldextractor::FieldExtractor
//! [`BatchEmitter`]: crate::readers::batchemitter::BatchEmitter
//! [`Record`]: crate::data::record::Record
//! [`Batch`]: crate::data::batch::Batch
//! [`Schema`]: crate::data::schema::Schema
//! [`Dialect`]: crate::data::schema::Dialect

pub mod batch;
pub mod record;
pub mod schema;
