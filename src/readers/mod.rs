// src/readers/mod.rs

//! "Readers" for _sslib_.
//!
//! ## Overview of readers
//!
//! * A [`ShowStartScan`] drives a [`BatchEmitter`] to derive [`Batch`es].
//! * A `BatchEmitter` drives a [`FileSequencer`], a [`BlockFramer`], and a
//!   [`FieldExtractor`] to derive [`Record`s].
//! * A `FileSequencer` drives one [`LineReader`] at a time to derive lines.
//!
//! <br/>
//!
//! * A `LineReader` handles `u8` bytes, and does all of the `u8` to `char`
//!   conversions.
//! * A `BlockFramer` joins lines into raw blocks. It keeps no state of its
//!   own; the partial block lives in the [`ParseCursor`] of the scan.
//! * A `FieldExtractor` splits a raw block into a `Record` per a
//!   [`Schema`].
//!
//! <br/>
//!
//! Also see [_Definitions of data_].
//!
//! <br/>
//!
//! ---
//!
//! The _sslog_ binary program uses one `ShowStartScan` over all the files
//! found by [`process_path`].
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [_Definitions of data_]: crate::data
//! [`Read`]: std::io::Read
//! [`Batch`es]: crate::data::batch::Batch
//! [`Record`s]: crate::data::record::Record
//! [`Schema`]: crate::data::schema::Schema
//! [`BatchEmitter`]: crate::readers::batchemitter::BatchEmitter
//! [`BlockFramer`]: crate::readers::blockframer::BlockFramer
//! [`FieldExtractor`]: crate::readers::fieldextractor::FieldExtractor
//! [`FileSequencer`]: crate::readers::filesequencer::FileSequencer
//! [`LineReader`]: crate::readers::linereader::LineReader
//! [`ParseCursor`]: crate::readers::parsecursor::ParseCursor
//! [`ShowStartScan`]: crate::readers::scan::ShowStartScan
//! [`process_path`]: crate::readers::filepreprocessor::process_path

pub mod batchemitter;
pub mod blockframer;
pub mod fieldextractor;
pub mod filepreprocessor;
pub mod filesequencer;
pub mod helpers;
pub mod linereader;
pub mod parsecursor;
pub mod scan;
pub mod summary;
