// src/lib.rs

//! _sslib_ streams ShowStart block logs into [`Batch`es] of typed
//! [`Record`s].
//!
//! A record is a block of one or more lines framed by a sentinel and a
//! terminator, with `|`-separated fields. See [`readers`] for the pipeline,
//! and [`bind`] for the simplest use.
//!
//! [`Batch`es]: crate::data::batch::Batch
//! [`Record`s]: crate::data::record::Record
//! [`bind`]: crate::readers::scan::bind

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
