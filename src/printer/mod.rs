// src/printer/mod.rs

//! The `printer` module is for printing user-facing [`Record`s]
//! as colored text, TSV, or JSON lines.
//!
//! [`Record`s]: crate::data::record::Record

pub mod printers;
