// src/tests/mod.rs

//! Tests for _sslib_.
//!
//! Tests are placed at `src/tests/`, inside the `sslib`. This allows tests
//! crate-internal visibility of readers and their private state.
//!
//! Tests placed at top-level path `tests/` only use the public API.

pub mod common;
pub mod fieldextractor_tests;
pub mod filepreprocessor_tests;
pub mod printers_tests;
