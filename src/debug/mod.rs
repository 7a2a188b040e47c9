// src/debug/mod.rs

//! The `debug` module is functions for printing diagnostics in debug builds
//! and test builds, and fixture helpers for tests.

#[cfg(test)]
pub mod helpers;

pub mod printers;
