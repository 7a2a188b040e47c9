// src/data/batch.rs

//! Implements a [`Batch`], a bounded group of [`Record`s] handed to the
//! caller as one unit.
//!
//! [`Record`s]: crate::data::record::Record

use crate::data::record::Record;
use crate::data::schema::{Schema, Value};

use ::more_asserts::debug_assert_lt;

/// Default maximum count of [`Record`s] in a [`Batch`]; the vector width
/// a columnar host engine prefers.
///
/// [`Record`s]: crate::data::record::Record
pub const BATCH_SZ_DEFAULT: usize = 2048;
/// Smallest allowed [`Batch`] capacity.
pub const BATCH_SZ_MIN: usize = 1;
/// Largest allowed [`Batch`] capacity.
pub const BATCH_SZ_MAX: usize = 0x100000;
/// Most [`Record`s] reserved by the first [`Batch::push`]; a larger
/// `Batch` grows as it is filled.
///
/// [`Record`s]: crate::data::record::Record
pub const BATCH_RESERVE_MAX: usize = BATCH_SZ_DEFAULT;

pub type Records = Vec<Record>;

/// An ordered sequence of at most `capacity` [`Record`s].
///
/// An empty `Batch` returned by [`BatchEmitter::next_batch`] means the scan
/// has no more rows.
///
/// [`Record`s]: crate::data::record::Record
/// [`BatchEmitter::next_batch`]: crate::readers::batchemitter::BatchEmitter#method.next_batch
#[derive(Debug, Eq, PartialEq)]
pub struct Batch {
    records: Records,
    capacity: usize,
}

impl Batch {
    pub fn new(capacity: usize) -> Batch {
        debug_assert!(capacity >= BATCH_SZ_MIN, "capacity {} too small", capacity);
        Batch {
            records: Records::new(),
            capacity,
        }
    }

    /// Append `record`. The caller must check [`is_full`] first.
    ///
    /// [`is_full`]: Batch::is_full
    pub fn push(&mut self, record: Record) {
        debug_assert_lt!(self.records.len(), self.capacity, "Batch is full");
        if self.records.capacity() == 0 {
            self.records.reserve_exact(std::cmp::min(self.capacity, BATCH_RESERVE_MAX));
        }
        self.records.push(record);
    }

    /// Count of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Count of rows allocated for.
    #[cfg(test)]
    pub(crate) fn reserved(&self) -> usize {
        self.records.capacity()
    }

    pub fn records(&self) -> &[Record] {
        self.records.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn into_records(self) -> Records {
        self.records
    }

    /// The rows transposed to one `Vec` of [`Value`s] per column of `schema`,
    /// in column order.
    ///
    /// [`Value`s]: crate::data::schema::Value
    pub fn columns(&self, schema: &Schema) -> Vec<Vec<Value>> {
        schema
            .columns
            .iter()
            .map(|column| {
                self.records
                    .iter()
                    .map(|record| record.value(column.field, column.coltype))
                    .collect()
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
