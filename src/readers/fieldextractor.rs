// src/readers/fieldextractor.rs

//! Implements a [`FieldExtractor`], the driver of deriving a [`Record`]
//! from a raw block.
//!
//! [`Record`]: crate::data::record::Record

use crate::data::record::{Record, TimestampMs};
use crate::data::schema::{Schema, FIELD_SEP};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::io::{Error, ErrorKind};

use ::itertools::Itertools; // provides `join`
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Separator of the fields joined into [`Record::extra`].
///
/// [`Record::extra`]: crate::data::record::Record#method.extra
pub const EXTRA_SEP: &str = " ";

/// What to do with a block whose timestamp field is not an integer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TimestampErrorPolicy {
    /// Fail the scan.
    #[default]
    Abort,
    /// Drop the block and continue.
    Skip,
}

/// What to do with a block whose message field lacks the message prefix,
/// for a [`Schema`] where the prefix is required.
///
/// [`Schema`]: crate::data::schema::Schema
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MissingPrefixPolicy {
    /// Use the message field text as-is.
    #[default]
    PassThrough,
    /// Drop the block and continue.
    Discard,
}

/// Why a raw block produced no [`Record`].
///
/// [`Record`]: crate::data::record::Record
#[derive(Debug, Eq, PartialEq)]
pub enum Discard {
    /// Fewer fields than the schema minimum; holds the count of fields.
    Short(usize),
    /// The timestamp field is not an integer; holds the field text.
    BadTimestamp(String),
    /// The message field lacks the message prefix.
    NoMessagePrefix,
}

/// [`FieldExtractor::extract`] result.
#[derive(Debug)]
pub enum ResultExtract {
    Found(Record),
    /// A `Record` whose message field lacked the required prefix and was
    /// passed through verbatim.
    FoundRawMessage(Record),
    Discarded(Discard),
    /// The timestamp field is not an integer and the policy is
    /// [`TimestampErrorPolicy::Abort`].
    Err(Error),
}

/// Splits raw blocks into [`Record`s] per a [`Schema`].
///
/// Pure; holds only the schema and the policies.
///
/// [`Record`s]: crate::data::record::Record
/// [`Schema`]: crate::data::schema::Schema
#[derive(Clone, Copy, Debug)]
pub struct FieldExtractor {
    schema: &'static Schema,
    timestamp_errors: TimestampErrorPolicy,
    missing_prefix: MissingPrefixPolicy,
}

/// Parse the text of a timestamp field. Surrounding whitespace is allowed.
pub fn parse_timestamp_ms(field: &str) -> Result<TimestampMs, std::num::ParseIntError> {
    field.trim().parse::<TimestampMs>()
}

impl FieldExtractor {
    pub const fn new(
        schema: &'static Schema,
        timestamp_errors: TimestampErrorPolicy,
        missing_prefix: MissingPrefixPolicy,
    ) -> FieldExtractor {
        FieldExtractor {
            schema,
            timestamp_errors,
            missing_prefix,
        }
    }

    pub const fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Split `rawblock` on [`FIELD_SEP`] and build a [`Record`].
    ///
    /// [`FIELD_SEP`]: crate::data::schema::FIELD_SEP
    /// [`Record`]: crate::data::record::Record
    pub fn extract(
        &self,
        rawblock: &str,
    ) -> ResultExtract {
        defn!("({:?})", str_to_String_noraw(rawblock));
        let fields: Vec<&str> = rawblock.split(FIELD_SEP).collect();
        if fields.len() < self.schema.fields_min {
            defx!("Short({}) < {}", fields.len(), self.schema.fields_min);
            return ResultExtract::Discarded(Discard::Short(fields.len()));
        }
        let layout = &self.schema.layout;

        let ts_field: &str = fields[layout.timestamp];
        let timestamp_ms: TimestampMs = match parse_timestamp_ms(ts_field) {
            Ok(val) => val,
            Err(err) => {
                defx!("bad timestamp {:?} {}", ts_field, err);
                return match self.timestamp_errors {
                    TimestampErrorPolicy::Abort => ResultExtract::Err(Error::new(
                        ErrorKind::InvalidData,
                        format!("invalid timestamp {:?}: {}", ts_field, err),
                    )),
                    TimestampErrorPolicy::Skip => {
                        ResultExtract::Discarded(Discard::BadTimestamp(String::from(ts_field)))
                    }
                };
            }
        };

        let msg_field: &str = fields[layout.message];
        let (message, prefixed): (&str, bool) = match msg_field.strip_prefix(self.schema.message_prefix) {
            Some(val) => (val, true),
            None => (msg_field, false),
        };
        let raw_message: bool = !prefixed && self.schema.message_prefix_required;
        if raw_message && self.missing_prefix == MissingPrefixPolicy::Discard {
            defx!("Discarded(NoMessagePrefix)");
            return ResultExtract::Discarded(Discard::NoMessagePrefix);
        }

        let extra: Option<String> = match layout.extra_from {
            Some(extra_from) if fields.len() > extra_from => Some(fields[extra_from..].iter().join(EXTRA_SEP)),
            _ => None,
        };

        let record = Record::new(
            String::from(fields[layout.time]),
            timestamp_ms,
            String::from(fields[layout.name]),
            String::from(fields[layout.level]),
            String::from(fields[layout.tag]),
            String::from(fields[layout.source_file]),
            String::from(fields[layout.source_line]),
            layout.func.map(|i| String::from(fields[i])),
            String::from(message),
            extra,
        );
        defx!("{:?}", record);
        if raw_message {
            return ResultExtract::FoundRawMessage(record);
        }

        ResultExtract::Found(record)
    }
}
