// src/data/record.rs

//! Implements a [`Record`], one fully parsed ShowStart log entry.

use crate::data::schema::{
    ColumnType,
    RecordField,
    Schema,
    Terminator,
    Value,
    FIELD_SEP,
};

use std::borrow::Cow;
use std::fmt;

use ::chrono::{DateTime, Utc};
use ::itertools::Itertools; // provides `join`
use ::serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Record
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Separator between source file and source line in the `file` column.
pub const SOURCE_LOCATION_SEP: char = '.';

/// Milliseconds since the Unix epoch.
pub type TimestampMs = i64;

/// A `Record` is the typed result of one raw block that passed the
/// [`FieldExtractor`].
///
/// A `Record` is not changed after creation.
///
/// [`FieldExtractor`]: crate::readers::fieldextractor::FieldExtractor
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct Record {
    pub(crate) time: String,
    pub(crate) timestamp_ms: TimestampMs,
    pub(crate) name: String,
    pub(crate) level: String,
    pub(crate) tag: String,
    pub(crate) source_file: String,
    pub(crate) source_line: String,
    pub(crate) func: Option<String>,
    pub(crate) message: String,
    pub(crate) extra: Option<String>,
}

impl fmt::Debug for Record {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("Record")
            .field("time", &self.time)
            .field("timestamp_ms", &self.timestamp_ms)
            .field("name", &self.name)
            .field("level", &self.level)
            .field("tag", &self.tag)
            .field("file", &self.file())
            .field("func", &crate::common::debug_opt(&self.func))
            .field("message", &self.message)
            .field("extra", &crate::common::debug_opt(&self.extra))
            .finish()
    }
}

impl Record {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        time: String,
        timestamp_ms: TimestampMs,
        name: String,
        level: String,
        tag: String,
        source_file: String,
        source_line: String,
        func: Option<String>,
        message: String,
        extra: Option<String>,
    ) -> Record {
        Record {
            time,
            timestamp_ms,
            name,
            level,
            tag,
            source_file,
            source_line,
            func,
            message,
            extra,
        }
    }

    /// The display time text, as written by the logging program.
    pub fn time(&self) -> &str {
        self.time.as_str()
    }

    pub const fn timestamp_ms(&self) -> TimestampMs {
        self.timestamp_ms
    }

    /// The `timestamp_ms` as a UTC datetime, if it is in range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp_ms)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn level(&self) -> &str {
        self.level.as_str()
    }

    pub fn tag(&self) -> &str {
        self.tag.as_str()
    }

    pub fn source_file(&self) -> &str {
        self.source_file.as_str()
    }

    pub fn source_line(&self) -> &str {
        self.source_line.as_str()
    }

    /// The source location, `source_file` and `source_line` joined by
    /// [`SOURCE_LOCATION_SEP`], e.g. `"main.cpp.42"`.
    pub fn file(&self) -> String {
        let mut s = String::with_capacity(self.source_file.len() + 1 + self.source_line.len());
        s.push_str(&self.source_file);
        s.push(SOURCE_LOCATION_SEP);
        s.push_str(&self.source_line);

        s
    }

    pub fn func(&self) -> Option<&str> {
        self.func.as_deref()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn extra(&self) -> Option<&str> {
        self.extra.as_deref()
    }

    /// The value of one [`RecordField`] typed as `coltype`.
    pub fn value(
        &self,
        field: RecordField,
        coltype: ColumnType,
    ) -> Value {
        let text: Option<Cow<str>> = match field {
            RecordField::Timestamp => return Value::TimestampMs(self.timestamp_ms),
            RecordField::Time => Some(Cow::Borrowed(self.time())),
            RecordField::Name => Some(Cow::Borrowed(self.name())),
            RecordField::Level => Some(Cow::Borrowed(self.level())),
            RecordField::Tag => Some(Cow::Borrowed(self.tag())),
            RecordField::File => Some(Cow::Owned(self.file())),
            RecordField::Func => Some(Cow::Borrowed(self.func().unwrap_or_default())),
            RecordField::Message => Some(Cow::Borrowed(self.message())),
            RecordField::Extra => self.extra().map(Cow::Borrowed),
        };
        match (text, coltype) {
            (None, _) => Value::Null,
            (Some(s), ColumnType::Blob) => Value::Blob(s.into_owned().into_bytes()),
            // only `RecordField::Timestamp` is declared `ColumnType::TimestampMs`
            (Some(s), ColumnType::Text | ColumnType::TimestampMs) => Value::Text(s.into_owned()),
        }
    }

    /// The row of this `Record`, one [`Value`] per column of `schema`.
    pub fn values(
        &self,
        schema: &Schema,
    ) -> Vec<Value> {
        schema
            .columns
            .iter()
            .map(|column| self.value(column.field, column.coltype))
            .collect()
    }

    /// Encode this `Record` as a single framed line of the `schema` dialect,
    /// without a trailing newline.
    ///
    /// Passing the returned string through the readers produces a `Record`
    /// equal to `self`, as long as no text field holds a [`FIELD_SEP`] or a
    /// newline next to whitespace.
    ///
    /// The reverse is not true. Fields in unnamed positions (the reserved
    /// field and the fields between `message` and `extra`) are written empty,
    /// and an `extra` that was joined from several fields is written as one
    /// field.
    pub fn to_block_string(
        &self,
        schema: &Schema,
        terminator: Terminator,
    ) -> String {
        let layout = &schema.layout;
        let fields_n: usize = match (layout.extra_from, &self.extra) {
            (Some(extra_from), Some(_)) => extra_from + 1,
            _ => std::cmp::max(schema.fields_min, schema.fields_named()),
        };
        let mut fields: Vec<Cow<str>> = vec![Cow::Borrowed(""); fields_n];
        fields[layout.time] = Cow::Borrowed(self.time());
        fields[layout.timestamp] = Cow::Owned(self.timestamp_ms.to_string());
        fields[layout.name] = Cow::Borrowed(self.name());
        fields[layout.level] = Cow::Borrowed(self.level());
        fields[layout.tag] = Cow::Borrowed(self.tag());
        fields[layout.source_file] = Cow::Borrowed(self.source_file());
        fields[layout.source_line] = Cow::Borrowed(self.source_line());
        if let Some(func_index) = layout.func {
            fields[func_index] = Cow::Borrowed(self.func().unwrap_or_default());
        }
        fields[layout.message] = match schema.message_prefix_required {
            true => Cow::Owned(format!("{}{}", schema.message_prefix, self.message)),
            false => Cow::Borrowed(self.message()),
        };
        if let (Some(extra_from), Some(extra)) = (layout.extra_from, self.extra()) {
            fields[extra_from] = Cow::Borrowed(extra);
        }

        let sep = FIELD_SEP.to_string();
        format!(
            "{}{}{}",
            schema.sentinel,
            fields.iter().join(sep.as_str()),
            terminator.as_str(),
        )
    }
}
