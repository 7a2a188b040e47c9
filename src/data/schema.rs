// src/data/schema.rs

//! Declared field layouts and output columns for each [`Dialect`] of
//! ShowStart block logs.
//!
//! The field positions of a raw block are named here, once, in a
//! [`FieldLayout`]. The [`FieldExtractor`] and [`Record`] only ever
//! refer to positions through a [`Schema`].
//!
//! [`FieldExtractor`]: crate::readers::fieldextractor::FieldExtractor
//! [`Record`]: crate::data::record::Record

use std::fmt;

use ::serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Dialect
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The two observed variants of the ShowStart block log format.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum Dialect {
    /// Sentinel `ShowStart:|`, at least 10 fields, 9 output columns.
    #[default]
    ShowStart,
    /// Sentinel `ShowStart:`, at least 8 fields, 7 output columns.
    /// Found in `*.xlog.log` files.
    Xlog,
}

impl Dialect {
    pub fn schema(&self) -> &'static Schema {
        match self {
            Dialect::ShowStart => &SCHEMA_SHOWSTART,
            Dialect::Xlog => &SCHEMA_XLOG,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dialect::ShowStart => write!(f, "showstart"),
            Dialect::Xlog => write!(f, "xlog"),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// columns and values
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Semantic type of an output column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnType {
    Text,
    /// Milliseconds since the Unix epoch.
    TimestampMs,
    Blob,
}

/// The [`Record`] datum an output column draws from.
///
/// [`Record`]: crate::data::record::Record
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordField {
    Time,
    Timestamp,
    Name,
    Level,
    Tag,
    /// source file and source line joined by `.`
    File,
    Func,
    Message,
    Extra,
}

/// One named, typed output column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub field: RecordField,
    pub coltype: ColumnType,
    pub nullable: bool,
}

impl Column {
    const fn new(name: &'static str, field: RecordField, coltype: ColumnType) -> Column {
        Column { name, field, coltype, nullable: false }
    }

    const fn new_nullable(name: &'static str, field: RecordField, coltype: ColumnType) -> Column {
        Column { name, field, coltype, nullable: true }
    }
}

/// One cell of a row, typed per [`ColumnType`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    TimestampMs(i64),
    Blob(Vec<u8>),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => write!(f, "{}", s),
            Value::TimestampMs(ms) => write!(f, "{}", ms),
            Value::Blob(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FieldLayout and Schema
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Position of a field within a raw block after splitting on [`FIELD_SEP`].
pub type FieldIndex = usize;

/// Field separator within a raw block. No escaping.
pub const FIELD_SEP: char = '|';

/// Normal block terminator.
pub const TERMINATOR_END: &str = "|$";
/// Alternate block terminator. Equivalent to [`TERMINATOR_END`].
pub const TERMINATOR_ALT: &str = "|#";
/// Both terminators have this length in bytes.
pub const TERMINATOR_LEN: usize = 2;

/// Named positions of the fields within a raw block.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldLayout {
    pub time: FieldIndex,
    pub timestamp: FieldIndex,
    pub name: FieldIndex,
    pub level: FieldIndex,
    pub tag: FieldIndex,
    pub source_file: FieldIndex,
    pub source_line: FieldIndex,
    pub func: Option<FieldIndex>,
    pub message: FieldIndex,
    /// Fields at and after this position are joined into `extra`, if there
    /// are more fields than this position.
    pub extra_from: Option<FieldIndex>,
}

/// A declared schema: how to frame, split, and type one [`Dialect`].
#[derive(Debug, Eq, PartialEq)]
pub struct Schema {
    pub dialect: Dialect,
    /// Literal prefix of the first line of a block.
    pub sentinel: &'static str,
    /// Remove one [`FIELD_SEP`] directly after the `sentinel`, if present.
    pub sentinel_sep_optional: bool,
    /// Blocks with fewer fields are discarded.
    pub fields_min: usize,
    pub layout: FieldLayout,
    /// Expected literal prefix of the message field.
    pub message_prefix: &'static str,
    /// `true` if a message field without `message_prefix` is an anomaly.
    pub message_prefix_required: bool,
    pub columns: &'static [Column],
}

pub const SENTINEL_SHOWSTART: &str = "ShowStart:|";
pub const SENTINEL_XLOG: &str = "ShowStart:";
pub const MESSAGE_PREFIX: &str = "message:";

pub const COLUMNS_SHOWSTART: [Column; 9] = [
    Column::new("time", RecordField::Time, ColumnType::Text),
    Column::new("timestamp", RecordField::Timestamp, ColumnType::TimestampMs),
    Column::new("name", RecordField::Name, ColumnType::Text),
    Column::new("level", RecordField::Level, ColumnType::Text),
    Column::new("tag", RecordField::Tag, ColumnType::Text),
    Column::new("file", RecordField::File, ColumnType::Text),
    Column::new("func", RecordField::Func, ColumnType::Text),
    Column::new("message", RecordField::Message, ColumnType::Text),
    Column::new_nullable("extra", RecordField::Extra, ColumnType::Text),
];

pub const COLUMNS_XLOG: [Column; 7] = [
    Column::new("time", RecordField::Time, ColumnType::Text),
    Column::new("timestamp", RecordField::Timestamp, ColumnType::TimestampMs),
    Column::new("name", RecordField::Name, ColumnType::Text),
    Column::new("level", RecordField::Level, ColumnType::Text),
    Column::new("tag", RecordField::Tag, ColumnType::Text),
    Column::new("file", RecordField::File, ColumnType::Text),
    Column::new("message", RecordField::Message, ColumnType::Blob),
];

/// `time|timestamp|name|level|tag|file|line|func|reserved|message:…|…|…|extra…`
pub const SCHEMA_SHOWSTART: Schema = Schema {
    dialect: Dialect::ShowStart,
    sentinel: SENTINEL_SHOWSTART,
    sentinel_sep_optional: false,
    fields_min: 10,
    layout: FieldLayout {
        time: 0,
        timestamp: 1,
        name: 2,
        level: 3,
        tag: 4,
        source_file: 5,
        source_line: 6,
        func: Some(7),
        message: 9,
        extra_from: Some(12),
    },
    message_prefix: MESSAGE_PREFIX,
    message_prefix_required: true,
    columns: &COLUMNS_SHOWSTART,
};

/// `time|timestamp|name|level|tag|file|line|message`
pub const SCHEMA_XLOG: Schema = Schema {
    dialect: Dialect::Xlog,
    sentinel: SENTINEL_XLOG,
    sentinel_sep_optional: true,
    fields_min: 8,
    layout: FieldLayout {
        time: 0,
        timestamp: 1,
        name: 2,
        level: 3,
        tag: 4,
        source_file: 5,
        source_line: 6,
        func: None,
        message: 7,
        extra_from: None,
    },
    message_prefix: MESSAGE_PREFIX,
    message_prefix_required: false,
    columns: &COLUMNS_XLOG,
};

impl Schema {
    pub fn from_dialect(dialect: Dialect) -> &'static Schema {
        dialect.schema()
    }

    /// Column names in output order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect()
    }

    /// Count of fields a block must hold to be encoded back without losing
    /// any named field; the highest named position plus one.
    pub fn fields_named(&self) -> usize {
        let l = &self.layout;
        [
            l.time,
            l.timestamp,
            l.name,
            l.level,
            l.tag,
            l.source_file,
            l.source_line,
            l.func.unwrap_or(0),
            l.message,
        ]
        .iter()
        .max()
        .map_or(0, |m| m + 1)
    }
}

/// Block terminator choice when encoding a [`Record`] back to text.
///
/// [`Record`]: crate::data::record::Record
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Terminator {
    #[default]
    End,
    Alt,
}

impl Terminator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Terminator::End => TERMINATOR_END,
            Terminator::Alt => TERMINATOR_ALT,
        }
    }
}
