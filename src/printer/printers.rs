// src/printer/printers.rs

//! Specialized printer struct [`PrinterRecord`] and helper functions
//! for printing [`Record`s].
//!
//! [`Record`s]: crate::data::record::Record

use crate::data::record::Record;
use crate::data::schema::{ColumnType, Schema, Value};
use crate::debug::printers::de_err;

use std::io::{Result, Write};

use ::chrono::{DateTime, SecondsFormat, Utc};
use ::itertools::Itertools; // provides `join`
#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for printing a record of an unrecognized level.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_DEFAULT: Color = Color::White;

/// [`Color`] for printing some user-facing error messages.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_ERROR: Color = Color::Red;

/// Separator of TSV cells.
pub const TSV_SEP: &str = "\t";

/// Text printed for a [`Value::Null`] cell.
///
/// [`Value::Null`]: crate::data::schema::Value
pub const NULL_TEXT: &str = "";

/// The printed forms of a [`Record`].
///
/// [`Record`]: crate::data::record::Record
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    /// One human-readable line per record, colored by level.
    #[default]
    Text,
    /// A header line of column names, then one tab-separated line per record.
    Tsv,
    /// One JSON object per line, keyed by column name.
    Json,
}

/// The [`Color`] of a record with log level `level`.
///
/// Accepts the single-letter and the spelled-out level names, any case.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub fn color_level(level: &str) -> Color {
    match level.trim().to_ascii_uppercase().as_str() {
        "F" | "FATAL" | "E" | "ERROR" => Color::Red,
        "W" | "WARN" | "WARNING" => Color::Yellow,
        "I" | "INFO" => Color::Green,
        "D" | "DEBUG" => Color::Cyan,
        "V" | "VERBOSE" | "T" | "TRACE" => Color::Rgb(128, 128, 128),
        _ => COLOR_DEFAULT,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// formatting functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Render one cell as text. With `datetime`, a timestamp becomes RFC 3339
/// UTC with milliseconds; out of range timestamps stay numeric.
pub fn value_to_text(
    value: &Value,
    datetime: bool,
) -> String {
    match value {
        Value::Null => String::from(NULL_TEXT),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => String::from_utf8_lossy(b).into_owned(),
        Value::TimestampMs(ms) if datetime => match DateTime::<Utc>::from_timestamp_millis(*ms) {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            None => ms.to_string(),
        },
        Value::TimestampMs(ms) => ms.to_string(),
    }
}

/// Escape the characters that would break a TSV line.
pub fn tsv_escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => s.push_str("\\\\"),
            '\t' => s.push_str("\\t"),
            '\n' => s.push_str("\\n"),
            '\r' => s.push_str("\\r"),
            _ => s.push(c),
        }
    }

    s
}

/// The TSV header line, without a line ending.
pub fn format_header_tsv(schema: &Schema) -> String {
    schema.column_names().iter().join(TSV_SEP)
}

/// One TSV line of `record`, without a line ending.
pub fn format_record_tsv(
    record: &Record,
    schema: &Schema,
    datetime: bool,
) -> String {
    record
        .values(schema)
        .iter()
        .map(|value| tsv_escape(&value_to_text(value, datetime)))
        .join(TSV_SEP)
}

/// One JSON object of `record` keyed by column name, without a line ending.
///
/// A timestamp is a JSON number, or with `datetime` a string. A blob is
/// a string, decoded lossily.
pub fn format_record_json(
    record: &Record,
    schema: &Schema,
    datetime: bool,
) -> String {
    let mut map = serde_json::Map::with_capacity(schema.columns.len());
    for (column, value) in schema.columns.iter().zip(record.values(schema)) {
        let jvalue: serde_json::Value = match (&value, column.coltype) {
            (Value::Null, _) => serde_json::Value::Null,
            (Value::TimestampMs(ms), ColumnType::TimestampMs) if !datetime => serde_json::Value::from(*ms),
            _ => serde_json::Value::String(value_to_text(&value, datetime)),
        };
        map.insert(String::from(column.name), jvalue);
    }

    serde_json::Value::Object(map).to_string()
}

/// One human-readable line of `record`, without a line ending.
///
/// `time [level] name tag file func: message extra`; absent `func` and
/// `extra` are left out.
pub fn format_record_text(
    record: &Record,
    datetime: bool,
) -> String {
    let time: String = match datetime {
        true => value_to_text(&Value::TimestampMs(record.timestamp_ms()), true),
        false => String::from(record.time()),
    };
    let mut s = format!(
        "{} [{}] {} {} {}",
        time,
        record.level(),
        record.name(),
        record.tag(),
        record.file(),
    );
    if let Some(func) = record.func() {
        if !func.is_empty() {
            s.push(' ');
            s.push_str(func);
        }
    }
    s.push_str(": ");
    s.push_str(record.message());
    if let Some(extra) = record.extra() {
        s.push(' ');
        s.push_str(extra);
    }

    s
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterRecord
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Aliased [`Result`] returned by various [`PrinterRecord`] functions;
/// the count of bytes printed.
///
/// [`Result`]: std::io::Result
pub type PrinterRecordResult = Result<usize>;

/// A printer of [`Record`s] to stdout in one [`OutputFormat`].
///
/// [`Record`s]: crate::data::record::Record
pub struct PrinterRecord {
    /// termcolor handle to stdout
    stdout_color: termcolor::StandardStream,
    /// should `Text` printing be in color?
    do_color: bool,
    format: OutputFormat,
    schema: &'static Schema,
    /// print the timestamp as a datetime
    datetime: bool,
    /// last value passed to `self.stdout_color.set_color()`
    color_spec_last: ColorSpec,
}

impl PrinterRecord {
    pub fn new(
        color_choice: ColorChoice,
        format: OutputFormat,
        schema: &'static Schema,
        datetime: bool,
    ) -> PrinterRecord {
        let stdout_color = termcolor::StandardStream::stdout(color_choice);
        let do_color: bool = format == OutputFormat::Text && stdout_color.supports_color();

        PrinterRecord {
            stdout_color,
            do_color,
            format,
            schema,
            datetime,
            color_spec_last: ColorSpec::new(),
        }
    }

    /// Write `buffer` and a newline, in `color_spec` if coloring.
    fn write_line(
        &mut self,
        buffer: &[u8],
        color_spec: Option<ColorSpec>,
    ) -> PrinterRecordResult {
        if let Some(color_spec) = color_spec {
            if color_spec != self.color_spec_last {
                if let Err(err) = self.stdout_color.set_color(&color_spec) {
                    de_err!("stdout.set_color({:?}) returned error {}", color_spec, err);
                    return Err(err);
                }
                self.color_spec_last = color_spec;
            }
        }
        if let Err(err) = self.stdout_color.write_all(buffer) {
            // XXX: this will print when stdout is truncated, e.g. `sslog file | head`
            de_err!("stdout.write_all(len {}) error {}", buffer.len(), err);
            return Err(err);
        }
        self.stdout_color.write_all(b"\n")?;

        Ok(buffer.len() + 1)
    }

    /// Print the header line for formats that have one.
    pub fn print_header(&mut self) -> PrinterRecordResult {
        match self.format {
            OutputFormat::Tsv => {
                let header = format_header_tsv(self.schema);
                self.write_line(header.as_bytes(), None)
            }
            OutputFormat::Text | OutputFormat::Json => Ok(0),
        }
    }

    /// Print one [`Record`].
    ///
    /// [`Record`]: crate::data::record::Record
    pub fn print_record(
        &mut self,
        record: &Record,
    ) -> PrinterRecordResult {
        let (line, color_spec): (String, Option<ColorSpec>) = match self.format {
            OutputFormat::Text => {
                let color_spec = match self.do_color {
                    true => {
                        let mut cs = ColorSpec::new();
                        cs.set_fg(Some(color_level(record.level())));
                        Some(cs)
                    }
                    false => None,
                };
                (format_record_text(record, self.datetime), color_spec)
            }
            OutputFormat::Tsv => (format_record_tsv(record, self.schema, self.datetime), None),
            OutputFormat::Json => (format_record_json(record, self.schema, self.datetime), None),
        };

        self.write_line(line.as_bytes(), color_spec)
    }

    /// Reset colors and flush stdout.
    pub fn finish(&mut self) -> Result<()> {
        if self.do_color {
            self.stdout_color.reset()?;
            self.color_spec_last = ColorSpec::new();
        }

        self.stdout_color.flush()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// other printer functions (no use of PrinterRecord)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Print colored output to terminal if possible using passed stream,
/// otherwise, print plain output.
pub fn print_colored(
    color: Color,
    value: &[u8],
    out: &mut termcolor::StandardStream,
) -> Result<()> {
    if let Err(err) = out.set_color(ColorSpec::new().set_fg(Some(color))) {
        de_err!("print_colored: set_color({:?}) returned error {}", color, err);
        return Err(err);
    }
    if let Err(err) = out.write_all(value) {
        de_err!("print_colored: write_all(…) returned error {}", err);
        return Err(err);
    }
    out.reset()?;

    out.flush()
}

/// Print colored output to terminal on stderr.
pub fn print_colored_stderr(
    color: Color,
    color_choice: ColorChoice,
    value: &[u8],
) -> Result<()> {
    let mut stderr = termcolor::StandardStream::stderr(color_choice);
    let _stdout_lock = std::io::stdout().lock();

    print_colored(color, value, &mut stderr)
}

/// Safely write the `buffer` to stderr with help of [`StderrLock`].
///
/// [`StderrLock`]: std::io::StderrLock
pub fn write_stderr(buffer: &[u8]) {
    let mut stderr_lock = std::io::stderr().lock();
    if let Err(_err) = stderr_lock.write_all(buffer) {
        de_err!("stderr_lock.write_all(len {}) error {}", buffer.len(), _err);
    }
    if let Err(_err) = stderr_lock.flush() {
        de_err!("stderr flushing error {}", _err);
    }
}
