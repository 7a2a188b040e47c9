// src/bin/sslog.rs

//! Driver program _sslog_ drives the [_sslib_].
//!
//! Processes user-passed command-line arguments.
//! Then expands the paths passed; directories are enumerated for files,
//! glob patterns are matched in their parent directory.
//!
//! All found files are scanned in order by one [`ShowStartScan`], which
//! returns [`Batch`es] of [`Record`s]. Each `Record` is printed by a
//! [`PrinterRecord`].
//!
//! If passed CLI option `--summary`, a [`SummaryScan`] is printed to stderr
//! after the scan.
//!
//! [_sslib_]: sslib
//! [`ShowStartScan`]: sslib::readers::scan::ShowStartScan
//! [`Batch`es]: sslib::data::batch::Batch
//! [`Record`s]: sslib::data::record::Record
//! [`PrinterRecord`]: sslib::printer::printers::PrinterRecord
//! [`SummaryScan`]: sslib::readers::summary::SummaryScan

#![allow(non_camel_case_types)]

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use ::sslib::common::{FPath, FPaths};
use ::sslib::data::batch::{Batch, BATCH_SZ_DEFAULT};
use ::sslib::data::schema::Dialect;
use ::sslib::debug::printers::{de_err, e_err};
use ::sslib::printer::printers::{
    print_colored_stderr,
    write_stderr,
    ColorChoice,
    OutputFormat,
    PrinterRecord,
    COLOR_ERROR,
};
use ::sslib::readers::batchemitter::ScanConfig;
use ::sslib::readers::fieldextractor::{MissingPrefixPolicy, TimestampErrorPolicy};
use ::sslib::readers::scan::{expand_paths, ShowStartScan};

// --------------------
// command-line parsing

/// CLI enum that maps to [`Dialect`].
///
/// [`Dialect`]: sslib::data::schema::Dialect
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CLI_Dialect {
    showstart,
    xlog,
}

/// CLI enum that maps to [`OutputFormat`].
///
/// [`OutputFormat`]: sslib::printer::printers::OutputFormat
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CLI_Output {
    text,
    tsv,
    json,
}

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

/// CLI enum that maps to [`TimestampErrorPolicy`].
///
/// [`TimestampErrorPolicy`]: sslib::readers::fieldextractor::TimestampErrorPolicy
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CLI_Timestamp_Errors {
    abort,
    skip,
}

/// CLI enum that maps to [`MissingPrefixPolicy`].
///
/// [`MissingPrefixPolicy`]: sslib::readers::fieldextractor::MissingPrefixPolicy
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CLI_Missing_Message {
    passthrough,
    discard,
}

/// `--help` _afterword_ message.
const CLI_HELP_AFTER: &str = "\
A record begins with a line starting \"ShowStart:|\" (dialect showstart) or
\"ShowStart:\" (dialect xlog) and ends with the line ending \"|$\" or \"|#\".
A record may span many lines, and may continue from the end of one file into
the next file.

Given a directory path, all files are scanned (dialect showstart), or only
files named \"*.xlog.log\" (dialect xlog). A path whose file name holds \"*\",
\"?\" or \"[...]\" is matched against the files of its directory.";

#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "sslog",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(ShowStart Log)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of log files, directories, or file name glob patterns.
    /// Directories will be recursed. Symlinks will be followed.
    #[clap(required = true, verbatim_doc_comment)]
    paths: Vec<String>,

    /// Log format dialect.
    #[clap(short = 'd', long, value_enum, default_value_t = CLI_Dialect::showstart)]
    dialect: CLI_Dialect,

    /// Count of records per batch.
    #[clap(short = 'b', long, default_value_t = BATCH_SZ_DEFAULT)]
    batch_size: usize,

    /// Output format.
    #[clap(short = 'o', long, value_enum, default_value_t = CLI_Output::text)]
    output: CLI_Output,

    /// Choose to print to terminal using colors.
    #[clap(short = 'c', long, value_enum, default_value_t = CLI_Color_Choice::auto)]
    color: CLI_Color_Choice,

    /// A record with a non-integer timestamp stops the scan (abort) or is
    /// dropped (skip).
    #[clap(long, value_enum, default_value_t = CLI_Timestamp_Errors::abort, verbatim_doc_comment)]
    timestamp_errors: CLI_Timestamp_Errors,

    /// A record with a message field lacking "message:" is printed as-is
    /// (passthrough) or dropped (discard).
    #[clap(long, value_enum, default_value_t = CLI_Missing_Message::passthrough, verbatim_doc_comment)]
    missing_message: CLI_Missing_Message,

    /// Print the timestamp as an RFC 3339 UTC datetime.
    #[clap(long)]
    datetime: bool,

    /// Print a summary of the scan to stderr.
    #[clap(short = 's', long)]
    summary: bool,
}

/// Settings of the printing, from the CLI.
#[derive(Debug)]
struct PrintConfig {
    format: OutputFormat,
    color_choice: ColorChoice,
    datetime: bool,
    summary: bool,
}

/// Process user-passed CLI argument strings into the library types.
fn cli_process_args() -> (FPaths, ScanConfig, PrintConfig) {
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    let dialect = match args.dialect {
        CLI_Dialect::showstart => Dialect::ShowStart,
        CLI_Dialect::xlog => Dialect::Xlog,
    };
    let timestamp_errors = match args.timestamp_errors {
        CLI_Timestamp_Errors::abort => TimestampErrorPolicy::Abort,
        CLI_Timestamp_Errors::skip => TimestampErrorPolicy::Skip,
    };
    let missing_prefix = match args.missing_message {
        CLI_Missing_Message::passthrough => MissingPrefixPolicy::PassThrough,
        CLI_Missing_Message::discard => MissingPrefixPolicy::Discard,
    };
    let config = ScanConfig::default()
        .with_dialect(dialect)
        .with_batch_size(args.batch_size)
        .with_timestamp_errors(timestamp_errors)
        .with_missing_message_prefix(missing_prefix);

    let format = match args.output {
        CLI_Output::text => OutputFormat::Text,
        CLI_Output::tsv => OutputFormat::Tsv,
        CLI_Output::json => OutputFormat::Json,
    };
    // termcolor does not check for a terminal
    let color_choice = match args.color {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
        CLI_Color_Choice::auto | CLI_Color_Choice::never => ColorChoice::Never,
    };
    let print_config = PrintConfig {
        format,
        color_choice,
        datetime: args.datetime,
        summary: args.summary,
    };

    (args.paths, config, print_config)
}

/// Set by the signal handler; polled between batches.
static EXIT_EARLY: AtomicBool = AtomicBool::new(false);

/// set a process signal handler
fn set_signal_handler() -> anyhow::Result<(), ctrlc::Error> {
    defn!();
    ctrlc::set_handler(move || {
        defñ!("signal");
        EXIT_EARLY.store(true, Ordering::SeqCst);
    })?;
    defx!();

    Ok(())
}

/// Print an error in color to stderr.
fn print_error(
    message: &str,
    color_choice: ColorChoice,
) {
    let text = format!("ERROR: {}\n", message);
    if print_colored_stderr(COLOR_ERROR, color_choice, text.as_bytes()).is_err() {
        write_stderr(text.as_bytes());
    }
}

/// Scan all `paths`, printing each record. Returns `false` if the scan
/// failed.
fn processing_loop(
    paths: FPaths,
    config: ScanConfig,
    print_config: &PrintConfig,
) -> bool {
    defn!("({} paths)", paths.len());
    let mut scan = match ShowStartScan::from_paths(paths, config) {
        Ok(val) => val,
        Err(err) => {
            print_error(&err.to_string(), print_config.color_choice);
            return false;
        }
    };
    let mut printer = PrinterRecord::new(
        print_config.color_choice,
        print_config.format,
        scan.schema(),
        print_config.datetime,
    );
    let mut ret: bool = true;
    if let Err(_err) = printer.print_header() {
        de_err!("print_header() {}", _err);
        return false;
    }
    'batches: loop {
        if EXIT_EARLY.load(Ordering::SeqCst) {
            defo!("EXIT_EARLY");
            break;
        }
        let batch: Batch = match scan.next_batch() {
            Ok(val) => val,
            Err(err) => {
                print_error(&err.to_string(), print_config.color_choice);
                ret = false;
                break;
            }
        };
        if batch.is_empty() {
            break;
        }
        for record in batch.iter() {
            if let Err(_err) = printer.print_record(record) {
                // e.g. "Broken pipe" from `sslog … | head`
                de_err!("print_record() {}", _err);
                break 'batches;
            }
        }
    }
    if let Err(_err) = printer.finish() {
        de_err!("printer.finish() {}", _err);
    }
    if print_config.summary {
        let summary = scan.summary();
        write_stderr(format!("\nSummary:\n{}\n", summary).as_bytes());
    }
    defx!("return {}", ret);

    ret
}

/// Process the user-passed command-line arguments.
/// Start function `processing_loop`.
/// Determine a process return code.
pub fn main() -> ExitCode {
    defn!();
    let (paths, config, print_config) = cli_process_args();

    if let Err(err) = config.validate() {
        e_err!("{}", err);
        return ExitCode::FAILURE;
    }
    let fpaths: FPaths = match expand_paths(&paths as &[FPath], &config) {
        Ok(val) => val,
        Err(err) => {
            print_error(&err.to_string(), print_config.color_choice);
            return ExitCode::FAILURE;
        }
    };
    defo!("fpaths {:?}", fpaths);

    if let Err(err) = set_signal_handler() {
        e_err!("set_signal_handler() failed {}", err);
    }

    let ret: bool = processing_loop(fpaths, config, &print_config);

    let exitcode = if ret { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    defx!("exitcode {:?}", exitcode);

    exitcode
}
