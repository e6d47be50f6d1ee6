//! CLI argument definitions for the `copo` report generator.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use copo_engine::ScorerKind;

use crate::edits::CellEdit;
use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "copo",
    version,
    about = "CO-PO-PSO attainment calculator",
    long_about = "Compute course outcome and program outcome attainment from a CO-PO-PSO \
                  mapping matrix.\n\n\
                  Blends direct (test-based) and indirect (survey-based) attainment at \
                  80/20 and writes printable reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a mapping table and print it with its column averages.
    Matrix(MatrixArgs),

    /// Score attainment and write the report.
    Report(ReportArgs),

    /// List the PO/PSO codes and their aliases.
    Codes,
}

#[derive(Parser)]
pub struct MatrixArgs {
    /// CO-PO-PSO mapping table (.csv, .tsv or .txt).
    #[arg(value_name = "MAPPING_FILE")]
    pub mapping: PathBuf,

    /// Edit one cell after loading, e.g. `CO2:PO5=2.5`, `CO1:PSO1=3` or `1,4=2.5`.
    #[arg(long = "set", value_name = "CELL=VALUE")]
    pub set: Vec<CellEdit>,

    /// Exit non-zero when the table cannot be read or an edit is rejected.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// CO-PO-PSO mapping table (.csv, .tsv or .txt).
    #[arg(long = "matrix", value_name = "FILE")]
    pub matrix: PathBuf,

    /// Direct attainment input: marks table with CO columns, or a JSON payload.
    #[arg(long = "direct", value_name = "FILE")]
    pub direct: Option<PathBuf>,

    /// Indirect attainment input: survey table with CO1..CO6, or a JSON payload.
    #[arg(long = "indirect", value_name = "FILE")]
    pub indirect: Option<PathBuf>,

    /// How attainment inputs are read.
    #[arg(long = "scorer", value_enum, default_value = "auto")]
    pub scorer: ScorerArg,

    /// Course details and CO statements (TOML).
    #[arg(long = "course", value_name = "TOML")]
    pub course: Option<PathBuf>,

    /// Edit one cell before scoring, e.g. `CO2:PO5=2.5`.
    #[arg(long = "set", value_name = "CELL=VALUE")]
    pub set: Vec<CellEdit>,

    /// Output directory for generated files (default: <MATRIX_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report files to write.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: OutputFormatArg,

    /// Exit non-zero when any step ends with an error message.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScorerArg {
    /// JSON files are payloads, tables are averaged per CO column.
    Auto,
    /// Precomputed scoring service response.
    Payload,
    /// Per-CO score table.
    CoAverage,
}

impl From<ScorerArg> for ScorerKind {
    fn from(value: ScorerArg) -> Self {
        match value {
            ScorerArg::Auto => Self::Auto,
            ScorerArg::Payload => Self::Payload,
            ScorerArg::CoAverage => Self::CoAverage,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Json,
    Html,
    /// Combined 80/20 table only.
    Csv,
    /// JSON and HTML.
    Both,
    /// JSON, HTML and CSV.
    All,
    /// Print tables only.
    #[value(name = "none")]
    NoFiles,
}

impl OutputFormatArg {
    pub fn json(self) -> bool {
        matches!(self, Self::Json | Self::Both | Self::All)
    }

    pub fn html(self) -> bool {
        matches!(self, Self::Html | Self::Both | Self::All)
    }

    pub fn csv(self) -> bool {
        matches!(self, Self::Csv | Self::All)
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl Cli {
    /// Logging configuration from the global flags. `--log-level` beats
    /// -v/-q, and either one disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let level_filter = match self.log_level {
            Some(LogLevelArg::Error) => LevelFilter::ERROR,
            Some(LogLevelArg::Warn) => LevelFilter::WARN,
            Some(LogLevelArg::Info) => LevelFilter::INFO,
            Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
            Some(LogLevelArg::Trace) => LevelFilter::TRACE,
            None => self.verbosity.tracing_level_filter(),
        };
        let format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        let mut config = LogConfig::default()
            .with_level(level_filter)
            .with_format(format)
            .with_ansi(with_ansi)
            .with_log_file(self.log_file.clone());
        config.use_env_filter = !(self.verbosity.is_present() || self.log_level.is_some());
        config
    }
}
