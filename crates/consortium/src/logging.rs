use std::env::var;
use std::fs::OpenOptions;
use std::io::stderr;
use std::sync::Mutex;

use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{registry, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "consortium=info";

#[derive(Debug, Args)]
pub struct LoggingArgs {
    /// Log level, overrides RUST_LOG
    #[arg(short, long, value_name = "LEVEL", value_enum)]
    pub level: Option<LogLevel>,

    /// Also append debug logs to this file
    #[arg(short = 'f', long, value_name = "PATH")]
    pub log_file: Option<Utf8PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "lower")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

pub fn setup(args: &LoggingArgs) -> EyreResult<()> {
    let directives = match (args.level, var("RUST_LOG")) {
        (Some(level), _) => format!("consortium={}", level.as_str()),
        (None, Ok(value)) if !value.trim().is_empty() => value,
        _ => DEFAULT_DIRECTIVES.to_owned(),
    };

    let stderr = layer()
        .with_writer(stderr)
        .with_filter(EnvFilter::builder().parse(directives)?);

    let file = match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("failed to open log file {path:?}"))?;

            Some(
                layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(EnvFilter::builder().parse("consortium=debug")?),
            )
        }
        None => None,
    };

    registry().with(stderr).with(file).init();

    Ok(())
}
