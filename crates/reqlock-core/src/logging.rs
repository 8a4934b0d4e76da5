//! Logging setup on top of env_logger

use std::io::{IsTerminal, Write};

/// ANSI color code and padded label for a log level.
fn level_style(level: log::Level, color: bool) -> (&'static str, &'static str, &'static str) {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    if !color {
        return ("", label, "");
    }
    let ansi = match level {
        log::Level::Error => "\x1b[31m",
        log::Level::Warn => "\x1b[33m",
        log::Level::Info => "\x1b[32m",
        log::Level::Debug => "\x1b[36m",
        log::Level::Trace => "\x1b[35m",
    };
    (ansi, label, "\x1b[0m")
}

/// Default filter for the given verbosity flags; `debug` wins over `quiet`.
pub fn default_level(quiet: bool, debug: bool) -> &'static str {
    if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Logger builder reading its filter from `env`, falling back to the level
/// implied by the verbosity flags.
fn builder(env: env_logger::Env<'_>, quiet: bool, debug: bool) -> env_logger::Builder {
    let color = std::io::stderr().is_terminal();

    let mut builder =
        env_logger::Builder::from_env(env.default_filter_or(default_level(quiet, debug)));
    builder.format(move |buf, record| {
        let (pre, label, post) = level_style(record.level(), color);
        writeln!(buf, "[{pre}{label}{post}] {}", record.args())
    });
    builder
}

/// Initialize logging to stderr. `RUST_LOG` overrides the default level.
///
/// Level labels are colored only when stderr is a terminal, so piped output
/// stays plain for log scrapers.
pub fn init_logging(quiet: bool, debug: bool) {
    builder(env_logger::Env::default(), quiet, debug).init();
}
