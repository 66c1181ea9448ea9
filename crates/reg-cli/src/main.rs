//! Registration admin desk CLI.

use clap::{ColorChoice, Parser};
use reg_cli::config::Settings;
use reg_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod render;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    Desk, Outcome, run_check_id, run_delete, run_export, run_facets, run_list, run_note, run_show,
};
use crate::render::print_notice;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let settings = Settings::load(cli.config.as_deref());
    let desk = Desk::new(settings, cli.data_dir.clone());
    let result = match &cli.command {
        Command::List(args) => run_list(&desk, args).await,
        Command::Facets(args) => run_facets(&desk, args).await,
        Command::Show(args) => run_show(&desk, args).await,
        Command::Export(args) => run_export(&desk, args).await,
        Command::Note(args) => run_note(&desk, args).await,
        Command::Delete(args) => run_delete(&desk, args).await,
        Command::CheckId(args) => Ok(run_check_id(args)),
    };
    std::process::exit(report(result));
}

fn report(result: anyhow::Result<Outcome>) -> i32 {
    match result {
        Ok(outcome) => {
            for notice in &outcome.notices {
                print_notice(notice);
            }
            i32::from(outcome.has_errors())
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
