// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagecut — split scanned exam pages into per-question crops.
//
// Entry point. Initialises logging, parses the command line, and dispatches to
// the command adapters.

mod cli;
mod commands;
mod project;

use std::process::ExitCode;

use clap::Parser;
use pagecut_core::human_errors::humanize_error;

use cli::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "Pagecut starting");

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let human = humanize_error(&err);
            tracing::error!(error = %err, "command failed");
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::from(human.exit_code())
        }
    }
}
