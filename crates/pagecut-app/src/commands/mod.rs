// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command adapters — each one opens the project, performs one operation on
// the core API, and saves if state changed.

mod annotate;
mod batch;
mod status;

use pagecut_core::AppConfig;
use pagecut_core::error::Result;

use crate::cli::{Cli, Command};
use crate::project::Project;

pub fn run(cli: Cli) -> Result<()> {
    let config = cli.paths.resolve()?;
    execute(config, cli.command)
}

pub fn execute(config: AppConfig, command: Command) -> Result<()> {
    let mut project = Project::open(config)?;
    match command {
        Command::Split { min_blank_height } => batch::split(&mut project, min_blank_height),
        Command::Export => batch::export(&mut project),
        Command::ApplyRotation => batch::apply_rotation(&mut project),
        Command::Status => {
            for line in status::status_lines(&project) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Rotate { image, degrees } => annotate::rotate(&mut project, &image, degrees),
        Command::AddRect {
            image,
            x,
            y,
            width,
            height,
        } => annotate::add_rect(&mut project, &image, x, y, width, height),
        Command::Resize {
            image,
            index,
            edge,
            position,
        } => annotate::resize(&mut project, &image, index, edge.into(), position),
        Command::Undo { image } => annotate::undo(&mut project, &image),
    }
}
