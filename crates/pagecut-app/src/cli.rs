// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pagecut_core::error::Result;
use pagecut_core::{AppConfig, Edge};

#[derive(Debug, Parser)]
#[command(name = "pagecut", version, about = "Split scanned exam pages into per-question crops")]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where pages, crops, and the state file live.
#[derive(Debug, Default, Args)]
pub struct PathArgs {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of source page images [default: raw]
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Directory that receives crops [default: output]
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Annotation state file [default: image_states.txt]
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,
}

impl PathArgs {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input_dir = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(state_file) = &self.state_file {
            config.state_file = state_file.clone();
        }
        Ok(config)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split every page at blank horizontal bands into {page}_q{n}.png
    Split {
        /// Blank runs must be taller than this many rows to split a page
        #[arg(long)]
        min_blank_height: Option<u32>,
    },

    /// Write every drawn rectangle as {page}_{x0}_{y0}_{x1}_{y1}.png
    Export,

    /// Bake pending rotations into the source images and clear them
    ApplyRotation,

    /// List pages with their pending rotation and rectangles
    Status,

    /// Add a quarter-turn rotation to a page
    #[command(allow_negative_numbers = true)]
    Rotate {
        image: String,
        /// Clockwise degrees, a multiple of 90
        #[arg(long, default_value_t = 90)]
        degrees: i32,
    },

    /// Draw a rectangle on a page (display coordinates)
    #[command(allow_negative_numbers = true)]
    AddRect {
        image: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// Move one edge of an existing rectangle
    #[command(allow_negative_numbers = true)]
    Resize {
        image: String,
        /// 0-based rectangle index as listed by `status`
        index: usize,
        #[arg(value_enum)]
        edge: EdgeArg,
        position: f64,
    },

    /// Remove the most recently drawn rectangle from a page
    Undo { image: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EdgeArg {
    Left,
    Right,
    Top,
    Bottom,
}

impl From<EdgeArg> for Edge {
    fn from(edge: EdgeArg) -> Self {
        match edge {
            EdgeArg::Left => Edge::Left,
            EdgeArg::Right => Edge::Right,
            EdgeArg::Top => Edge::Top,
            EdgeArg::Bottom => Edge::Bottom,
        }
    }
}
