// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{PagecutError, Result};

/// Default minimum blank-run height (in rows) that separates two questions.
pub const DEFAULT_MIN_BLANK_HEIGHT: u32 = 30;

/// Paths and tuning values for a Pagecut run.
///
/// Every catalog, exporter, and applier receives these explicitly; nothing
/// reads directory names from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Flat directory holding the source page images.
    pub input_dir: PathBuf,
    /// Directory that receives crop files (created if absent).
    pub output_dir: PathBuf,
    /// Text file holding per-page rotation and rectangles.
    pub state_file: PathBuf,
    /// Blank runs must be taller than this to split a page.
    pub min_blank_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("raw"),
            output_dir: PathBuf::from("output"),
            state_file: PathBuf::from("image_states.txt"),
            min_blank_height: DEFAULT_MIN_BLANK_HEIGHT,
        }
    }
}

impl AppConfig {
    /// Read a JSON configuration file. Keys that are absent keep their
    /// default values.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|err| {
            PagecutError::Config(format!(
                "failed to read {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }
}
