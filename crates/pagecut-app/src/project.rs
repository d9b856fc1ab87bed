// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// A working directory opened for one command: the configured catalog with the
// state file applied.

use pagecut_core::AppConfig;
use pagecut_core::error::Result;
use pagecut_document::{ImageCatalog, LoadReport, StateStore};
use tracing::{info, warn};

pub struct Project {
    pub config: AppConfig,
    pub catalog: ImageCatalog,
    pub store: StateStore,
    /// `None` when there was no state file yet.
    pub load_report: Option<LoadReport>,
}

impl Project {
    /// Catalog the input directory and load the state file, logging every
    /// skipped line.
    pub fn open(config: AppConfig) -> Result<Self> {
        let mut catalog = ImageCatalog::open(&config.input_dir)?;
        let store = StateStore::new(&config.state_file);
        let load_report = store.load(&mut catalog)?;

        match &load_report {
            Some(report) => {
                for issue in &report.issues {
                    warn!(%issue, "State file line skipped");
                }
            }
            None => info!(
                path = %config.state_file.display(),
                "No state file yet; all pages start with default state"
            ),
        }

        Ok(Self {
            config,
            catalog,
            store,
            load_report,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.catalog)
    }
}
