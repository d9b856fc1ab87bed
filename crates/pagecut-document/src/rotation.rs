// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rotation baking — rewrites source pages with their pending rotation applied
// and clears the angle, so later sessions start upright.
//
// Pages are overwritten one at a time. A failure part-way leaves earlier
// pages rotated (their in-memory angle already cleared) and later pages
// untouched; running the batch again only touches pages that still have a
// pending angle.

use std::path::PathBuf;

use pagecut_core::Rotation;
use pagecut_core::error::Result;
use tracing::{info, instrument, warn};

use crate::catalog::ImageCatalog;
use crate::image::processor::ImageProcessor;
use crate::state_store::StateStore;

/// What a rotation batch did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationReport {
    /// Pages rewritten, with the rotation that was baked in.
    pub rotated: Vec<(String, Rotation)>,
    /// Pages with a pending angle whose backing file was gone.
    pub missing: Vec<PathBuf>,
}

/// Bakes pending rotations into the source files.
#[derive(Debug, Clone)]
pub struct RotationApplier {
    store: StateStore,
}

impl RotationApplier {
    /// `store` receives the angle-cleared states after the batch.
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Rotate every page with a pending angle, overwrite it in place, reset
    /// its angle, then save the state file.
    ///
    /// Missing files are reported and skipped. When no page was rotated,
    /// neither images nor the state file are written.
    #[instrument(skip_all, fields(state_file = %self.store.path().display()))]
    pub fn apply(&self, catalog: &mut ImageCatalog) -> Result<RotationReport> {
        let mut report = RotationReport::default();

        for entry in catalog.entries_mut() {
            let angle = entry.state.angle;
            if angle.is_identity() {
                continue;
            }
            let path = entry.source.path().to_path_buf();
            if !path.is_file() {
                warn!(path = %path.display(), "Page file not found; rotation skipped");
                report.missing.push(path);
                continue;
            }

            let rotated = ImageProcessor::open(&path)?.rotate(angle);
            rotated.save(&path)?;
            entry.source.replace_pixels(rotated.into_dynamic());
            entry.state.angle = Rotation::Deg0;

            info!(image = %entry.name(), %angle, "Rotated and overwrote page");
            report.rotated.push((entry.name().to_owned(), angle));
        }

        if !report.rotated.is_empty() {
            self.store.save(catalog)?;
        }
        info!(
            rotated = report.rotated.len(),
            missing = report.missing.len(),
            "Pending rotations applied"
        );
        Ok(report)
    }
}
