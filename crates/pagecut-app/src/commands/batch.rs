// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Whole-catalog commands: auto split, crop export, rotation baking.

use pagecut_core::error::Result;
use pagecut_document::{AutoSplitter, BlankRowSegmenter, CropExporter, RotationApplier};
use tracing::info;

use crate::project::Project;

pub fn split(project: &mut Project, min_blank_height: Option<u32>) -> Result<()> {
    let min_blank_height = min_blank_height.unwrap_or(project.config.min_blank_height);
    let splitter = AutoSplitter::new(
        BlankRowSegmenter::new(min_blank_height),
        &project.config.output_dir,
    );
    let counts = splitter.split_catalog(&mut project.catalog)?;
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    info!(pages = counts.len(), questions = total, "Split finished");
    Ok(())
}

pub fn export(project: &mut Project) -> Result<()> {
    let exporter = CropExporter::new(&project.config.output_dir);
    let written = exporter.export(&mut project.catalog)?;
    info!(
        written,
        output_dir = %exporter.output_dir().display(),
        "All crops saved"
    );
    Ok(())
}

pub fn apply_rotation(project: &mut Project) -> Result<()> {
    let applier = RotationApplier::new(project.store.clone());
    let report = applier.apply(&mut project.catalog)?;
    info!(
        rotated = report.rotated.len(),
        missing = report.missing.len(),
        "All rotations applied; angles cleared"
    );
    Ok(())
}
