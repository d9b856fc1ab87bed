// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop export — writes one PNG per operator-drawn rectangle, cut from the
// page as displayed (pending rotation applied).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pagecut_core::Rectangle;
use pagecut_core::error::{PagecutError, Result};
use tracing::{debug, info, instrument};

use crate::catalog::ImageCatalog;
use crate::image::processor::ImageProcessor;

/// Rectangle bounds clamped to the display image, as `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropBounds {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl CropBounds {
    /// Clamp `rect` to a `width x height` image. Coordinates are truncated
    /// toward zero before clamping.
    pub fn clamp(rect: &Rectangle, width: u32, height: u32) -> Self {
        Self {
            x0: (rect.x().trunc() as i64).max(0),
            y0: (rect.y().trunc() as i64).max(0),
            x1: (rect.right().trunc() as i64).min(i64::from(width)),
            y1: (rect.bottom().trunc() as i64).min(i64::from(height)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    pub fn width(&self) -> i64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i64 {
        self.y1 - self.y0
    }
}

/// Output file name for a crop: `{stem}_{x0}_{y0}_{x1}_{y1}.png`.
pub fn crop_file_name(stem: &str, bounds: &CropBounds) -> String {
    format!(
        "{stem}_{}_{}_{}_{}.png",
        bounds.x0, bounds.y0, bounds.x1, bounds.y1
    )
}

/// Writes the rectangles of every cataloged page as PNG crops.
#[derive(Debug, Clone)]
pub struct CropExporter {
    output_dir: PathBuf,
}

impl CropExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export all rectangles and return the number of files written.
    ///
    /// Rectangles that clamp to the same bounds on the same page are written
    /// once per call. Existing files with the same name are overwritten. The
    /// first rectangle that clamps to an empty area aborts the export with
    /// `InvalidRectangle`; crops written before it stay on disk.
    ///
    /// File names carry the page stem only, so pages that differ just by
    /// extension (`a.png`, `a.jpg`) can map to the same crop file. The later
    /// page then overwrites the earlier crop, and both still count as
    /// written.
    #[instrument(skip_all, fields(output_dir = %self.output_dir.display()))]
    pub fn export(&self, catalog: &mut ImageCatalog) -> Result<usize> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut seen: HashSet<(String, CropBounds)> = HashSet::new();
        let mut written = 0usize;

        for entry in catalog.entries_mut() {
            if entry.state.rects.is_empty() {
                continue;
            }
            let display = ImageProcessor::from_dynamic(entry.display_image()?);
            let (width, height) = (display.width(), display.height());
            let name = entry.name().to_owned();

            for rect in &entry.state.rects {
                let bounds = CropBounds::clamp(rect, width, height);
                if bounds.is_empty() {
                    return Err(PagecutError::InvalidRectangle {
                        image: name,
                        x0: bounds.x0,
                        y0: bounds.y0,
                        x1: bounds.x1,
                        y1: bounds.y1,
                    });
                }
                if !seen.insert((name.clone(), bounds)) {
                    debug!(image = %name, ?bounds, "Duplicate crop skipped");
                    continue;
                }

                let path = self
                    .output_dir
                    .join(crop_file_name(entry.source.stem(), &bounds));
                // Non-empty bounds lie within the image, so the casts are lossless.
                display
                    .crop(
                        bounds.x0 as u32,
                        bounds.y0 as u32,
                        bounds.width() as u32,
                        bounds.height() as u32,
                    )
                    .save(&path)?;
                written += 1;
            }
        }

        info!(written, "Crops exported");
        Ok(written)
    }
}
