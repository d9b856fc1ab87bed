// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch auto-split — runs the blank-row segmenter over every page of a catalog
// and writes the bands as numbered question images.

use std::path::{Path, PathBuf};

use pagecut_core::error::Result;
use tracing::{info, instrument};

use crate::catalog::ImageCatalog;
use crate::image::processor::ImageProcessor;
use crate::scan::segment::BlankRowSegmenter;

/// Writes `{stem}_q{n}.png` (1-based `n`) for every band of every page.
#[derive(Debug, Clone)]
pub struct AutoSplitter {
    segmenter: BlankRowSegmenter,
    output_dir: PathBuf,
}

impl AutoSplitter {
    pub fn new(segmenter: BlankRowSegmenter, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            segmenter,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Split every page as displayed. Returns `(page name, question count)`
    /// in catalog order.
    #[instrument(skip_all, fields(output_dir = %self.output_dir.display()))]
    pub fn split_catalog(&self, catalog: &mut ImageCatalog) -> Result<Vec<(String, usize)>> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut counts = Vec::with_capacity(catalog.len());
        for entry in catalog.entries_mut() {
            let display = entry.display_image()?;
            let questions = self.segmenter.segment(&display);
            let count = questions.len();
            let stem = entry.source.stem();

            for (index, question) in questions.into_iter().enumerate() {
                let path = self.output_dir.join(format!("{stem}_q{}.png", index + 1));
                ImageProcessor::from_dynamic(question).save(&path)?;
            }

            info!(
                image = %entry.name(),
                questions = count,
                "{} split into {} questions",
                entry.name(),
                count
            );
            counts.push((entry.name().to_owned(), count));
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    fn two_question_page() -> DynamicImage {
        let mut img = GrayImage::from_pixel(60, 400, Luma([20u8]));
        draw_filled_rect_mut(&mut img, Rect::at(0, 150).of_size(60, 50), Luma([250u8]));
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn writes_numbered_questions_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = ImageCatalog::from_images([
            ("exam_1.png".to_string(), two_question_page()),
            (
                "blank.png".to_string(),
                DynamicImage::ImageLuma8(GrayImage::from_pixel(60, 400, Luma([20u8]))),
            ),
        ]);

        let splitter = AutoSplitter::new(BlankRowSegmenter::new(30), dir.path().join("out"));
        let counts = splitter.split_catalog(&mut catalog).unwrap();

        assert_eq!(
            counts,
            vec![("blank.png".to_string(), 0), ("exam_1.png".to_string(), 2)]
        );
        let q1 = image::open(splitter.output_dir().join("exam_1_q1.png")).unwrap();
        let q2 = image::open(splitter.output_dir().join("exam_1_q2.png")).unwrap();
        // Blank rows 150..=199: first band ends at 199, second runs to 400.
        assert_eq!(q1.height(), 199);
        assert_eq!(q2.height(), 201);
        assert!(!splitter.output_dir().join("blank_q1.png").exists());
    }
}
