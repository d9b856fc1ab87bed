// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blank-row segmentation — splits a scanned page into horizontal bands at
// runs of near-white rows.

use std::ops::Range;

use image::{DynamicImage, GrayImage};
use pagecut_core::config::DEFAULT_MIN_BLANK_HEIGHT;
use tracing::{debug, instrument};

/// Luma value at or above which a pixel counts as white paper.
pub const WHITE_THRESHOLD: u8 = 240;

/// Percentage of a row that must be exceeded by white pixels for the row to
/// count as blank.
pub const BLANK_ROW_PERCENT: usize = 98;

/// Splits a page into question bands separated by tall blank runs.
///
/// The segmenter is a pure function of the pixel buffer and
/// `min_blank_height`; running it twice on the same page gives the same bands.
///
/// ## Algorithm
///
/// 1. Binarize the luma channel at [`WHITE_THRESHOLD`].
/// 2. A row is blank when more than [`BLANK_ROW_PERCENT`]% of it is white.
/// 3. Consecutive blank rows form runs. Runs longer than `min_blank_height`
///    become boundaries `(start, end)` (`end` is the last blank row).
/// 4. If the page continues more than `min_blank_height` rows past the last
///    boundary, `(last_end, height)` is appended as a tail boundary.
/// 5. Walking the boundaries with a cursor starting at row 0, each boundary
///    whose `end` lies more than `min_blank_height` past the cursor yields the
///    band `[cursor, end)`; the cursor then moves to `end` either way.
///
/// A page without any boundary yields no bands at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankRowSegmenter {
    min_blank_height: u32,
}

impl Default for BlankRowSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_BLANK_HEIGHT)
    }
}

impl BlankRowSegmenter {
    pub fn new(min_blank_height: u32) -> Self {
        Self { min_blank_height }
    }

    /// Crop the page into its question bands, top to bottom.
    #[instrument(skip_all, fields(width = page.width(), height = page.height()))]
    pub fn segment(&self, page: &DynamicImage) -> Vec<DynamicImage> {
        let width = page.width();
        self.segment_rows(&page.to_luma8())
            .into_iter()
            .map(|rows| page.crop_imm(0, rows.start, width, rows.end - rows.start))
            .collect()
    }

    /// Row ranges of the bands `segment` would crop.
    pub fn segment_rows(&self, gray: &GrayImage) -> Vec<Range<u32>> {
        let mut bands = Vec::new();
        let mut prev_end = 0u32;
        for (_, end) in self.boundaries(gray) {
            if end.saturating_sub(prev_end) > self.min_blank_height {
                bands.push(prev_end..end);
            }
            prev_end = end;
        }
        debug!(bands = bands.len(), "Page segmented");
        bands
    }

    /// Split boundaries, including the tail boundary when there is one.
    pub fn boundaries(&self, gray: &GrayImage) -> Vec<(u32, u32)> {
        let mut boundaries: Vec<(u32, u32)> = blank_runs(&blank_rows(gray))
            .into_iter()
            .filter(|&(start, end)| end - start + 1 > self.min_blank_height)
            .collect();

        let height = gray.height();
        if let Some(&(_, last_end)) = boundaries.last() {
            if height - last_end > self.min_blank_height {
                boundaries.push((last_end, height));
            }
        }

        debug!(boundaries = boundaries.len(), "Split boundaries found");
        boundaries
    }
}

/// Indices of rows that are almost entirely white.
pub fn blank_rows(gray: &GrayImage) -> Vec<u32> {
    let width = gray.width() as usize;
    gray.rows()
        .enumerate()
        .filter_map(|(index, row)| {
            let white = row.filter(|pixel| pixel.0[0] >= WHITE_THRESHOLD).count();
            (white * 100 > width * BLANK_ROW_PERCENT).then_some(index as u32)
        })
        .collect()
}

/// Group sorted row indices into inclusive `(start, end)` runs of
/// consecutive rows.
fn blank_runs(rows: &[u32]) -> Vec<(u32, u32)> {
    let mut runs = Vec::new();
    let mut iter = rows.iter().copied();
    let Some(first) = iter.next() else {
        return runs;
    };

    let (mut start, mut end) = (first, first);
    for row in iter {
        if row - end > 1 {
            runs.push((start, end));
            start = row;
        }
        end = row;
    }
    runs.push((start, end));
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    /// Solid black page of the given size with white bands at the given
    /// inclusive row ranges.
    fn page_with_blank_bands(width: u32, height: u32, bands: &[(u32, u32)]) -> GrayImage {
        let mut img = GrayImage::from_pixel(width, height, Luma([0u8]));
        for &(start, end) in bands {
            let rect = Rect::at(0, start as i32).of_size(width, end - start + 1);
            draw_filled_rect_mut(&mut img, rect, Luma([255u8]));
        }
        img
    }

    #[test]
    fn blank_row_needs_more_than_ninety_eight_percent_white() {
        let mut img = GrayImage::from_pixel(100, 3, Luma([255u8]));
        // Row 1: exactly 98 white pixels is not enough.
        img.put_pixel(0, 1, Luma([0]));
        img.put_pixel(1, 1, Luma([0]));
        // Row 2: 99 white pixels is.
        img.put_pixel(0, 2, Luma([239]));

        assert_eq!(blank_rows(&img), vec![0, 2]);
    }

    #[test]
    fn threshold_is_inclusive_at_240() {
        let img = GrayImage::from_pixel(10, 2, Luma([WHITE_THRESHOLD]));
        assert_eq!(blank_rows(&img), vec![0, 1]);
        let img = GrayImage::from_pixel(10, 2, Luma([WHITE_THRESHOLD - 1]));
        assert!(blank_rows(&img).is_empty());
    }

    #[test]
    fn runs_group_consecutive_rows() {
        assert_eq!(
            blank_runs(&[3, 4, 5, 9, 11, 12]),
            vec![(3, 5), (9, 9), (11, 12)]
        );
        assert!(blank_runs(&[]).is_empty());
    }

    #[test]
    fn long_run_and_tail_make_two_bands() {
        // Blank rows 500..=540 (41 rows) split the page; 900..=905 (6 rows)
        // is too short to matter.
        let gray = page_with_blank_bands(40, 1000, &[(500, 540), (900, 905)]);
        let segmenter = BlankRowSegmenter::new(30);

        assert_eq!(segmenter.boundaries(&gray), vec![(500, 540), (540, 1000)]);
        assert_eq!(segmenter.segment_rows(&gray), vec![0..540, 540..1000]);
    }

    #[test]
    fn segment_crops_full_width_bands() {
        let page = DynamicImage::ImageLuma8(page_with_blank_bands(40, 1000, &[(500, 540)]));
        let crops = BlankRowSegmenter::default().segment(&page);

        assert_eq!(crops.len(), 2);
        assert_eq!((crops[0].width(), crops[0].height()), (40, 540));
        assert_eq!((crops[1].width(), crops[1].height()), (40, 460));
    }

    #[test]
    fn page_without_blank_runs_yields_nothing() {
        let gray = GrayImage::from_pixel(40, 800, Luma([0u8]));
        let segmenter = BlankRowSegmenter::default();
        assert!(segmenter.boundaries(&gray).is_empty());
        assert!(segmenter.segment_rows(&gray).is_empty());
    }

    #[test]
    fn page_with_only_short_runs_yields_nothing() {
        let gray = page_with_blank_bands(40, 800, &[(100, 110), (400, 420)]);
        assert!(BlankRowSegmenter::default().segment_rows(&gray).is_empty());
    }

    #[test]
    fn thin_leading_band_is_dropped_not_merged() {
        // A 31-row blank run at the top is a boundary ending at row 30, which
        // leaves a band of exactly 30 rows: discarded, cursor still advances.
        let gray = page_with_blank_bands(40, 600, &[(0, 30), (300, 360)]);
        let segmenter = BlankRowSegmenter::new(30);

        assert_eq!(
            segmenter.boundaries(&gray),
            vec![(0, 30), (300, 360), (360, 600)]
        );
        assert_eq!(segmenter.segment_rows(&gray), vec![30..360, 360..600]);
    }

    #[test]
    fn blank_run_at_bottom_adds_no_tail() {
        let gray = page_with_blank_bands(40, 500, &[(450, 499)]);
        let segmenter = BlankRowSegmenter::new(30);
        assert_eq!(segmenter.boundaries(&gray), vec![(450, 499)]);
        assert_eq!(segmenter.segment_rows(&gray), vec![0..499]);
    }

    #[test]
    fn segmentation_is_deterministic() {
        let gray = page_with_blank_bands(60, 900, &[(200, 260), (610, 700)]);
        let segmenter = BlankRowSegmenter::new(30);
        assert_eq!(segmenter.segment_rows(&gray), segmenter.segment_rows(&gray));
    }
}
