// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — blank-row segmentation and the batch auto-split over a
// whole catalog.

pub mod segment;
pub mod split;

pub use segment::BlankRowSegmenter;
pub use split::AutoSplitter;
