// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagecut-document — Page processing for Pagecut.
//
// Provides the page catalog, blank-row segmentation, the annotation state
// file, crop export, and the batch step that bakes pending rotations into the
// source images.

pub mod catalog;
pub mod export;
pub mod image;
pub mod rotation;
pub mod scan;
pub mod state_store;

// Re-export the primary structs so callers can use `pagecut_document::ImageCatalog` etc.
pub use catalog::{CatalogEntry, ImageCatalog, SourceImage};
pub use export::CropExporter;
pub use crate::image::processor::ImageProcessor;
pub use rotation::{RotationApplier, RotationReport};
pub use scan::segment::BlankRowSegmenter;
pub use scan::split::AutoSplitter;
pub use state_store::{LoadReport, ParseIssue, StateStore};
