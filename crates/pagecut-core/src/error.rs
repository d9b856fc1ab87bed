// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pagecut.

use thiserror::Error;

/// Top-level error type for all Pagecut operations.
#[derive(Debug, Error)]
pub enum PagecutError {
    // -- Image errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("invalid rectangle for image {image}: ({x0}, {y0}, {x1}, {y1})")]
    InvalidRectangle {
        image: String,
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
    },

    #[error("image not found in catalog: {0}")]
    UnknownImage(String),

    #[error("rotation must be a multiple of 90 degrees, got {0}")]
    InvalidRotation(i32),

    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagecutError>;
