// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the operator running a split or export.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::PagecutError;

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operator must fix something (a rectangle, a path) and re-run.
    ActionRequired,
    /// Retrying will not help: wrong format, damaged file, etc.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the operator should try.
    pub suggestion: String,
    pub severity: Severity,
}

impl HumanError {
    /// Process exit status: 2 when the operator can fix the input and re-run,
    /// 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self.severity {
            Severity::ActionRequired => 2,
            Severity::Permanent => 1,
        }
    }
}

/// Convert a `PagecutError` into a `HumanError`.
pub fn humanize_error(err: &PagecutError) -> HumanError {
    match err {
        PagecutError::ImageError(detail) => HumanError {
            message: "A page image could not be read or written.".into(),
            suggestion: format!(
                "Check that the file is a valid PNG, JPEG, or BMP and that the disk is not full. ({detail})"
            ),
            severity: Severity::Permanent,
        },

        PagecutError::InvalidRectangle { image, .. } => HumanError {
            message: format!("A rectangle on {image} lies outside the page."),
            suggestion: "Remove or redraw that rectangle (it may predate a rotation), then export again.".into(),
            severity: Severity::ActionRequired,
        },

        PagecutError::UnknownImage(name) => HumanError {
            message: format!("There is no page called {name}."),
            suggestion: "Run `pagecut status` to list the pages in the input directory.".into(),
            severity: Severity::ActionRequired,
        },

        PagecutError::InvalidRotation(degrees) => HumanError {
            message: format!("Pages can only be turned in quarter turns, not {degrees} degrees."),
            suggestion: "Use 90, 180, or 270.".into(),
            severity: Severity::ActionRequired,
        },

        PagecutError::Config(detail) => HumanError {
            message: "The configuration could not be loaded.".into(),
            suggestion: format!("Check the path given to --config. ({detail})"),
            severity: Severity::ActionRequired,
        },

        PagecutError::Io(io_err) => humanize_io_error(io_err),

        PagecutError::Serialization(_) => HumanError {
            message: "The configuration file is not valid JSON.".into(),
            suggestion: "Fix the syntax or delete the file to use the defaults.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

fn humanize_io_error(err: &std::io::Error) -> HumanError {
    match err.kind() {
        std::io::ErrorKind::NotFound => HumanError {
            message: "A file or folder is missing.".into(),
            suggestion: "Check that the input directory exists and contains page images.".into(),
            severity: Severity::ActionRequired,
        },
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: "Pagecut is not allowed to access a file.".into(),
            suggestion: "Check the permissions of the input and output directories.".into(),
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: "Reading or writing a file failed.".into(),
            suggestion: format!("Details: {err}"),
            severity: Severity::Permanent,
        },
    }
}
