// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagecut — Core types, annotation model, and error definitions shared across
// all crates.

pub mod annotation;
pub mod config;
pub mod error;
pub mod human_errors;
pub mod session;
pub mod types;

pub use annotation::AnnotationState;
pub use config::AppConfig;
pub use error::PagecutError;
pub use session::{CanvasSession, ViewTransform};
pub use types::*;
