// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Catalog listing.

use crate::project::Project;

/// One line per page, followed by its indexed rectangles and then any
/// skipped state-file lines.
pub fn status_lines(project: &Project) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in project.catalog.entries() {
        let (width, height) = entry.source.dimensions();
        lines.push(format!(
            "{}  {width}x{height}  angle {}  {} rect(s)",
            entry.name(),
            entry.state.angle,
            entry.state.rects.len()
        ));
        for (index, rect) in entry.state.rects.iter().enumerate() {
            let (x, y, w, h) = rect.truncated();
            lines.push(format!("  [{index}] {x},{y} {w}x{h}"));
        }
    }

    if let Some(report) = &project.load_report {
        for issue in &report.issues {
            lines.push(format!("skipped {}: {issue}", project.store.path().display()));
        }
    }
    lines
}
