// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Manual annotation commands. Each one applies a single edit to one page and
// saves the state file when the edit took effect.

use pagecut_core::error::{PagecutError, Result};
use pagecut_core::{Edge, Rectangle, Rotation};
use tracing::{info, warn};

use crate::project::Project;

pub fn rotate(project: &mut Project, image: &str, degrees: i32) -> Result<()> {
    let delta = Rotation::from_degrees(degrees).ok_or(PagecutError::InvalidRotation(degrees))?;
    let entry = project.catalog.require_mut(image)?;
    entry.state.rotate(delta);
    info!(image, angle = %entry.state.angle, "Pending rotation updated");
    project.save()
}

pub fn add_rect(
    project: &mut Project,
    image: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<()> {
    let entry = project.catalog.require_mut(image)?;
    let added = Rectangle::new(x, y, width, height).is_some_and(|rect| entry.state.add_rectangle(rect));
    if !added {
        warn!(image, width, height, "Rectangle not added: both sides must exceed 10 px");
        return Ok(());
    }
    info!(image, rects = entry.state.rects.len(), "Rectangle added");
    project.save()
}

pub fn resize(
    project: &mut Project,
    image: &str,
    index: usize,
    edge: Edge,
    position: f64,
) -> Result<()> {
    let entry = project.catalog.require_mut(image)?;
    if !entry.state.resize_rectangle(index, edge, position) {
        warn!(image, index, ?edge, position, "Resize rejected; rectangle unchanged");
        return Ok(());
    }
    info!(image, index, ?edge, position, "Rectangle resized");
    project.save()
}

pub fn undo(project: &mut Project, image: &str) -> Result<()> {
    let entry = project.catalog.require_mut(image)?;
    match entry.state.remove_last_rectangle() {
        Some(_) => {
            info!(image, rects = entry.state.rects.len(), "Last rectangle removed");
            project.save()
        }
        None => {
            info!(image, "Nothing to undo");
            Ok(())
        }
    }
}
