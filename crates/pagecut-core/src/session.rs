// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canvas adapter — turns pointer gestures from an interactive viewer into
// discrete annotation operations, and keeps per-page view transforms that are
// never persisted.

use std::collections::HashMap;

use tracing::debug;

use crate::annotation::AnnotationState;
use crate::types::{Edge, Point, Rectangle};

/// Zoom factor and scene centre of the viewer for one page.
///
/// Opaque to the core: stored and handed back, never interpreted or saved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub zoom: f64,
    pub center: Point,
}

/// Gesture and view bookkeeping for one viewer.
///
/// A viewer calls the `on_*` hooks in order; each hook resolves into at most
/// one call on the page's [`AnnotationState`].
#[derive(Debug, Default)]
pub struct CanvasSession {
    drag: Option<(Point, Point)>,
    views: HashMap<String, ViewTransform>,
}

impl CanvasSession {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Rubber-band drawing --------------------------------------------------

    /// Begin drawing a new rectangle at `point`.
    pub fn on_drag_start(&mut self, point: Point) {
        self.drag = Some((point, point));
    }

    /// Track the pointer. Returns the preview rectangle, if any.
    pub fn on_drag_update(&mut self, point: Point) -> Option<Rectangle> {
        let (start, current) = self.drag.as_mut()?;
        *current = point;
        Rectangle::from_corners(*start, point)
    }

    /// Finish the gesture and add the spanned rectangle to `state`.
    ///
    /// Returns `false` when no drag was active or the rectangle was too small.
    pub fn on_drag_end(&mut self, state: &mut AnnotationState, point: Point) -> bool {
        let Some((start, _)) = self.drag.take() else {
            return false;
        };
        match Rectangle::from_corners(start, point) {
            Some(rect) => state.add_rectangle(rect),
            None => {
                debug!("Drag ended on its start point; nothing drawn");
                false
            }
        }
    }

    /// Abandon a drag without touching any state.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // -- Editing --------------------------------------------------------------

    /// Drag one edge of an existing rectangle to the pointer position.
    pub fn on_edge_drag(
        &mut self,
        state: &mut AnnotationState,
        index: usize,
        edge: Edge,
        point: Point,
    ) -> bool {
        let position = if edge.is_vertical() { point.x } else { point.y };
        state.resize_rectangle(index, edge, position)
    }

    pub fn on_undo(&mut self, state: &mut AnnotationState) -> Option<Rectangle> {
        state.remove_last_rectangle()
    }

    // -- View transforms ------------------------------------------------------

    /// Last view transform recorded for the page named `image`.
    pub fn view(&self, image: &str) -> Option<&ViewTransform> {
        self.views.get(image)
    }

    pub fn set_view(&mut self, image: impl Into<String>, view: ViewTransform) {
        self.views.insert(image.into(), view);
    }

    /// Forget all view transforms, e.g. after the catalog is reloaded.
    pub fn clear_views(&mut self) {
        self.views.clear();
    }
}
