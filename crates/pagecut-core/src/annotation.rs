// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-page annotation record — pending rotation plus the ordered list of
// operator-drawn rectangles.

use tracing::debug;

use crate::types::{Edge, Rectangle, Rotation};

/// Smallest side length (exclusive) a drawn or resized rectangle may have.
pub const MIN_RECT_SIDE: f64 = 10.0;

/// Annotation state for one source page.
///
/// Rectangles live in the coordinate space of the page *as currently
/// displayed*, i.e. after `angle` has been applied. Changing the angle does
/// not re-project existing rectangles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationState {
    /// Pending clockwise rotation for display and export.
    pub angle: Rotation,
    /// Rectangles in insertion order; the last one is removed first on undo.
    pub rects: Vec<Rectangle>,
}

impl AnnotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing would be written to the state file for this page.
    pub fn is_default(&self) -> bool {
        self.angle.is_identity() && self.rects.is_empty()
    }

    /// Back to `angle = 0`, no rectangles.
    pub fn reset(&mut self) {
        self.angle = Rotation::Deg0;
        self.rects.clear();
    }

    /// Append a rectangle unless either side is at or below the minimum
    /// draggable size. Returns whether it was added.
    pub fn add_rectangle(&mut self, rect: Rectangle) -> bool {
        if rect.width() <= MIN_RECT_SIDE || rect.height() <= MIN_RECT_SIDE {
            debug!(
                width = rect.width(),
                height = rect.height(),
                "Rectangle below minimum size; ignored"
            );
            return false;
        }
        self.rects.push(rect);
        true
    }

    /// Move one edge of the rectangle at `index` to `position`, keeping the
    /// opposite edge fixed.
    ///
    /// The previous geometry is kept (and `false` returned) when the index is
    /// out of range or the result would be at or below the minimum size.
    pub fn resize_rectangle(&mut self, index: usize, edge: Edge, position: f64) -> bool {
        let Some(current) = self.rects.get(index).copied() else {
            return false;
        };

        let resized = match edge {
            Edge::Left => Rectangle::new(
                position,
                current.y(),
                current.right() - position,
                current.height(),
            ),
            Edge::Right => Rectangle::new(
                current.x(),
                current.y(),
                position - current.x(),
                current.height(),
            ),
            Edge::Top => Rectangle::new(
                current.x(),
                position,
                current.width(),
                current.bottom() - position,
            ),
            Edge::Bottom => Rectangle::new(
                current.x(),
                current.y(),
                current.width(),
                position - current.y(),
            ),
        };

        match resized {
            Some(rect) if rect.width() > MIN_RECT_SIDE && rect.height() > MIN_RECT_SIDE => {
                self.rects[index] = rect;
                true
            }
            _ => {
                debug!(index, ?edge, position, "Resize rejected");
                false
            }
        }
    }

    /// Undo the most recent rectangle. No-op on an empty list.
    pub fn remove_last_rectangle(&mut self) -> Option<Rectangle> {
        self.rects.pop()
    }

    /// Add `delta` to the pending rotation. Rectangles are left untouched.
    pub fn rotate(&mut self, delta: Rotation) {
        self.angle = self.angle.rotated_by(delta);
    }

    /// Quarter turn clockwise, the toolbar default.
    pub fn rotate_clockwise(&mut self) {
        self.rotate(Rotation::Deg90);
    }
}
