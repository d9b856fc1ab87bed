// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core geometry and rotation types for page annotation.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// File extensions recognised as page images (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Whether a file name looks like a page image.
///
/// The same rule is used for directory scanning and for detecting block
/// headers in the state file.
pub fn is_supported_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// A point in display-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in the coordinate space of the displayed
/// (already rotated) page. Width and height are always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rectangle {
    /// Build a rectangle, returning `None` unless both sides are positive.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        if width > 0.0 && height > 0.0 {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        } else {
            None
        }
    }

    /// Rectangle spanned by two arbitrary corners (drag start and end).
    pub fn from_corners(a: Point, b: Point) -> Option<Self> {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self::new(left, top, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Integer `(x, y, w, h)` as written to the state file (truncated toward
    /// zero).
    pub fn truncated(&self) -> (i64, i64, i64, i64) {
        (
            self.x.trunc() as i64,
            self.y.trunc() as i64,
            self.width.trunc() as i64,
            self.height.trunc() as i64,
        )
    }
}

/// One side of a rectangle, used for single-edge resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Whether the edge moves along the x axis.
    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Pending display rotation, clockwise. Only quarter turns exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Normalise any multiple of 90 into `[0, 360)`. Other values are
    /// rejected.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::Deg0
    }

    /// Compose with another clockwise rotation.
    pub fn rotated_by(self, delta: Rotation) -> Self {
        match (self.degrees() + delta.degrees()) % 360 {
            90 => Self::Deg90,
            180 => Self::Deg180,
            270 => Self::Deg270,
            _ => Self::Deg0,
        }
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_image_is_case_insensitive() {
        assert!(is_supported_image("page_01.png"));
        assert!(is_supported_image("PAGE_01.JPG"));
        assert!(is_supported_image("scan.Jpeg"));
        assert!(is_supported_image("scan.bmp"));
        assert!(!is_supported_image("notes.txt"));
        assert!(!is_supported_image("png"));
        assert!(!is_supported_image("archive.png.zip"));
    }

    #[test]
    fn rectangle_requires_positive_sides() {
        assert!(Rectangle::new(0.0, 0.0, 1.0, 1.0).is_some());
        assert!(Rectangle::new(0.0, 0.0, 0.0, 5.0).is_none());
        assert!(Rectangle::new(0.0, 0.0, 5.0, -1.0).is_none());
    }

    #[test]
    fn rectangle_from_corners_normalises() {
        let rect = Rectangle::from_corners(Point::new(50.0, 80.0), Point::new(10.0, 20.0)).unwrap();
        assert_eq!((rect.x(), rect.y()), (10.0, 20.0));
        assert_eq!((rect.width(), rect.height()), (40.0, 60.0));
        assert_eq!((rect.right(), rect.bottom()), (50.0, 80.0));
    }

    #[test]
    fn truncation_rounds_toward_zero() {
        let rect = Rectangle::new(-3.7, 4.9, 20.5, 11.99).unwrap();
        assert_eq!(rect.truncated(), (-3, 4, 20, 11));
    }

    #[test]
    fn rotation_normalises_multiples_of_ninety() {
        assert_eq!(Rotation::from_degrees(0), Some(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(450), Some(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(720), Some(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(45), None);
    }

    #[test]
    fn rotation_composition_wraps() {
        assert_eq!(Rotation::Deg270.rotated_by(Rotation::Deg90), Rotation::Deg0);
        assert_eq!(Rotation::Deg180.rotated_by(Rotation::Deg180), Rotation::Deg0);
        assert_eq!(Rotation::Deg90.rotated_by(Rotation::Deg90), Rotation::Deg180);
        assert_eq!(Rotation::Deg270.to_string(), "270");
    }
}
