// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Annotation state file — a flat, line-oriented text format holding one block
// per page that has a pending rotation or drawn rectangles.
//
// Format:
//   page_01.png
//   angle: 90
//   rect: 12,40,600,310
//   rect: 12,380,600,290
//   <blank line>
//
// Pages with default state (angle 0, no rectangles) are never written, so an
// absent block means "default".

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use pagecut_core::error::Result;
use pagecut_core::{AnnotationState, Rectangle, Rotation, is_supported_image};
use tracing::{debug, info, instrument};

use crate::catalog::ImageCatalog;

/// A state-file line that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

impl std::fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Outcome of loading a state file that exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Names of the catalog pages whose state was replaced from the file.
    pub applied: Vec<String>,
    /// Lines that were ignored, in file order.
    pub issues: Vec<ParseIssue>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Reads and writes the annotation state file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the state of every non-default page in catalog order.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, catalog: &ImageCatalog) -> Result<()> {
        let text = render_states(
            catalog
                .entries()
                .iter()
                .map(|entry| (entry.name(), &entry.state)),
        );
        std::fs::write(&self.path, text)?;
        info!("State file saved");
        Ok(())
    }

    /// Replace catalog state from the file.
    ///
    /// Returns `Ok(None)` when the file does not exist. An existing file,
    /// even an empty one, yields a report of what was applied and skipped.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn load(&self, catalog: &mut ImageCatalog) -> Result<Option<LoadReport>> {
        if !self.path.exists() {
            debug!("No state file");
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)?;
        let report = parse_states(&text, catalog);
        info!(
            applied = report.applied.len(),
            issues = report.issues.len(),
            "State file loaded"
        );
        Ok(Some(report))
    }
}

/// Serialize `(name, state)` pairs, omitting default states.
pub fn render_states<'a>(
    states: impl IntoIterator<Item = (&'a str, &'a AnnotationState)>,
) -> String {
    let mut out = String::new();
    for (name, state) in states {
        if state.is_default() {
            continue;
        }
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{name}");
        if !state.angle.is_identity() {
            let _ = writeln!(out, "angle: {}", state.angle);
        }
        for rect in &state.rects {
            let (x, y, w, h) = rect.truncated();
            let _ = writeln!(out, "rect: {x},{y},{w},{h}");
        }
        out.push('\n');
    }
    out
}

/// Where subsequent block lines go.
enum Block {
    /// Before the first header, or after a blank line.
    None,
    /// Header named a page that is not in the catalog.
    Skipped,
    /// Index of the catalog entry being filled.
    Page(usize),
}

/// Apply state-file text to the catalog.
///
/// Each recognised header resets its page to default before the block's
/// lines are applied, so a page ends up either default or exactly as written.
pub fn parse_states(text: &str, catalog: &mut ImageCatalog) -> LoadReport {
    let mut report = LoadReport::default();
    let mut block = Block::None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        let mut issue = |reason: String| {
            report.issues.push(ParseIssue {
                line: line_no,
                reason,
            })
        };

        if line.is_empty() {
            block = Block::None;
            continue;
        }

        if is_supported_image(line) {
            block = match catalog.position(line) {
                Some(position) => {
                    catalog.entries_mut()[position].state.reset();
                    report.applied.push(line.to_owned());
                    Block::Page(position)
                }
                None => {
                    issue(format!("unknown image {line:?}"));
                    Block::Skipped
                }
            };
            continue;
        }

        let position = match block {
            Block::Page(position) => position,
            Block::Skipped => continue,
            Block::None => {
                issue("line outside of an image block".into());
                continue;
            }
        };
        let state = &mut catalog.entries_mut()[position].state;

        if let Some(value) = line.strip_prefix("angle:") {
            match parse_angle(value) {
                Ok(angle) => state.angle = angle,
                Err(reason) => issue(reason),
            }
        } else if let Some(value) = line.strip_prefix("rect:") {
            match parse_rect(value) {
                Ok(rect) => state.rects.push(rect),
                Err(reason) => issue(reason),
            }
        } else {
            issue(format!("unrecognised line {line:?}"));
        }
    }

    report
}

fn parse_angle(value: &str) -> std::result::Result<Rotation, String> {
    let degrees: i32 = value
        .trim()
        .parse()
        .map_err(|_| format!("malformed angle {:?}", value.trim()))?;
    Rotation::from_degrees(degrees).ok_or_else(|| format!("angle {degrees} is not a multiple of 90"))
}

fn parse_rect(value: &str) -> std::result::Result<Rectangle, String> {
    let fields = value
        .trim()
        .split(',')
        .map(|field| field.trim().parse::<i64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| format!("malformed rect {:?}", value.trim()))?;

    let [x, y, w, h] = fields[..] else {
        return Err(format!("rect needs 4 values, got {}", fields.len()));
    };
    Rectangle::new(x as f64, y as f64, w as f64, h as f64)
        .ok_or_else(|| format!("rect {w}x{h} has no area"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};

    fn catalog(names: &[&str]) -> ImageCatalog {
        ImageCatalog::from_images(names.iter().map(|name| {
            (
                name.to_string(),
                DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([255u8]))),
            )
        }))
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(x, y, w, h).unwrap()
    }

    #[test]
    fn render_skips_default_states() {
        let mut rotated = AnnotationState::new();
        rotated.rotate(Rotation::Deg270);
        let mut boxed = AnnotationState::new();
        boxed.rects.push(rect(1.9, 2.0, 30.5, 40.0));

        let text = render_states([
            ("a.png", &AnnotationState::new()),
            ("b.png", &rotated),
            ("c.jpg", &boxed),
        ]);
        assert_eq!(text, "b.png\nangle: 270\n\nc.jpg\nrect: 1,2,30,40\n\n");
    }

    #[test]
    fn render_all_default_is_empty() {
        let text = render_states([("a.png", &AnnotationState::new())]);
        assert!(text.is_empty());
    }

    #[test]
    fn round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("image_states.txt"));

        let mut source = catalog(&["p1.png", "p2.png", "p3.png"]);
        {
            let p1 = &mut source.get_mut("p1.png").unwrap().state;
            p1.rotate(Rotation::Deg90);
            p1.rects.push(rect(10.0, 20.0, 300.0, 40.0));
            p1.rects.push(rect(10.0, 80.0, 300.0, 55.0));
            source.get_mut("p3.png").unwrap().state.rotate(Rotation::Deg180);
        }
        store.save(&source).unwrap();

        let mut fresh = catalog(&["p1.png", "p2.png", "p3.png"]);
        let report = store.load(&mut fresh).unwrap().unwrap();
        assert!(report.is_clean());
        assert_eq!(report.applied, vec!["p1.png", "p3.png"]);

        for name in ["p1.png", "p2.png", "p3.png"] {
            assert_eq!(fresh.get(name).unwrap().state, source.get(name).unwrap().state);
        }
        assert!(fresh.get("p2.png").unwrap().state.is_default());
    }

    #[test]
    fn missing_file_differs_from_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("image_states.txt"));
        let mut pages = catalog(&["p1.png"]);

        assert!(store.load(&mut pages).unwrap().is_none());

        std::fs::write(store.path(), "").unwrap();
        let report = store.load(&mut pages).unwrap().unwrap();
        assert!(report.applied.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn header_resets_existing_state() {
        let mut pages = catalog(&["p1.png"]);
        {
            let state = &mut pages.get_mut("p1.png").unwrap().state;
            state.rotate(Rotation::Deg90);
            state.rects.push(rect(0.0, 0.0, 50.0, 50.0));
        }

        parse_states("p1.png\nrect: 5,5,20,20\n", &mut pages);
        let state = &pages.get("p1.png").unwrap().state;
        assert_eq!(state.angle, Rotation::Deg0);
        assert_eq!(state.rects, vec![rect(5.0, 5.0, 20.0, 20.0)]);
    }

    #[test]
    fn malformed_lines_are_reported_and_skipped() {
        let mut pages = catalog(&["p1.png"]);
        let text = "\
p1.png
angle: ninety
angle: 45
rect: 1,2,3
rect: a,b,c,d
rect: 1,2,0,5
colour: red
rect: 1,2,30,40
";
        let report = parse_states(text, &mut pages);
        let lines: Vec<usize> = report.issues.iter().map(|issue| issue.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5, 6, 7]);

        let state = &pages.get("p1.png").unwrap().state;
        assert_eq!(state.angle, Rotation::Deg0);
        assert_eq!(state.rects, vec![rect(1.0, 2.0, 30.0, 40.0)]);
    }

    #[test]
    fn unknown_image_block_is_skipped_until_blank_line() {
        let mut pages = catalog(&["p1.png"]);
        let text = "gone.png\nangle: 90\nrect: 1,1,20,20\n\np1.png\nangle: 180\n";
        let report = parse_states(text, &mut pages);

        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].line, 1);
        assert_eq!(pages.get("p1.png").unwrap().state.angle, Rotation::Deg180);
    }

    #[test]
    fn stray_lines_before_first_header_are_ignored() {
        let mut pages = catalog(&["p1.png"]);
        let report = parse_states("angle: 90\nrect: 1,1,20,20\n\np1.png\n", &mut pages);

        assert_eq!(report.issues.len(), 2);
        assert!(pages.get("p1.png").unwrap().state.is_default());
        assert_eq!(report.applied, vec!["p1.png"]);
    }

    #[test]
    fn headers_are_detected_case_insensitively() {
        let mut pages = catalog(&["SCAN.JPG"]);
        parse_states("SCAN.JPG\nangle: -90\n", &mut pages);
        assert_eq!(pages.get("SCAN.JPG").unwrap().state.angle, Rotation::Deg270);
    }

    #[test]
    fn blank_line_ends_block() {
        let mut pages = catalog(&["p1.png"]);
        let report = parse_states("p1.png\n\nangle: 90\n", &mut pages);
        assert_eq!(report.issues.len(), 1);
        assert!(pages.get("p1.png").unwrap().state.is_default());
    }
}
