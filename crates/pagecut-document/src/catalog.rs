// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page catalog — the ordered list of source pages in the input directory, each
// paired with its annotation state.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use image::DynamicImage;
use pagecut_core::error::{PagecutError, Result};
use pagecut_core::{AnnotationState, is_supported_image};
use tracing::{debug, info, instrument};

use crate::image::processor::ImageProcessor;

/// Decoded pixels together with the file timestamp they were read at.
struct CachedPixels {
    image: DynamicImage,
    modified: Option<SystemTime>,
}

/// One source page on disk.
///
/// Dimensions are read from the file header when the page is cataloged;
/// pixels are decoded on first use and decoded again only when the file's
/// modification time changes.
pub struct SourceImage {
    path: PathBuf,
    name: String,
    width: u32,
    height: u32,
    cache: Option<CachedPixels>,
}

impl SourceImage {
    /// Reference a page file without decoding its pixels.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
            .ok_or_else(|| {
                PagecutError::ImageError(format!("not a page file name: {}", path.display()))
            })?;
        let (width, height) = image::image_dimensions(&path).map_err(|err| {
            PagecutError::ImageError(format!("failed to read {}: {}", path.display(), err))
        })?;
        Ok(Self {
            path,
            name,
            width,
            height,
            cache: None,
        })
    }

    /// Page backed only by pixels in memory. `name` doubles as its path.
    pub fn from_dynamic(name: impl Into<String>, image: DynamicImage) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            width: image.width(),
            height: image.height(),
            name,
            cache: Some(CachedPixels {
                image,
                modified: None,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name with extension; the identity key of the page.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name without extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(self.name.as_str())
    }

    /// Stored (unrotated) dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Decoded pixels, re-read from disk if the file changed since the last
    /// decode.
    pub fn pixels(&mut self) -> Result<&DynamicImage> {
        let modified = file_modified(&self.path);
        let stale = match &self.cache {
            None => true,
            Some(cached) => modified.is_some() && cached.modified != modified,
        };

        if stale {
            let image = ImageProcessor::open(&self.path)?.into_dynamic();
            debug!(name = %self.name, "Page pixels decoded");
            self.width = image.width();
            self.height = image.height();
            self.cache = Some(CachedPixels { image, modified });
        }

        match &self.cache {
            Some(cached) => Ok(&cached.image),
            None => Err(PagecutError::ImageError(format!(
                "no pixels for {}",
                self.path.display()
            ))),
        }
    }

    /// Adopt pixels that were just written to the backing file.
    pub fn replace_pixels(&mut self, image: DynamicImage) {
        self.width = image.width();
        self.height = image.height();
        self.cache = Some(CachedPixels {
            image,
            modified: file_modified(&self.path),
        });
    }
}

fn file_modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

/// A page and its annotation state.
pub struct CatalogEntry {
    pub source: SourceImage,
    pub state: AnnotationState,
}

impl CatalogEntry {
    pub fn new(source: SourceImage) -> Self {
        Self {
            source,
            state: AnnotationState::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// The page as displayed: stored pixels with the pending rotation applied.
    pub fn display_image(&mut self) -> Result<DynamicImage> {
        let angle = self.state.angle;
        let pixels = self.source.pixels()?.clone();
        Ok(ImageProcessor::from_dynamic(pixels).rotate(angle).into_dynamic())
    }
}

/// Pages of one input directory in file-name order.
#[derive(Default)]
pub struct ImageCatalog {
    entries: Vec<CatalogEntry>,
}

impl ImageCatalog {
    /// Catalog every supported page image directly inside `dir`.
    ///
    /// Every page starts with default annotation state.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            if file_name.to_str().is_some_and(is_supported_image) {
                paths.push(entry.path());
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let entries = paths
            .into_iter()
            .map(|path| SourceImage::open(path).map(CatalogEntry::new))
            .collect::<Result<Vec<_>>>()?;

        info!(pages = entries.len(), "Catalog loaded");
        Ok(Self { entries })
    }

    /// Catalog of in-memory pages, sorted by name like a directory scan.
    pub fn from_images(images: impl IntoIterator<Item = (String, DynamicImage)>) -> Self {
        let mut entries: Vec<CatalogEntry> = images
            .into_iter()
            .map(|(name, image)| CatalogEntry::new(SourceImage::from_dynamic(name, image)))
            .collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [CatalogEntry] {
        &mut self.entries
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name() == name)
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut CatalogEntry> {
        self.entries.iter_mut().find(|entry| entry.name() == name)
    }

    /// Like [`get_mut`](Self::get_mut), failing with `UnknownImage`.
    pub fn require_mut(&mut self, name: &str) -> Result<&mut CatalogEntry> {
        self.get_mut(name)
            .ok_or_else(|| PagecutError::UnknownImage(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use pagecut_core::Rotation;

    fn gray(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([200u8])))
    }

    #[test]
    fn open_lists_supported_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        gray(4, 3).save(dir.path().join("b.png")).unwrap();
        gray(4, 3).save(dir.path().join("a.PNG")).unwrap();
        gray(5, 6).save(dir.path().join("c.bmp")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        std::fs::create_dir(dir.path().join("sub.png")).unwrap();

        let catalog = ImageCatalog::open(dir.path()).unwrap();
        let names: Vec<&str> = catalog.entries().iter().map(|entry| entry.name()).collect();
        assert_eq!(names, vec!["a.PNG", "b.png", "c.bmp"]);
        assert_eq!(catalog.get("c.bmp").unwrap().source.dimensions(), (5, 6));
        assert!(catalog.entries().iter().all(|entry| entry.state.is_default()));
    }

    #[test]
    fn open_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageCatalog::open(dir.path().join("raw")).err().unwrap();
        assert!(matches!(err, PagecutError::Io(_)));
    }

    #[test]
    fn pixels_are_redecoded_after_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        gray(4, 3).save(&path).unwrap();

        let mut source = SourceImage::open(&path).unwrap();
        assert_eq!(source.pixels().unwrap().width(), 4);

        // Push the timestamp forward so the change is visible even on
        // coarse-grained filesystems.
        gray(7, 2).save(&path).unwrap();
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + std::time::Duration::from_secs(5))
            .unwrap();

        assert_eq!(source.pixels().unwrap().width(), 7);
        assert_eq!(source.dimensions(), (7, 2));
    }

    #[test]
    fn display_image_applies_pending_rotation() {
        let mut catalog = ImageCatalog::from_images([("p.png".to_string(), gray(40, 10))]);
        let entry = catalog.get_mut("p.png").unwrap();
        entry.state.rotate(Rotation::Deg90);

        let display = entry.display_image().unwrap();
        assert_eq!((display.width(), display.height()), (10, 40));
        // The stored page itself is untouched.
        assert_eq!(entry.source.dimensions(), (40, 10));
    }

    #[test]
    fn lookups_by_name() {
        let mut catalog = ImageCatalog::from_images([
            ("q2.png".to_string(), gray(2, 2)),
            ("q1.png".to_string(), gray(2, 2)),
        ]);
        assert_eq!(catalog.position("q1.png"), Some(0));
        assert_eq!(catalog.get("q2.png").unwrap().source.stem(), "q2");
        assert!(matches!(
            catalog.require_mut("q3.png"),
            Err(PagecutError::UnknownImage(_))
        ));
    }
}
