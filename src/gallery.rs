//! Finding and cycling through the images to show.

use crate::error::{Error, GalleryError};
use crate::image::Image;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// One loaded image, and where it came from.
#[derive(Clone, Debug)]
pub struct Slide {
    pub path: PathBuf,
    pub image: Image,
}

impl Slide {
    /// Reads and decodes one PNG file.
    pub fn load(path: &Path) -> Result<Slide, Error> {
        let bytes = fs::read(path).map_err(|source| GalleryError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let image = Image::from_png(&bytes)?;
        Ok(Slide {
            path: path.to_path_buf(),
            image,
        })
    }
}

/// The images to show, in order, and which one is next.
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    slides: Vec<Slide>,
    current: usize,
}

impl Gallery {
    /// Loads every PNG file in `dir`, in file name order.
    ///
    /// Files that can't be read or decoded are skipped with a
    /// warning. Finding no images at all is not an error, there'll
    /// just be nothing to draw.
    pub fn load(dir: &Path) -> Result<Gallery, GalleryError> {
        let mut slides = Vec::new();
        for path in find_png_files(dir)? {
            match Slide::load(&path) {
                Ok(slide) => {
                    log::debug!(
                        "Loaded {} ({}x{})",
                        path.display(),
                        slide.image.width,
                        slide.image.height
                    );
                    slides.push(slide);
                }
                Err(err) => log::warn!("Skipping {}: {}", path.display(), err),
            }
        }
        log::info!("Found {} image(s) in {}", slides.len(), dir.display());
        Ok(Gallery { slides, current: 0 })
    }

    /// Creates a gallery out of already loaded slides.
    pub fn from_slides(slides: Vec<Slide>) -> Gallery {
        Gallery { slides, current: 0 }
    }

    /// Returns the slide to draw now, and moves on to the next one,
    /// wrapping around at the end.
    pub fn advance(&mut self) -> Option<(usize, &Slide)> {
        if self.slides.is_empty() {
            return None;
        }
        let index = self.current;
        self.current = (self.current + 1) % self.slides.len();
        Some((index, &self.slides[index]))
    }

    /// The index of the slide the next `advance` will return.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Lists the files in `dir` that end in `.png` (any case), sorted
/// by file name.
pub fn find_png_files(dir: &Path) -> Result<Vec<PathBuf>, GalleryError> {
    let read_dir_error = |source| GalleryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let path = entry.path();
        if is_png_name(&path) && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// The directory the running executable is in.
pub fn default_image_dir() -> Result<PathBuf, GalleryError> {
    let exe = env::current_exe().map_err(GalleryError::ExecutableDir)?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

fn is_png_name(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}
