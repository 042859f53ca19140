use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Describes errors while looking for images to show.
#[derive(Debug)]
pub enum GalleryError {
    /// The image directory couldn't be listed.
    ReadDir {
        /// The directory that was being listed.
        path: PathBuf,
        /// What went wrong.
        source: io::Error,
    },
    /// An image file couldn't be read.
    ReadFile {
        /// The file that was being read.
        path: PathBuf,
        /// What went wrong.
        source: io::Error,
    },
    /// The location of the running executable couldn't be found, so
    /// there's no default image directory.
    ExecutableDir(io::Error),
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryError::ReadDir { path, source } => {
                write!(f, "could not read directory {}: {}", path.display(), source)
            }
            GalleryError::ReadFile { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            GalleryError::ExecutableDir(err) => {
                write!(f, "could not find the executable's directory: {}", err)
            }
        }
    }
}

impl Error for GalleryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GalleryError::ReadDir { source, .. } => Some(source),
            GalleryError::ReadFile { source, .. } => Some(source),
            GalleryError::ExecutableDir(err) => Some(err),
        }
    }
}
