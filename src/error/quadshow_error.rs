use crate::error::{GalleryError, GlutinError, PngLoadingError, SettingsError, ShaderError};

use std::fmt;

/// A generic error type that wraps the other error types in the
/// [`quadshow::error`](index.html) module.
#[derive(Debug)]
pub enum Error {
    /// See [`PngLoadingError`](enum.PngLoadingError.html).
    PngLoadingError(PngLoadingError),
    /// See [`GalleryError`](enum.GalleryError.html).
    GalleryError(GalleryError),
    /// See [`GlutinError`](enum.GlutinError.html).
    GlutinError(GlutinError),
    /// See [`ShaderError`](enum.ShaderError.html).
    ShaderError(ShaderError),
    /// See [`SettingsError`](enum.SettingsError.html).
    SettingsError(SettingsError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;
        match self {
            PngLoadingError(err) => write!(f, "{}", err),
            GalleryError(err) => write!(f, "{}", err),
            GlutinError(err) => write!(f, "{}", err),
            ShaderError(err) => write!(f, "{}", err),
            SettingsError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;
        match self {
            PngLoadingError(err) => Some(err),
            GalleryError(err) => Some(err),
            GlutinError(err) => Some(err),
            ShaderError(err) => Some(err),
            SettingsError(err) => Some(err),
        }
    }
}

impl From<PngLoadingError> for Error {
    fn from(error: PngLoadingError) -> Error {
        Error::PngLoadingError(error)
    }
}

impl From<GalleryError> for Error {
    fn from(error: GalleryError) -> Error {
        Error::GalleryError(error)
    }
}

impl From<GlutinError> for Error {
    fn from(error: GlutinError) -> Error {
        Error::GlutinError(error)
    }
}

impl From<ShaderError> for Error {
    fn from(error: ShaderError) -> Error {
        Error::ShaderError(error)
    }
}

impl From<SettingsError> for Error {
    fn from(error: SettingsError) -> Error {
        Error::SettingsError(error)
    }
}
