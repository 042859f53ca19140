use std::error::Error;
use std::fmt;

/// Describes errors related to decoding PNG files.
#[derive(Debug)]
pub enum PngLoadingError {
    /// The decoder couldn't expand the image to 8 or 16 bits per
    /// channel.
    UnsupportedBitDepth(png::BitDepth),
    /// The decoded pixel data doesn't match the image's dimensions.
    InvalidDimensions {
        /// Width of the image in pixels.
        width: u32,
        /// Height of the image in pixels.
        height: u32,
        /// How many bytes the decoder produced.
        len: usize,
    },
    /// If the data isn't a valid PNG image, this will describe the
    /// details.
    PngError(png::DecodingError),
}

impl fmt::Display for PngLoadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PngLoadingError::*;
        match self {
            UnsupportedBitDepth(bit_depth) => {
                write!(f, "unsupported bit depth (not 8 or 16): {:?}", bit_depth)
            }
            InvalidDimensions { width, height, len } => write!(
                f,
                "decoded {} bytes, which doesn't fit a {}x{} image",
                len, width, height
            ),
            PngError(err) => write!(f, "{}", err),
        }
    }
}

impl Error for PngLoadingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PngLoadingError::PngError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<png::DecodingError> for PngLoadingError {
    fn from(other: png::DecodingError) -> PngLoadingError {
        PngLoadingError::PngError(other)
    }
}
