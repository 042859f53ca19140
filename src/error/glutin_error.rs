use std::error::Error;
use std::fmt;

/// Describes what went wrong while opening the slideshow window.
#[derive(Debug)]
pub enum GlutinError {
    /// The window's GL context couldn't be made current on this
    /// thread, or it was lost while the slideshow was running.
    ContextError(glutin::ContextError),
    /// No window could be opened, with either the modern or the
    /// legacy context settings.
    CreationError(glutin::CreationError),
}

impl fmt::Display for GlutinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlutinError::ContextError(err) => write!(f, "the GL context is unusable: {}", err),
            GlutinError::CreationError(err) => {
                write!(f, "could not open the slideshow window: {}", err)
            }
        }
    }
}

impl Error for GlutinError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GlutinError::ContextError(err) => Some(err),
            GlutinError::CreationError(err) => Some(err),
        }
    }
}

impl From<glutin::CreationError> for GlutinError {
    fn from(error: glutin::CreationError) -> GlutinError {
        GlutinError::CreationError(error)
    }
}

// `make_current` hands back the context it failed on; only the error
// is kept.
impl<T> From<(T, glutin::ContextError)> for GlutinError {
    fn from((_, error): (T, glutin::ContextError)) -> GlutinError {
        GlutinError::ContextError(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_make_current_keeps_only_the_error() {
        let err = GlutinError::from(("context", glutin::ContextError::ContextLost));
        match &err {
            GlutinError::ContextError(glutin::ContextError::ContextLost) => {}
            other => panic!("unexpected error {:?}", other),
        }
        assert!(err.to_string().starts_with("the GL context is unusable: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn creation_errors_name_the_window() {
        let err = GlutinError::from(glutin::CreationError::OpenGlVersionNotSupported);
        assert!(err.to_string().starts_with("could not open the slideshow window: "));
    }
}
