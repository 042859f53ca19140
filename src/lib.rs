//! A tiny slideshow: every PNG image in a directory is drawn as a
//! textured quad, one image per frame, with the frames per second
//! shown in the corner.
//!
//! The interesting part is [`FrameClock`](struct.FrameClock.html),
//! which counts frames, averages them once per second, and paces
//! rendering when a frame-rate limit is set. Everything else is the
//! window, the OpenGL plumbing and the images.

#[allow(missing_docs, clippy::all, non_upper_case_globals, non_snake_case)]
pub mod gl {
    //! OpenGL bindings generated by `gl_generator`.
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

mod app;
pub mod error;
mod frame_clock;
pub mod gallery;
pub mod gl_version;
mod image;
pub mod overlay;
pub mod renderer;
mod settings;
pub mod shaders;
pub mod timer;
mod window;

pub use crate::app::{Slideshow, FPS_PERIOD};
pub use crate::error::Error;
pub use crate::frame_clock::{FpsSample, FrameClock, RenderScheduler};
pub use crate::image::Image;
pub use crate::settings::{Command, Settings, USAGE};
pub use crate::window::Window;
