//! The error types that `quadshow` can return.

mod quadshow_error;
pub use quadshow_error::Error;

mod image_png_error;
pub use image_png_error::PngLoadingError;

mod gallery_error;
pub use gallery_error::GalleryError;

mod glutin_error;
pub use glutin_error::GlutinError;

mod shader_error;
pub use shader_error::{ShaderError, ShaderStage};

mod settings_error;
pub use settings_error::SettingsError;
