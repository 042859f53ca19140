use crate::error::SettingsError;
use std::default::Default;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Prefix of every environment variable read by
/// [`Settings::from_env`](struct.Settings.html#method.from_env).
pub const ENV_PREFIX: &str = "QUADSHOW_";

/// What the slideshow should look like and how fast it should go.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Title of the window. Default value: Name of the executable file.
    pub title: String,
    /// Width of the window in logical pixels. Default value: `640`.
    pub width: u32,
    /// Height of the window in logical pixels. Default value: `480`.
    pub height: u32,
    /// The color behind the slides, as RGBA in 0.0 - 1.0. Default
    /// value: opaque black.
    pub clear_color: [f32; 4],
    /// Default value: `true`.
    pub vsync: bool,
    /// Maximum frames per second. Default value: `None`, which
    /// renders as fast as the event loop (and vsync) allows.
    pub fps_limit: Option<u32>,
    /// Where to look for `.png` files. Default value: `None`, which
    /// means the executable's directory.
    pub image_dir: Option<PathBuf>,
    /// Skip trying to get a GL 3.3 context and go straight for 2.1.
    /// Default value: `false`.
    pub opengl_legacy: bool,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            title: env::current_exe()
                .ok()
                .and_then(|p| p.file_name().map(std::ffi::OsStr::to_os_string))
                .and_then(|s| s.into_string().ok())
                .unwrap_or_default(),
            width: 640,
            height: 480,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vsync: true,
            fps_limit: None,
            image_dir: None,
            opengl_legacy: false,
        }
    }
}

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Run(Settings),
    Help,
}

pub const USAGE: &str = "\
Usage: quadshow [IMAGE_DIR]

Cycles through the .png files in IMAGE_DIR (default: the directory of
the executable), one per frame, with an FPS counter on top.

Environment:
    QUADSHOW_FPS_LIMIT       maximum frames per second (positive integer)
    QUADSHOW_IMAGE_DIR       image directory, if not given as an argument
    QUADSHOW_CLEAR_COLOR     background color as #rrggbb or #rrggbbaa
    QUADSHOW_VSYNC           set to 0 or false to disable vsync
    QUADSHOW_OPENGL_LEGACY   set to anything to force OpenGL 2.1
    RUST_LOG                 log filter (default: info)";

impl Settings {
    /// The default settings, overridden by the `QUADSHOW_*`
    /// environment variables.
    pub fn from_env() -> Result<Settings, SettingsError> {
        Settings::from_vars(|name| env::var_os(name))
    }

    /// Like [`from_env`](#method.from_env), with a custom variable
    /// lookup. `get` is called with the full variable name.
    pub fn from_vars<F: Fn(&str) -> Option<OsString>>(get: F) -> Result<Settings, SettingsError> {
        let mut settings = Settings::default();
        let var = |suffix: &str| -> Result<Option<(String, String)>, SettingsError> {
            let name = format!("{}{}", ENV_PREFIX, suffix);
            match get(&name) {
                None => Ok(None),
                Some(value) => match value.into_string() {
                    Ok(value) => Ok(Some((name, value))),
                    Err(value) => Err(SettingsError::InvalidValue {
                        name,
                        value: value.to_string_lossy().into_owned(),
                    }),
                },
            }
        };

        if let Some((name, value)) = var("FPS_LIMIT")? {
            settings.fps_limit = Some(parse_fps_limit(&value).ok_or_else(|| invalid(name, value))?);
        }
        // Paths don't have to be UTF-8.
        if let Some(value) = get(&format!("{}IMAGE_DIR", ENV_PREFIX)) {
            if !value.is_empty() {
                settings.image_dir = Some(PathBuf::from(value));
            }
        }
        if let Some((name, value)) = var("CLEAR_COLOR")? {
            settings.clear_color = parse_color(&value).ok_or_else(|| invalid(name, value))?;
        }
        if let Some((name, value)) = var("VSYNC")? {
            settings.vsync = parse_bool(&value).ok_or_else(|| invalid(name, value))?;
        }
        if var("OPENGL_LEGACY")?.is_some() {
            settings.opengl_legacy = true;
        }
        Ok(settings)
    }

    /// Applies the command line arguments (without the program
    /// name) on top of these settings.
    pub fn with_args<I, S>(mut self, args: I) -> Result<Command, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut image_dir = None;
        for arg in args {
            let arg = arg.into();
            if arg == "-h" || arg == "--help" {
                return Ok(Command::Help);
            } else if arg.to_string_lossy().starts_with('-') || image_dir.is_some() {
                return Err(SettingsError::UnknownArgument(
                    arg.to_string_lossy().into_owned(),
                ));
            } else {
                image_dir = Some(PathBuf::from(arg));
            }
        }
        if image_dir.is_some() {
            self.image_dir = image_dir;
        }
        Ok(Command::Run(self))
    }
}

fn invalid(name: String, value: String) -> SettingsError {
    SettingsError::InvalidValue { name, value }
}

fn parse_fps_limit(value: &str) -> Option<u32> {
    value.trim().parse().ok().filter(|&limit| limit > 0)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses `#rrggbb` or `#rrggbbaa` (the `#` is optional).
fn parse_color(value: &str) -> Option<[f32; 4]> {
    let hex = value.trim();
    let hex = if hex.starts_with('#') { &hex[1..] } else { hex };
    if (hex.len() != 6 && hex.len() != 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(3)? } else { 0xFF };
    let to_float = |c: u8| f32::from(c) / 255.0;
    Some([
        to_float(channel(0)?),
        to_float(channel(1)?),
        to_float(channel(2)?),
        to_float(alpha),
    ])
}
