//! Reading the current context's OpenGL version, to pick the right
//! GLSL dialect.
use crate::gl;
use std::ffi::CStr;

/// Desktop OpenGL or OpenGL ES.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenGlApi {
    Desktop,
    ES,
}

/// The parsed `GL_VERSION` string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpenGlVersion {
    Available { api: OpenGlApi, major: u8, minor: u8 },
    /// The version string didn't look like anything known.
    Unavailable { version_string: String },
}

impl OpenGlVersion {
    /// The API the context seems to be, defaulting to desktop when
    /// the string couldn't be parsed.
    pub fn api(&self) -> OpenGlApi {
        match self {
            OpenGlVersion::Available { api, .. } => *api,
            OpenGlVersion::Unavailable { .. } => OpenGlApi::Desktop,
        }
    }
}

/// Reads and parses the current context's version string.
///
/// Requires a current context with loaded function pointers.
pub fn get_version() -> OpenGlVersion {
    let version_ptr = unsafe { gl::GetString(gl::VERSION) };
    if version_ptr.is_null() {
        return OpenGlVersion::Unavailable {
            version_string: String::new(),
        };
    }
    let version_string = unsafe { CStr::from_ptr(version_ptr as *const _) }
        .to_string_lossy()
        .into_owned();
    match parse_version(&version_string) {
        Some((api, major, minor)) => OpenGlVersion::Available { api, major, minor },
        None => OpenGlVersion::Unavailable { version_string },
    }
}

/// Parses strings like `"3.3.0 NVIDIA 440.82"`, `"OpenGL ES 3.2
/// Mesa 20.0"` and `"OpenGL ES-CM 1.1"`.
pub fn parse_version(version_string: &str) -> Option<(OpenGlApi, u8, u8)> {
    let (api, rest) = if version_string.starts_with("OpenGL ES") {
        // Skip the profile suffix of 1.x strings ("OpenGL ES-CM 1.1").
        let rest = version_string["OpenGL ES".len()..].trim_start_matches(|c: char| c != ' ');
        (OpenGlApi::ES, rest.trim_start())
    } else {
        (OpenGlApi::Desktop, version_string.trim_start())
    };

    let number = rest.split_whitespace().next()?;
    let mut parts = number.split('.');
    let major = leading_number(parts.next()?)?;
    let minor = leading_number(parts.next()?)?;
    Some((api, major, minor))
}

fn leading_number(s: &str) -> Option<u8> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or_else(|| s.len());
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_versions() {
        assert_eq!(parse_version("3.3.0 NVIDIA 440.82"), Some((OpenGlApi::Desktop, 3, 3)));
        assert_eq!(
            parse_version("4.6 (Core Profile) Mesa 20.0.8"),
            Some((OpenGlApi::Desktop, 4, 6))
        );
        assert_eq!(parse_version("2.1"), Some((OpenGlApi::Desktop, 2, 1)));
        assert_eq!(parse_version("2.1INTEL"), Some((OpenGlApi::Desktop, 2, 1)));
    }

    #[test]
    fn es_versions() {
        assert_eq!(parse_version("OpenGL ES 3.0 Mesa 19.2"), Some((OpenGlApi::ES, 3, 0)));
        assert_eq!(parse_version("OpenGL ES 2.0"), Some((OpenGlApi::ES, 2, 0)));
        assert_eq!(parse_version("OpenGL ES-CM 1.1"), Some((OpenGlApi::ES, 1, 1)));
    }

    #[test]
    fn broken_versions() {
        assert_eq!(parse_version(""), None);
        assert_eq!(parse_version("OpenGL ES"), None);
        assert_eq!(parse_version("three point three"), None);
        assert_eq!(parse_version("3"), None);
    }

    #[test]
    fn unavailable_defaults_to_desktop() {
        let version = OpenGlVersion::Unavailable {
            version_string: "???".to_string(),
        };
        assert_eq!(version.api(), OpenGlApi::Desktop);
    }
}
