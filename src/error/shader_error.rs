use std::error::Error;
use std::fmt;

/// Which half of the shader program failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Describes errors while building the quad shader program.
#[derive(Debug)]
pub enum ShaderError {
    /// A shader didn't compile. `log` is the driver's info log.
    Compile { stage: ShaderStage, log: String },
    /// The program didn't link. `log` is the driver's info log.
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{:?} shader compilation failed:\n{}", stage, log)
            }
            ShaderError::Link { log } => write!(f, "shader program linking failed:\n{}", log),
        }
    }
}

impl Error for ShaderError {}
