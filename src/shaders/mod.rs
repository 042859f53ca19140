//! The textured quad shader program.

use crate::error::{ShaderError, ShaderStage};
use crate::gl;
use crate::gl::types::*;
use crate::gl_version::OpenGlApi;
use std::ptr;

/// Attribute location of the vertex position.
pub const VERTEX_ATTRIBUTE: GLuint = 0;
/// Attribute location of the texture coordinate.
pub const TEXCOORD_ATTRIBUTE: GLuint = 1;

static QUAD_VERT_330: &str = include_str!("quad.vert");
static QUAD_FRAG_330: &str = include_str!("quad.frag");
static QUAD_VERT_110: &str = include_str!("legacy/quad.vert");
static QUAD_FRAG_110: &str = include_str!("legacy/quad.frag");

/// Returns the shader source for `stage`, with a `#version` header
/// that fits the context.
pub fn shader_source(stage: ShaderStage, api: OpenGlApi, legacy: bool) -> String {
    let body = match (stage, legacy) {
        (ShaderStage::Vertex, false) => QUAD_VERT_330,
        (ShaderStage::Fragment, false) => QUAD_FRAG_330,
        (ShaderStage::Vertex, true) => QUAD_VERT_110,
        (ShaderStage::Fragment, true) => QUAD_FRAG_110,
    };
    let version = match (api, legacy) {
        (OpenGlApi::Desktop, false) => "#version 330",
        (OpenGlApi::Desktop, true) => "#version 110",
        (OpenGlApi::ES, false) => "#version 300 es",
        (OpenGlApi::ES, true) => "#version 100",
    };
    let mut source = String::with_capacity(body.len() + 48);
    source += version;
    source += "\n";
    if api == OpenGlApi::ES {
        source += "precision mediump float;\n";
    }
    source + body
}

/// A linked program with the quad shaders, and its uniform locations.
pub struct ShaderProgram {
    pub program: GLuint,
    pub matrix_location: GLint,
}

impl ShaderProgram {
    /// Compiles and links the quad program. The sampler is pointed at
    /// texture unit 0.
    pub fn new(api: OpenGlApi, legacy: bool) -> Result<ShaderProgram, ShaderError> {
        let vert_source = shader_source(ShaderStage::Vertex, api, legacy);
        let frag_source = shader_source(ShaderStage::Fragment, api, legacy);
        unsafe {
            let vert = compile(ShaderStage::Vertex, &vert_source)?;
            let frag = match compile(ShaderStage::Fragment, &frag_source) {
                Ok(frag) => frag,
                Err(err) => {
                    gl::DeleteShader(vert);
                    return Err(err);
                }
            };

            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::BindAttribLocation(program, VERTEX_ATTRIBUTE, "vertex\0".as_ptr() as *const _);
            gl::BindAttribLocation(program, TEXCOORD_ATTRIBUTE, "texCoord\0".as_ptr() as *const _);
            gl::LinkProgram(program);
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            let mut link_status = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut link_status);
            if link_status != gl::TRUE as GLint {
                let log = program_info_log(program);
                gl::DeleteProgram(program);
                return Err(ShaderError::Link { log });
            }

            gl::UseProgram(program);
            let matrix_location = gl::GetUniformLocation(program, "matrix\0".as_ptr() as *const _);
            let texture_location = gl::GetUniformLocation(program, "tex\0".as_ptr() as *const _);
            gl::Uniform1i(texture_location, 0);

            Ok(ShaderProgram {
                program,
                matrix_location,
            })
        }
    }

    /// Uploads a column-major 4x4 matrix into the `matrix` uniform.
    pub fn set_matrix(&self, matrix: &[f32; 16]) {
        unsafe {
            gl::UseProgram(self.program);
            gl::UniformMatrix4fv(self.matrix_location, 1, gl::FALSE, matrix.as_ptr());
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.program);
        }
    }
}

unsafe fn compile(stage: ShaderStage, source: &str) -> Result<GLuint, ShaderError> {
    let kind = match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    };
    let shader = gl::CreateShader(kind);
    gl::ShaderSource(
        shader,
        1,
        [source.as_ptr() as *const _].as_ptr(),
        [source.len() as GLint].as_ptr(),
    );
    gl::CompileShader(shader);

    let mut compile_status = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut compile_status);
    if compile_status != gl::TRUE as GLint {
        let log = shader_info_log(shader);
        gl::DeleteShader(shader);
        return Err(ShaderError::Compile { stage, log });
    }
    Ok(shader)
}

unsafe fn shader_info_log(shader: GLuint) -> String {
    let mut len = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    let mut info = vec![0u8; len.max(1) as usize];
    gl::GetShaderInfoLog(shader, len, ptr::null_mut(), info.as_mut_ptr() as *mut _);
    info_to_string(info)
}

unsafe fn program_info_log(program: GLuint) -> String {
    let mut len = 0;
    gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    let mut info = vec![0u8; len.max(1) as usize];
    gl::GetProgramInfoLog(program, len, ptr::null_mut(), info.as_mut_ptr() as *mut _);
    info_to_string(info)
}

fn info_to_string(mut info: Vec<u8>) -> String {
    if let Some(nul) = info.iter().position(|&b| b == 0) {
        info.truncate(nul);
    }
    String::from_utf8_lossy(&info).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_headers() {
        let modern = shader_source(ShaderStage::Vertex, OpenGlApi::Desktop, false);
        assert!(modern.starts_with("#version 330\n"));
        assert!(modern.contains("in vec4 vertex;"));
        assert!(!modern.contains("precision"));

        let legacy = shader_source(ShaderStage::Fragment, OpenGlApi::Desktop, true);
        assert!(legacy.starts_with("#version 110\n"));
        assert!(legacy.contains("gl_FragColor"));
    }

    #[test]
    fn es_headers_get_precision() {
        let modern = shader_source(ShaderStage::Fragment, OpenGlApi::ES, false);
        assert!(modern.starts_with("#version 300 es\nprecision mediump float;\n"));
        let legacy = shader_source(ShaderStage::Vertex, OpenGlApi::ES, true);
        assert!(legacy.starts_with("#version 100\nprecision mediump float;\n"));
    }

    #[test]
    fn only_one_version_line() {
        for &api in &[OpenGlApi::Desktop, OpenGlApi::ES] {
            for &legacy in &[false, true] {
                for &stage in &[ShaderStage::Vertex, ShaderStage::Fragment] {
                    let source = shader_source(stage, api, legacy);
                    assert_eq!(source.matches("#version").count(), 1);
                }
            }
        }
    }

    #[test]
    fn fragment_shaders_discard_transparent_pixels() {
        for &legacy in &[false, true] {
            let source = shader_source(ShaderStage::Fragment, OpenGlApi::Desktop, legacy);
            assert!(source.contains("< 0.5"));
            assert!(source.contains("discard"));
        }
    }

    #[test]
    fn info_logs_stop_at_nul() {
        assert_eq!(info_to_string(b"0:1: error\n\0garbage".to_vec()), "0:1: error");
        assert_eq!(info_to_string(vec![0]), "");
    }
}
