//! This module does the OpenGL stuff.

use crate::error::ShaderError;
use crate::gl;
use crate::gl::types::*;
use crate::gl_version::OpenGlApi;
use crate::image::Image;
use crate::overlay::{OVERLAY_HEIGHT, OVERLAY_WIDTH};
use crate::shaders::{ShaderProgram, TEXCOORD_ATTRIBUTE, VERTEX_ATTRIBUTE};
use std::mem;
use std::ptr;

type TextureHandle = GLuint;
type VBOHandle = GLuint;
type VAOHandle = GLuint;

/// The four corners of the quad, as (x, y, z, s, t). Drawn as a
/// triangle fan.
pub const QUAD_VERTICES: [f32; 20] = [
    1.0, -1.0, -1.0, 1.0, 1.0, //
    -1.0, -1.0, -1.0, 0.0, 1.0, //
    -1.0, 1.0, -1.0, 0.0, 0.0, //
    1.0, 1.0, -1.0, 1.0, 0.0, //
];
const COMPONENTS_PER_VERTEX: GLint = 5;

/// Builds an orthographic projection matrix (column-major), with the
/// same conventions as `glOrtho`.
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> [f32; 16] {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;
    [
        2.0 / width,
        0.0,
        0.0,
        0.0,
        0.0,
        2.0 / height,
        0.0,
        0.0,
        0.0,
        0.0,
        -2.0 / depth,
        0.0,
        -(right + left) / width,
        -(top + bottom) / height,
        -(far + near) / depth,
        1.0,
    ]
}

/// The projection that stretches the quad over the whole viewport,
/// with -y at the top.
pub fn slide_matrix() -> [f32; 16] {
    ortho(-1.0, 1.0, 1.0, -1.0, 1.0, -1.0)
}

/// The transform that puts the quad at the top-left corner of a
/// `viewport_width`x`viewport_height` viewport, at the overlay
/// image's size in pixels.
pub fn overlay_matrix(viewport_width: u32, viewport_height: u32) -> [f32; 16] {
    let sx = OVERLAY_WIDTH as f32 / viewport_width.max(1) as f32;
    let sy = OVERLAY_HEIGHT as f32 / viewport_height.max(1) as f32;
    [
        sx,
        0.0,
        0.0,
        0.0,
        0.0,
        -sy,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
        sx - 1.0,
        1.0 - sy,
        0.0,
        1.0,
    ]
}

/// Owns every GL object the slideshow uses.
pub struct Renderer {
    program: ShaderProgram,
    legacy: bool,
    vbo: VBOHandle,
    vao: VAOHandle,
    slide_textures: Vec<TextureHandle>,
    overlay_texture: TextureHandle,
    clear_color: [f32; 4],
    viewport: (u32, u32),
}

impl Renderer {
    /// Compiles the shaders and uploads the quad. Needs a current
    /// context with loaded function pointers.
    pub fn new(api: OpenGlApi, legacy: bool) -> Result<Renderer, ShaderError> {
        let program = ShaderProgram::new(api, legacy)?;

        let mut vao = 0;
        let mut vbo = 0;
        unsafe {
            if !legacy {
                gl::GenVertexArrays(1, &mut vao);
                gl::BindVertexArray(vao);
            }
            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            let len = (mem::size_of::<f32>() * QUAD_VERTICES.len()) as isize;
            gl::BufferData(
                gl::ARRAY_BUFFER,
                len,
                QUAD_VERTICES.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
            if !legacy {
                enable_vertex_attribs();
            }
            gl::Disable(gl::DEPTH_TEST);
            gl::Disable(gl::CULL_FACE);
        }

        let overlay_texture = create_texture(gl::NEAREST as GLint);
        print_gl_errors("after renderer initialization");

        Ok(Renderer {
            program,
            legacy,
            vbo,
            vao,
            slide_textures: Vec::new(),
            overlay_texture,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            viewport: (1, 1),
        })
    }

    /// Uploads every image as its own texture, replacing whatever
    /// was uploaded before.
    pub fn upload_slides<'a, I: IntoIterator<Item = &'a Image>>(&mut self, images: I) {
        self.delete_slide_textures();
        for image in images {
            let tex = create_texture(gl::LINEAR as GLint);
            insert_texture(tex, image);
            self.slide_textures.push(tex);
        }
        log::debug!("Uploaded {} slide texture(s)", self.slide_textures.len());
    }

    /// Replaces the overlay texture's contents.
    pub fn update_overlay(&mut self, overlay: &Image) {
        insert_texture(self.overlay_texture, overlay);
    }

    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        unsafe {
            gl::Viewport(0, 0, width as GLint, height as GLint);
        }
    }

    /// Clears the screen, draws the given slide (if any) over the
    /// whole viewport and the overlay on top of it.
    pub fn draw(&mut self, slide: Option<usize>) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
            gl::UseProgram(self.program.program);
            gl::ActiveTexture(gl::TEXTURE0);
            if self.legacy {
                gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
                enable_vertex_attribs();
            } else {
                gl::BindVertexArray(self.vao);
            }
        }

        if let Some(&tex) = slide.and_then(|i| self.slide_textures.get(i)) {
            self.program.set_matrix(&slide_matrix());
            draw_quad(tex);
        }

        let (width, height) = self.viewport;
        self.program.set_matrix(&overlay_matrix(width, height));
        draw_quad(self.overlay_texture);

        print_gl_errors("after drawing");
    }

    fn delete_slide_textures(&mut self) {
        if !self.slide_textures.is_empty() {
            unsafe {
                gl::DeleteTextures(
                    self.slide_textures.len() as GLsizei,
                    self.slide_textures.as_ptr(),
                );
            }
            self.slide_textures.clear();
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.delete_slide_textures();
        unsafe {
            gl::DeleteTextures(1, [self.overlay_texture].as_ptr());
            gl::DeleteBuffers(1, [self.vbo].as_ptr());
            if !self.legacy {
                gl::DeleteVertexArrays(1, [self.vao].as_ptr());
            }
        }
    }
}

fn draw_quad(tex: TextureHandle) {
    unsafe {
        gl::BindTexture(gl::TEXTURE_2D, tex);
        gl::DrawArrays(gl::TRIANGLE_FAN, 0, 4);
    }
}

/// Points the position and texture coordinate attributes at the
/// currently bound buffer.
unsafe fn enable_vertex_attribs() {
    let stride = COMPONENTS_PER_VERTEX * mem::size_of::<f32>() as GLint;
    gl::VertexAttribPointer(
        VERTEX_ATTRIBUTE, /* Attrib location */
        3,                /* Components */
        gl::FLOAT,        /* Type */
        gl::FALSE,        /* Normalize */
        stride,           /* Stride */
        ptr::null(),      /* Offset */
    );
    gl::EnableVertexAttribArray(VERTEX_ATTRIBUTE);
    gl::VertexAttribPointer(
        TEXCOORD_ATTRIBUTE,
        2,
        gl::FLOAT,
        gl::FALSE,
        stride,
        (3 * mem::size_of::<f32>()) as *const _, /* Offset: after the position */
    );
    gl::EnableVertexAttribArray(TEXCOORD_ATTRIBUTE);
}

// The flipped texture coordinates in the vertex shader rely on
// REPEAT wrapping.
fn create_texture(filter: GLint) -> TextureHandle {
    let mut tex = 0;
    unsafe {
        gl::GenTextures(1, &mut tex);
        gl::BindTexture(gl::TEXTURE_2D, tex);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter);
    }
    print_gl_errors("after creating a texture");
    tex
}

fn insert_texture(tex: TextureHandle, image: &Image) {
    unsafe {
        gl::BindTexture(gl::TEXTURE_2D, tex);
        gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl::RGBA8 as GLint,
            image.width as GLint,
            image.height as GLint,
            0,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            image.pixels.as_ptr() as *const _,
        );
    }
    print_gl_errors("after inserting a texture");
}

fn print_gl_errors(context: &str) {
    let mut error = unsafe { gl::GetError() };
    while error != gl::NO_ERROR {
        log::warn!("GL error {}: {}", context, gl_error_to_string(error));
        error = unsafe { gl::GetError() };
    }
}

fn gl_error_to_string(error: GLuint) -> String {
    match error {
        0x0500 => "GL_INVALID_ENUM (0x0500)".to_owned(),
        0x0501 => "GL_INVALID_VALUE (0x0501)".to_owned(),
        0x0502 => "GL_INVALID_OPERATION (0x0502)".to_owned(),
        0x0505 => "GL_OUT_OF_MEMORY (0x0505)".to_owned(),
        0x0506 => "GL_INVALID_FRAMEBUFFER_OPERATION (0x0506)".to_owned(),
        0x0507 => "GL_CONTEXT_LOST (0x0507)".to_owned(),
        _ => format!("unknown error ({:#06x})", error),
    }
}
