use gl::types::*;
use glam::{IVec2, Mat4};
use sdl2::rect::Rect;
use std::mem;

use super::shader::{ShaderProgram, Uniform};
use super::{Canvas, Sheet, SheetStore};
use crate::error::Result;

const SPRITE_VERT_SRC: &str = include_str!("../../shaders/sprite.vert");
const SPRITE_FRAG_SRC: &str = include_str!("../../shaders/sprite.frag");

/// Floats per vertex: position (2) + uv (2).
const VERTEX_FLOATS: usize = 4;

/// Draws textured quads in internal-resolution pixel space.
pub struct SpriteRenderer {
    shader: ShaderProgram,
    u_projection: Uniform,
    u_sheet: Uniform,
    vao: GLuint,
    vbo: GLuint,
    projection: Mat4,
}

impl SpriteRenderer {
    pub fn new(internal_width: u32, internal_height: u32) -> Result<Self> {
        let shader = ShaderProgram::link(SPRITE_VERT_SRC, SPRITE_FRAG_SRC)?;
        let u_projection = shader.uniform("u_projection")?;
        let u_sheet = shader.uniform("u_sheet")?;

        let mut vao: GLuint = 0;
        let mut vbo: GLuint = 0;

        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::ClearColor(0.0, 0.0, 0.0, 1.0);

            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            // One quad (6 vertices), rewritten per draw call
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (6 * VERTEX_FLOATS * mem::size_of::<f32>()) as GLsizeiptr,
                std::ptr::null(),
                gl::DYNAMIC_DRAW,
            );

            let stride = (VERTEX_FLOATS * mem::size_of::<f32>()) as GLsizei;
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, stride, std::ptr::null());
            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(
                1,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                (2 * mem::size_of::<f32>()) as *const _,
            );

            gl::BindVertexArray(0);
        }

        // Top-left origin, y down, matching sheet coordinates.
        let projection = Mat4::orthographic_rh_gl(
            0.0,
            internal_width as f32,
            internal_height as f32,
            0.0,
            -1.0,
            1.0,
        );

        Ok(Self {
            shader,
            u_projection,
            u_sheet,
            vao,
            vbo,
            projection,
        })
    }

    pub fn clear(&self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    /// Borrow the renderer as a [`Canvas`] for one frame.
    pub fn begin<'a>(&'a mut self, sheets: &'a SheetStore) -> SpriteBatch<'a> {
        self.shader.use_program();
        self.shader.set_matrix(self.u_projection, &self.projection);
        self.shader.set_sampler(self.u_sheet, 0);
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
        }
        SpriteBatch {
            renderer: self,
            sheets,
        }
    }

    fn draw_quad(&mut self, sheet: Sheet, position: IVec2, source: Rect) {
        let (x, y) = (position.x as f32, position.y as f32);
        let (w, h) = (source.width() as f32, source.height() as f32);
        let sw = sheet.width().max(1) as f32;
        let sh = sheet.height().max(1) as f32;
        let u0 = source.x() as f32 / sw;
        let v0 = source.y() as f32 / sh;
        let u1 = (source.x() as f32 + w) / sw;
        let v1 = (source.y() as f32 + h) / sh;

        #[rustfmt::skip]
        let vertices: [f32; 6 * VERTEX_FLOATS] = [
            x,     y,     u0, v0,
            x + w, y,     u1, v0,
            x + w, y + h, u1, v1,
            x,     y,     u0, v0,
            x + w, y + h, u1, v1,
            x,     y + h, u0, v1,
        ];

        unsafe {
            gl::BufferSubData(
                gl::ARRAY_BUFFER,
                0,
                mem::size_of_val(&vertices) as GLsizeiptr,
                vertices.as_ptr() as *const _,
            );
            gl::DrawArrays(gl::TRIANGLES, 0, 6);
        }
    }
}

impl Drop for SpriteRenderer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}

/// A frame's worth of draw submission against loaded sheets.
pub struct SpriteBatch<'a> {
    renderer: &'a mut SpriteRenderer,
    sheets: &'a SheetStore,
}

impl Canvas for SpriteBatch<'_> {
    fn draw(&mut self, sheet: Sheet, position: IVec2, source: Option<Rect>) {
        let Some(texture) = self.sheets.get(sheet) else {
            log::warn!("draw skipped: sheet {} is not loaded", sheet.index());
            return;
        };
        texture.bind(0);
        let source = source.unwrap_or_else(|| Rect::new(0, 0, sheet.width(), sheet.height()));
        self.renderer.draw_quad(sheet, position, source);
    }
}

impl Drop for SpriteBatch<'_> {
    fn drop(&mut self) {
        unsafe {
            gl::BindVertexArray(0);
        }
    }
}
