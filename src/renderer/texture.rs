use gl::types::*;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::surface::Surface;
use std::path::Path;

use crate::error::{Error, Result};

/// Pixels in this color are treated as fully transparent.
const COLOR_KEY: Color = Color::RGB(255, 0, 255);

pub struct Texture {
    id: GLuint,
    width: u32,
    height: u32,
}

impl Texture {
    /// Decode a BMP through SDL and upload it as an RGBA texture with
    /// nearest-neighbour filtering (pixel art stays crisp when scaled).
    pub fn from_bmp(name: &str, path: &Path) -> Result<Self> {
        let mut surface = Surface::load_bmp(path).map_err(|e| Error::asset(name, e))?;
        surface
            .set_color_key(true, COLOR_KEY)
            .map_err(|e| Error::asset(name, e))?;
        // ABGR8888 is R,G,B,A in memory on little-endian, matching GL_RGBA bytes.
        let surface = surface
            .convert_format(PixelFormatEnum::ABGR8888)
            .map_err(|e| Error::asset(name, e))?;

        let (width, height) = surface.size();
        let row_length = (surface.pitch() / 4) as GLint;
        let mut id: GLuint = 0;

        surface.with_lock(|pixels| unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
            gl::PixelStorei(gl::UNPACK_ROW_LENGTH, row_length);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as GLint,
                width as GLsizei,
                height as GLsizei,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const _,
            );
            gl::PixelStorei(gl::UNPACK_ROW_LENGTH, 0);
            gl::BindTexture(gl::TEXTURE_2D, 0);
        });

        Ok(Self { id, width, height })
    }

    pub fn bind(&self, unit: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}
