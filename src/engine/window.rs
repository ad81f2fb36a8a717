use sdl2::video::{GLContext, GLProfile, SwapInterval, Window};
use sdl2::Sdl;

use crate::error::{Error, Result};

pub struct GameWindow {
    _gl_context: GLContext,
    window: Window,
}

impl GameWindow {
    pub fn new(sdl: &Sdl, title: &str, width: u32, height: u32) -> Result<Self> {
        let video = sdl.video().map_err(Error::Sdl)?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video
            .window(title, width, height)
            .opengl()
            .position_centered()
            .build()
            .map_err(|e| Error::Sdl(e.to_string()))?;

        let gl_context = window.gl_create_context().map_err(Error::Sdl)?;

        gl::load_with(|s| video.gl_get_proc_address(s) as *const _);

        if let Err(e) = video.gl_set_swap_interval(SwapInterval::VSync) {
            log::warn!("vsync unavailable, relying on frame pacing: {e}");
        }

        let (drawable_w, drawable_h) = window.drawable_size();
        unsafe {
            gl::Viewport(0, 0, drawable_w as i32, drawable_h as i32);
        }

        Ok(Self {
            _gl_context: gl_context,
            window,
        })
    }

    pub fn swap(&self) {
        self.window.gl_swap_window();
    }

    pub fn size(&self) -> (u32, u32) {
        self.window.size()
    }
}
