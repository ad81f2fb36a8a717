use gl::types::*;
use glam::Mat4;
use std::ffi::CString;
use std::ptr;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    fn gl_kind(self) -> GLenum {
        match self {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        }
    }
}

/// A compiled shader object, deleted when dropped. Once attached to a linked
/// program, GL keeps the code alive for the program's sake.
struct Compiled(GLuint);

impl Compiled {
    fn new(stage: Stage, source: &str) -> Result<Self> {
        let source = CString::new(source).map_err(|_| {
            Error::Shader(format!("{} source contains a NUL byte", stage.label()))
        })?;
        unsafe {
            let compiled = Compiled(gl::CreateShader(stage.gl_kind()));
            gl::ShaderSource(compiled.0, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(compiled.0);

            let mut ok = 0;
            gl::GetShaderiv(compiled.0, gl::COMPILE_STATUS, &mut ok);
            if ok == 0 {
                let log = read_log(compiled.0, gl::GetShaderiv, gl::GetShaderInfoLog);
                return Err(Error::Shader(format!("{} stage: {log}", stage.label())));
            }
            Ok(compiled)
        }
    }
}

impl Drop for Compiled {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.0) }
    }
}

/// Location of an active uniform, looked up once after linking.
#[derive(Clone, Copy, Debug)]
pub struct Uniform(GLint);

/// A linked vertex + fragment program.
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    pub fn link(vertex: &str, fragment: &str) -> Result<Self> {
        let vertex = Compiled::new(Stage::Vertex, vertex)?;
        let fragment = Compiled::new(Stage::Fragment, fragment)?;
        unsafe {
            let program = ShaderProgram {
                id: gl::CreateProgram(),
            };
            gl::AttachShader(program.id, vertex.0);
            gl::AttachShader(program.id, fragment.0);
            gl::LinkProgram(program.id);

            let mut ok = 0;
            gl::GetProgramiv(program.id, gl::LINK_STATUS, &mut ok);
            if ok == 0 {
                let log = read_log(program.id, gl::GetProgramiv, gl::GetProgramInfoLog);
                return Err(Error::Shader(format!("link: {log}")));
            }
            Ok(program)
        }
    }

    /// Resolve `name`, failing if the linker dropped or never saw it.
    pub fn uniform(&self, name: &str) -> Result<Uniform> {
        let cname = CString::new(name)
            .map_err(|_| Error::Shader(format!("uniform name {name:?} contains a NUL byte")))?;
        let location = unsafe { gl::GetUniformLocation(self.id, cname.as_ptr()) };
        if location < 0 {
            return Err(Error::Shader(format!("no active uniform named {name}")));
        }
        Ok(Uniform(location))
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.id) }
    }

    /// Expects the program to be in use.
    pub fn set_matrix(&self, uniform: Uniform, matrix: &Mat4) {
        let columns = matrix.to_cols_array();
        unsafe { gl::UniformMatrix4fv(uniform.0, 1, gl::FALSE, columns.as_ptr()) }
    }

    /// Point a sampler uniform at texture `unit`. Expects the program to be in use.
    pub fn set_sampler(&self, uniform: Uniform, unit: u32) {
        unsafe { gl::Uniform1i(uniform.0, unit as GLint) }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

type GetParam = unsafe fn(GLuint, GLenum, *mut GLint);
type GetInfoLog = unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar);

unsafe fn read_log(object: GLuint, get_param: GetParam, get_log: GetInfoLog) -> String {
    let mut len = 0;
    get_param(object, gl::INFO_LOG_LENGTH, &mut len);
    let mut buf = vec![0u8; len.max(0) as usize];
    if !buf.is_empty() {
        get_log(object, len, ptr::null_mut(), buf.as_mut_ptr().cast());
    }
    tidy_log(&buf)
}

/// Driver logs come NUL-terminated and often end in a newline.
fn tidy_log(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim_end_matches(['\0', '\n', '\r', ' ']);
    if text.is_empty() {
        "(driver gave no log)".to_string()
    } else {
        text.to_string()
    }
}
