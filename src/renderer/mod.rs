pub mod shader;
pub mod sprite_batch;
pub mod texture;

use glam::IVec2;
use sdl2::rect::Rect;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use texture::Texture;

pub use sprite_batch::{SpriteBatch, SpriteRenderer};

/// Opaque handle to a loaded sheet, plus its pixel size.
///
/// Handles are cheap to copy; the pixels stay in whatever store produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sheet {
    index: usize,
    width: u32,
    height: u32,
}

impl Sheet {
    pub fn new(index: usize, width: u32, height: u32) -> Self {
        Self {
            index,
            width,
            height,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Resolves sheet names to handles. Called at construction time, never per frame.
pub trait Assets {
    fn load_sheet(&mut self, name: &str) -> Result<Sheet>;
}

/// Draw submission for one frame.
///
/// `position` is in internal-resolution pixels. `source` selects a sub-rectangle
/// of the sheet; `None` draws the whole sheet.
pub trait Canvas {
    fn draw(&mut self, sheet: Sheet, position: IVec2, source: Option<Rect>);
}

/// Holds every loaded texture. Sheets reference textures by index.
pub struct SheetStore {
    root: PathBuf,
    textures: Vec<Texture>,
    by_name: HashMap<String, Sheet>,
}

impl SheetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, sheet: Sheet) -> Option<&Texture> {
        self.textures.get(sheet.index)
    }
}

impl Assets for SheetStore {
    /// Loads `<root>/<name>.bmp` once; later calls with the same name reuse it.
    fn load_sheet(&mut self, name: &str) -> Result<Sheet> {
        if let Some(&sheet) = self.by_name.get(name) {
            return Ok(sheet);
        }

        let path = self.root.join(format!("{name}.bmp"));
        let texture = Texture::from_bmp(name, &path)?;
        let sheet = Sheet::new(self.textures.len(), texture.width(), texture.height());
        log::info!(
            "loaded sheet `{name}` ({}x{}) from {}",
            sheet.width,
            sheet.height,
            path.display()
        );

        self.textures.push(texture);
        self.by_name.insert(name.to_string(), sheet);
        Ok(sheet)
    }
}
