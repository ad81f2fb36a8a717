//! Headless stand-ins for the host services, shared by unit tests.

use glam::IVec2;
use sdl2::rect::Rect;
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::input::{Button, ButtonSource};
use crate::renderer::{Assets, Canvas, Sheet};

/// Buttons reported as down, fixed for the lifetime of the value.
pub struct Held(HashSet<Button>);

impl Held {
    pub fn none() -> Self {
        Self(HashSet::new())
    }

    pub fn keys(buttons: &[Button]) -> Self {
        Self(buttons.iter().copied().collect())
    }
}

impl ButtonSource for Held {
    fn is_down(&self, button: Button) -> bool {
        self.0.contains(&button)
    }
}

/// Refuses every load.
pub struct NoAssets;

impl Assets for NoAssets {
    fn load_sheet(&mut self, name: &str) -> Result<Sheet> {
        Err(Error::asset(name, "no assets in this test"))
    }
}

/// Hands out 2048x2048 sheets in load order.
#[derive(Default)]
pub struct FakeSheets {
    pub loaded: Vec<String>,
}

impl Assets for FakeSheets {
    fn load_sheet(&mut self, name: &str) -> Result<Sheet> {
        self.loaded.push(name.to_string());
        Ok(Sheet::new(self.loaded.len() - 1, 2048, 2048))
    }
}

#[derive(Default)]
pub struct RecordingCanvas {
    pub calls: Vec<(Sheet, IVec2, Option<Rect>)>,
}

impl Canvas for RecordingCanvas {
    fn draw(&mut self, sheet: Sheet, position: IVec2, source: Option<Rect>) {
        self.calls.push((sheet, position, source));
    }
}
