use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::EventPump;
use std::collections::HashSet;

use crate::config::KeyMap;
use crate::input::{Button, ButtonSource};

/// Keyboard state accumulated from SDL events, read as logical buttons.
pub struct InputState {
    keys: HashSet<Scancode>,
    bindings: KeyMap,
    quit: bool,
}

impl InputState {
    pub fn new(bindings: KeyMap) -> Self {
        Self {
            keys: HashSet::new(),
            bindings,
            quit: false,
        }
    }

    /// Drain pending SDL events. Call once per frame before dispatch.
    pub fn update(&mut self, event_pump: &mut EventPump) {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => self.quit = true,
                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => self.quit = true,
                Event::KeyDown {
                    scancode: Some(sc), ..
                } => {
                    self.keys.insert(sc);
                }
                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    self.keys.remove(&sc);
                }
                // Key-up events are lost while unfocused; forget everything.
                Event::Window {
                    win_event: WindowEvent::FocusLost,
                    ..
                } => self.release_all(),
                _ => {}
            }
        }
    }

    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    pub fn is_key_held(&self, sc: Scancode) -> bool {
        self.keys.contains(&sc)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

impl ButtonSource for InputState {
    fn is_down(&self, button: Button) -> bool {
        self.is_key_held(self.bindings.scancode(button))
    }
}
