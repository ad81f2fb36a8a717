/// One of the six logical buttons a game state reacts to.
///
/// The host maps physical keys onto these; nothing in the core sees a key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Confirm,
    Cancel,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Dispatch order within a frame.
    pub const ALL: [Button; 6] = [
        Button::Confirm,
        Button::Cancel,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Per-frame sampling of the physical state behind each logical button.
pub trait ButtonSource {
    fn is_down(&self, button: Button) -> bool;
}

/// Turns level-sampled button state into one edge per physical press.
///
/// Each button carries a latch that is set on the frame the press is reported
/// and cleared on the first frame the button reads up again. Holding a button
/// therefore reports it once, regardless of how long it stays down.
#[derive(Debug, Default)]
pub struct InputDispatcher {
    latched: [bool; 6],
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample for `button`. Returns `true` exactly on the down-transition.
    pub fn sample(&mut self, button: Button, down: bool) -> bool {
        let latch = &mut self.latched[button.index()];
        if !down {
            *latch = false;
            false
        } else if !*latch {
            *latch = true;
            true
        } else {
            false
        }
    }

    /// Sample every button in [`Button::ALL`] order, calling `on_press` for each
    /// fresh press. `on_press` runs before the next button is sampled, so it sees
    /// the effects of earlier presses in the same frame.
    pub fn dispatch(&mut self, source: &dyn ButtonSource, mut on_press: impl FnMut(Button)) {
        for button in Button::ALL {
            if self.sample(button, source.is_down(button)) {
                on_press(button);
            }
        }
    }

    /// Whether `button` has fired and is still being held.
    pub fn is_latched(&self, button: Button) -> bool {
        self.latched[button.index()]
    }
}
