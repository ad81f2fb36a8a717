use crate::error::{Error, Result};
use crate::input::{Button, ButtonSource, InputDispatcher};
use crate::renderer::{Assets, Canvas};

/// A top-level game state.
///
/// Every method has an empty default, so a state implements only what it
/// reacts to. The six button handlers fire once per physical press (see
/// [`InputDispatcher`]); `update` and `draw` run every frame, in that order,
/// after input has been dispatched.
pub trait State {
    fn on_confirm(&mut self, _frame: &mut Frame<'_>) {}

    fn on_cancel(&mut self, _frame: &mut Frame<'_>) {}

    fn on_move_up(&mut self, _frame: &mut Frame<'_>) {}

    fn on_move_down(&mut self, _frame: &mut Frame<'_>) {}

    fn on_move_left(&mut self, _frame: &mut Frame<'_>) {}

    fn on_move_right(&mut self, _frame: &mut Frame<'_>) {}

    fn update(&mut self, _frame: &mut Frame<'_>) {}

    fn draw(&mut self, _canvas: &mut dyn Canvas) {}

    /// Runs when the machine adopts this state.
    fn on_enter(&mut self) {}

    /// Runs when the machine discards this state. Release anything that must
    /// not wait for `Drop` here.
    fn on_exit(&mut self) {}

    /// Shown in transition logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Route one logical button press to the matching handler.
pub fn press(state: &mut dyn State, button: Button, frame: &mut Frame<'_>) {
    match button {
        Button::Confirm => state.on_confirm(frame),
        Button::Cancel => state.on_cancel(frame),
        Button::Up => state.on_move_up(frame),
        Button::Down => state.on_move_down(frame),
        Button::Left => state.on_move_left(frame),
        Button::Right => state.on_move_right(frame),
    }
}

/// Per-frame context handed to state handlers.
///
/// Carries the capabilities a handler may need (sheet loading for building the
/// next state) and collects requests back to the machine.
pub struct Frame<'a> {
    assets: &'a mut dyn Assets,
    number: u64,
    next: Option<Box<dyn State>>,
    quit: bool,
}

impl<'a> Frame<'a> {
    pub fn new(assets: &'a mut dyn Assets, number: u64) -> Self {
        Self {
            assets,
            number,
            next: None,
            quit: false,
        }
    }

    pub fn assets(&mut self) -> &mut dyn Assets {
        &mut *self.assets
    }

    /// Frames completed before this one.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Replace the machine's current state once the running handler returns.
    /// A second request from the same handler supersedes the first.
    pub fn replace_state(&mut self, state: impl State + 'static) {
        self.replace_state_boxed(Box::new(state));
    }

    pub fn replace_state_boxed(&mut self, state: Box<dyn State>) {
        if let Some(dropped) = self.next.replace(state) {
            log::debug!("transition to {} superseded", dropped.name());
        }
    }

    /// Ask the host loop to stop after this frame.
    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// Holds the single current [`State`] and drives it once per frame.
///
/// # Usage
/// ```ignore
/// let mut machine = StateMachine::new();
/// machine.start(TitleScreen::new(&mut sheets)?);
/// // Each frame:
/// machine.update(&input, &mut sheets)?;
/// machine.draw(&mut canvas)?;
/// ```
#[derive(Default)]
pub struct StateMachine {
    current: Option<Box<dyn State>>,
    input: InputDispatcher,
    frames: u64,
    quit_requested: bool,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the initial state. Calling it again behaves like [`replace_state`].
    ///
    /// [`replace_state`]: StateMachine::replace_state
    pub fn start(&mut self, initial: impl State + 'static) {
        self.replace_state(Box::new(initial));
    }

    /// Discard the current state (running its `on_exit`) and adopt `next`
    /// (running its `on_enter`). The next dispatch reaches `next`.
    pub fn replace_state(&mut self, next: Box<dyn State>) {
        transition(&mut self.current, next);
    }

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.current.as_ref().map(|state| state.name())
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Set once any handler has called [`Frame::quit`].
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Dispatch this frame's button edges, then run the current state's
    /// `update`. A transition requested by a handler takes effect as soon as
    /// that handler returns, so later buttons and `update` see the new state.
    pub fn update(&mut self, buttons: &dyn ButtonSource, assets: &mut dyn Assets) -> Result<()> {
        let Self {
            current,
            input,
            frames,
            quit_requested,
        } = self;

        if current.is_none() {
            return Err(Error::NoState);
        }

        let mut frame = Frame::new(assets, *frames);

        input.dispatch(buttons, |button| {
            if let Some(state) = current.as_mut() {
                press(&mut **state, button, &mut frame);
            }
            apply_pending(current, &mut frame);
        });

        if let Some(state) = current.as_mut() {
            state.update(&mut frame);
        }
        apply_pending(current, &mut frame);

        *quit_requested |= frame.quit;
        *frames += 1;
        Ok(())
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) -> Result<()> {
        let state = self.current.as_mut().ok_or(Error::NoState)?;
        state.draw(canvas);
        Ok(())
    }

    /// One full host frame: [`update`](Self::update) then [`draw`](Self::draw).
    pub fn frame(
        &mut self,
        buttons: &dyn ButtonSource,
        assets: &mut dyn Assets,
        canvas: &mut dyn Canvas,
    ) -> Result<()> {
        self.update(buttons, assets)?;
        self.draw(canvas)
    }
}

fn apply_pending(current: &mut Option<Box<dyn State>>, frame: &mut Frame<'_>) {
    if let Some(next) = frame.next.take() {
        transition(current, next);
    }
}

fn transition(current: &mut Option<Box<dyn State>>, mut next: Box<dyn State>) {
    match current.take() {
        Some(mut old) => {
            old.on_exit();
            log::debug!("state: {} -> {}", old.name(), next.name());
        }
        None => log::debug!("state: start in {}", next.name()),
    }
    next.on_enter();
    *current = Some(next);
}
