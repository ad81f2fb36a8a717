use crate::config::Config;
use crate::engine::input::InputState;
use crate::engine::time::FramePacer;
use crate::engine::window::GameWindow;
use crate::error::{Error, Result};
use crate::fsm::{State, StateMachine};
use crate::renderer::{Assets, SheetStore, SpriteRenderer};

/// Frames per second the loop is paced to. Clock periods are counted in these.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Owns the host services and drives a [`StateMachine`] once per frame.
pub struct GameApp {
    config: Config,
    machine: StateMachine,
}

impl GameApp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            machine: StateMachine::new(),
        }
    }

    /// Open the window, build the first state with `initial`, and run until the
    /// window closes, Escape is pressed, or a state asks to quit.
    ///
    /// `initial` runs once the GL context exists so it can load sheets.
    pub fn run<F>(mut self, initial: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Assets) -> Result<Box<dyn State>>,
    {
        self.config.validate()?;
        let keys = self.config.keys.resolve()?;
        let (window_w, window_h) = self.config.window_size();

        let sdl = sdl2::init().map_err(Error::Sdl)?;
        let window = GameWindow::new(&sdl, &self.config.title, window_w, window_h)?;
        let mut renderer = SpriteRenderer::new(self.config.width, self.config.height)?;
        let mut sheets = SheetStore::new(&self.config.content_dir);
        let mut event_pump = sdl.event_pump().map_err(Error::Sdl)?;
        let mut input = InputState::new(keys);
        let mut pacer = FramePacer::new(FRAMES_PER_SECOND);

        let (actual_w, actual_h) = window.size();
        log::info!(
            "window {}x{} ({}x{} internal), content from {}",
            actual_w,
            actual_h,
            self.config.width,
            self.config.height,
            sheets.root().display()
        );

        self.machine.replace_state(initial(&mut sheets)?);

        loop {
            input.update(&mut event_pump);
            if input.should_quit() {
                break;
            }

            self.machine.update(&input, &mut sheets)?;
            if self.machine.quit_requested() {
                break;
            }

            renderer.clear();
            {
                let mut batch = renderer.begin(&sheets);
                self.machine.draw(&mut batch)?;
            }
            window.swap();

            pacer.wait();
        }

        log::info!("stopped after {} frames", self.machine.frame_count());
        Ok(())
    }
}
