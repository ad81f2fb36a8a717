//! Two-level states: a persistent outer context with a swappable inner behavior.
//!
//! A [`Superstate<T>`] is a [`State`] that owns a context `T` and one active
//! [`Substate<T>`]. Every event is forwarded verbatim to the active substate
//! together with `&mut T`. The substate never sees the `Superstate` itself, so
//! it has no way to install a replacement; only the context's own policy
//! ([`Outer::next_substate`]) decides when the inner behavior changes.
//!
//! ```
//! use sprig::{Frame, Outer, Substate, Superstate};
//!
//! #[derive(Default)]
//! struct Menu { open: bool, wants_close: bool }
//!
//! impl Outer for Menu {
//!     fn next_substate(&mut self) -> Option<Box<dyn Substate<Self>>> {
//!         if self.wants_close {
//!             self.wants_close = false;
//!             return Self::change_substate::<Closed>();
//!         }
//!         None
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Open;
//! impl Substate<Menu> for Open {
//!     fn on_cancel(&mut self, menu: &mut Menu, _frame: &mut Frame<'_>) {
//!         menu.wants_close = true;
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Closed;
//! impl Substate<Menu> for Closed {
//!     fn on_enter(&mut self, menu: &mut Menu) {
//!         menu.open = false;
//!     }
//! }
//!
//! let state = Superstate::new(Menu { open: true, wants_close: false }, Open);
//! assert!(state.active_name().ends_with("Open"));
//! ```

use crate::fsm::{Frame, State};
use crate::renderer::Canvas;

/// Inner behavior of a [`Superstate<T>`]. Every method receives the context.
pub trait Substate<T> {
    fn on_confirm(&mut self, _outer: &mut T, _frame: &mut Frame<'_>) {}

    fn on_cancel(&mut self, _outer: &mut T, _frame: &mut Frame<'_>) {}

    fn on_move_up(&mut self, _outer: &mut T, _frame: &mut Frame<'_>) {}

    fn on_move_down(&mut self, _outer: &mut T, _frame: &mut Frame<'_>) {}

    fn on_move_left(&mut self, _outer: &mut T, _frame: &mut Frame<'_>) {}

    fn on_move_right(&mut self, _outer: &mut T, _frame: &mut Frame<'_>) {}

    fn update(&mut self, _outer: &mut T, _frame: &mut Frame<'_>) {}

    fn draw(&mut self, _outer: &mut T, _canvas: &mut dyn Canvas) {}

    fn on_enter(&mut self, _outer: &mut T) {}

    fn on_exit(&mut self, _outer: &mut T) {}

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// The context of a [`Superstate`], and the owner of its transition policy.
pub trait Outer: Sized + 'static {
    /// Polled once after every forwarded button handler and `update`.
    /// Returning a substate discards the active one in its favour.
    fn next_substate(&mut self) -> Option<Box<dyn Substate<Self>>> {
        None
    }

    /// A fresh default `S`, ready to be returned from [`next_substate`].
    ///
    /// [`next_substate`]: Outer::next_substate
    fn change_substate<S>() -> Option<Box<dyn Substate<Self>>>
    where
        S: Substate<Self> + Default + 'static,
    {
        Some(Box::new(S::default()))
    }
}

/// A [`State`] composed of a persistent context and one active substate.
pub struct Superstate<T: Outer> {
    outer: T,
    active: Box<dyn Substate<T>>,
}

impl<T: Outer> Superstate<T> {
    pub fn new(outer: T, initial: impl Substate<T> + 'static) -> Self {
        Self {
            outer,
            active: Box::new(initial),
        }
    }

    pub fn outer(&self) -> &T {
        &self.outer
    }

    pub fn outer_mut(&mut self) -> &mut T {
        &mut self.outer
    }

    pub fn active_name(&self) -> &'static str {
        self.active.name()
    }

    fn poll_policy(&mut self) {
        if let Some(next) = self.outer.next_substate() {
            self.change_substate(next);
        }
    }

    fn change_substate(&mut self, next: Box<dyn Substate<T>>) {
        self.active.on_exit(&mut self.outer);
        log::debug!(
            "substate of {}: {} -> {}",
            std::any::type_name::<T>(),
            self.active.name(),
            next.name()
        );
        self.active = next;
        self.active.on_enter(&mut self.outer);
    }
}

impl<T: Outer> State for Superstate<T> {
    fn on_confirm(&mut self, frame: &mut Frame<'_>) {
        self.active.on_confirm(&mut self.outer, frame);
        self.poll_policy();
    }

    fn on_cancel(&mut self, frame: &mut Frame<'_>) {
        self.active.on_cancel(&mut self.outer, frame);
        self.poll_policy();
    }

    fn on_move_up(&mut self, frame: &mut Frame<'_>) {
        self.active.on_move_up(&mut self.outer, frame);
        self.poll_policy();
    }

    fn on_move_down(&mut self, frame: &mut Frame<'_>) {
        self.active.on_move_down(&mut self.outer, frame);
        self.poll_policy();
    }

    fn on_move_left(&mut self, frame: &mut Frame<'_>) {
        self.active.on_move_left(&mut self.outer, frame);
        self.poll_policy();
    }

    fn on_move_right(&mut self, frame: &mut Frame<'_>) {
        self.active.on_move_right(&mut self.outer, frame);
        self.poll_policy();
    }

    fn update(&mut self, frame: &mut Frame<'_>) {
        self.active.update(&mut self.outer, frame);
        self.poll_policy();
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.active.draw(&mut self.outer, canvas);
    }

    fn on_enter(&mut self) {
        self.active.on_enter(&mut self.outer);
    }

    fn on_exit(&mut self) {
        self.active.on_exit(&mut self.outer);
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::press;
    use crate::input::Button;
    use crate::test_support::{NoAssets, RecordingCanvas};

    /// Context that records what reached it and which substate did it.
    #[derive(Default)]
    struct Board {
        seen: Vec<(&'static str, &'static str)>,
        go_to_b: bool,
        polls: u32,
    }

    impl Outer for Board {
        fn next_substate(&mut self) -> Option<Box<dyn Substate<Self>>> {
            self.polls += 1;
            if std::mem::take(&mut self.go_to_b) {
                return Self::change_substate::<B>();
            }
            None
        }
    }

    macro_rules! recording_substate {
        ($name:ident, $tag:literal) => {
            #[derive(Default)]
            struct $name;

            impl Substate<Board> for $name {
                fn on_confirm(&mut self, b: &mut Board, _f: &mut Frame<'_>) {
                    b.seen.push(($tag, "confirm"));
                }
                fn on_cancel(&mut self, b: &mut Board, _f: &mut Frame<'_>) {
                    b.seen.push(($tag, "cancel"));
                }
                fn on_move_up(&mut self, b: &mut Board, _f: &mut Frame<'_>) {
                    b.seen.push(($tag, "up"));
                }
                fn on_move_down(&mut self, b: &mut Board, _f: &mut Frame<'_>) {
                    b.seen.push(($tag, "down"));
                }
                fn on_move_left(&mut self, b: &mut Board, _f: &mut Frame<'_>) {
                    b.seen.push(($tag, "left"));
                }
                fn on_move_right(&mut self, b: &mut Board, _f: &mut Frame<'_>) {
                    b.seen.push(($tag, "right"));
                }
                fn update(&mut self, b: &mut Board, _f: &mut Frame<'_>) {
                    b.seen.push(($tag, "update"));
                }
                fn draw(&mut self, b: &mut Board, _c: &mut dyn Canvas) {
                    b.seen.push(($tag, "draw"));
                }
                fn on_enter(&mut self, b: &mut Board) {
                    b.seen.push(($tag, "enter"));
                }
                fn on_exit(&mut self, b: &mut Board) {
                    b.seen.push(($tag, "exit"));
                }
            }
        };
    }

    recording_substate!(A, "a");
    recording_substate!(B, "b");

    #[test]
    fn every_event_reaches_the_active_substate() {
        let mut state = Superstate::new(Board::default(), A);
        let mut assets = NoAssets;
        let mut frame = Frame::new(&mut assets, 0);

        for button in Button::ALL {
            press(&mut state, button, &mut frame);
        }
        state.update(&mut frame);
        state.draw(&mut RecordingCanvas::default());

        let seen: Vec<_> = state.outer().seen.iter().map(|(_, what)| *what).collect();
        assert_eq!(
            seen,
            vec!["confirm", "cancel", "up", "down", "left", "right", "update", "draw"]
        );
        assert!(state.outer().seen.iter().all(|(tag, _)| *tag == "a"));
        assert!(!frame.quit_requested());
    }

    #[test]
    fn policy_swaps_substate_after_the_event() {
        let mut state = Superstate::new(Board::default(), A);
        let mut assets = NoAssets;
        let mut frame = Frame::new(&mut assets, 0);

        state.outer_mut().go_to_b = true;
        state.on_confirm(&mut frame);
        state.on_cancel(&mut frame);

        assert_eq!(
            state.outer().seen,
            vec![("a", "confirm"), ("a", "exit"), ("b", "enter"), ("b", "cancel")]
        );
        assert!(state.active_name().ends_with("B"));
    }

    #[test]
    fn draw_does_not_poll_the_policy() {
        let mut state = Superstate::new(Board::default(), A);
        state.draw(&mut RecordingCanvas::default());
        assert_eq!(state.outer().polls, 0);

        let mut assets = NoAssets;
        state.update(&mut Frame::new(&mut assets, 0));
        assert_eq!(state.outer().polls, 1);
    }

    #[test]
    fn lifecycle_forwards_to_active_substate() {
        let mut state = Superstate::new(Board::default(), A);
        state.on_enter();
        state.on_exit();
        assert_eq!(state.outer().seen, vec![("a", "enter"), ("a", "exit")]);
        assert!(State::name(&state).ends_with("Board"));
    }
}
