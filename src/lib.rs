//! A small runtime scaffold for 2D games.
//!
//! The core is host-independent: a [`StateMachine`] holding one [`State`],
//! two-level [`Superstate`]s, an edge-triggered [`InputDispatcher`] for six
//! logical [`Button`]s, and the frame-counted [`Clock`] that drives
//! [`Animation`]. The host layer ([`app`], [`engine`], [`renderer`]) wires it
//! to an SDL2 window and an OpenGL sprite renderer.

pub mod app;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod input;
pub mod renderer;
pub mod sprite;
pub mod superstate;
pub mod util;

#[cfg(test)]
mod test_support;

pub use app::GameApp;
pub use clock::Clock;
pub use config::Config;
pub use error::{Error, Result};
pub use fsm::{Frame, State, StateMachine};
pub use input::{Button, ButtonSource, InputDispatcher};
pub use renderer::{Assets, Canvas, Sheet};
pub use sprite::{Animation, Sprite};
pub use superstate::{Outer, Substate, Superstate};
