use std::path::PathBuf;
use thiserror::Error;

/// Everything the runtime can report back to its caller.
///
/// Contract violations (a zero-period clock, an animation whose loop frame is
/// out of range) are not listed here: they panic at construction.
#[derive(Error, Debug)]
pub enum Error {
    /// A frame was ticked before `StateMachine::start` supplied a state.
    #[error("state machine has no current state; call start() before the first frame")]
    NoState,

    #[error("failed to load sheet `{name}`: {message}")]
    Asset { name: String, message: String },

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("shader error: {0}")]
    Shader(String),

    #[error("failed to read config {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn asset(name: impl Into<String>, message: impl ToString) -> Self {
        Self::Asset {
            name: name.into(),
            message: message.to_string(),
        }
    }
}
