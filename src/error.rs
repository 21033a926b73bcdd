// One error type for the whole crate.
// Every variant states *where* things went wrong; none of them is fatal to the
// host: the worst case is "this frame's approximation did not update".
use std::collections::TryReserveError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// A working buffer could not be allocated
    #[error("Allocation failed for {what}: {source}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    /// A size computation (count × element size, width × height) overflowed
    #[error("Size overflow computing {0}")]
    SizeOverflow(&'static str),

    /// The point buffer reached its hard cap
    #[error("Point buffer full ({0} points)")]
    BufferFull(usize),

    /// Input rejected up front (too few points, zero-sized grid, ...)
    #[error("Degenerate input: {0}")]
    Degenerate(&'static str),

    /// Configuration values that cannot work together
    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
