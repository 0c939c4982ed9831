// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed (fatal at startup)
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing pixels to the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// A thread panicked while holding a lock; nothing may touch the pixels after this
    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),

    /// The OS refused to start a ripple or refresh thread
    #[error("Task spawn error: {0}")]
    TaskSpawn(String),

    /// A background thread panicked instead of returning
    #[error("Task panicked: {0}")]
    TaskPanicked(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
