//! Logging sink handed to storage components
//!
//! Components never reach for a process-wide logger directly. They hold a
//! [`Logger`], which either forwards to whatever subscriber is the current
//! default or pins every event to an explicitly provided
//! [`tracing::Dispatch`].

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Injected logging capability
#[derive(Clone, Default)]
pub struct Logger {
    dispatch: Option<Dispatch>,
}

impl Logger {
    /// Route events to the dispatcher given here, regardless of the global default
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    /// Route events to the current default subscriber
    pub fn global() -> Self {
        Self { dispatch: None }
    }

    /// Run `f` with this logger's dispatcher as the active one.
    ///
    /// Events emitted with the `tracing` macros inside `f` go to this sink.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("injected", &self.dispatch.is_some())
            .finish()
    }
}

/// Install a fmt subscriber as the global default.
///
/// `RUST_LOG` takes precedence over `default_level`. Returns `false` when a
/// global subscriber was already installed.
pub fn init_tracing(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
