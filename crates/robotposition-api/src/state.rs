//! Shared application state.

use std::sync::Arc;

use robotposition_core::clock::Clock;
use robotposition_core::repository::EventRepository;
use robotposition_robot::domain::interpreter::CommandInterpreter;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock stamped onto every produced event.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Event store backing every aggregate.
    pub event_repository: Arc<dyn EventRepository>,
    /// Movement interpreter bound to the service grid.
    pub interpreter: CommandInterpreter,
}

impl AppState {
    /// Create new application state on the standard 5×5 grid.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        event_repository: Arc<dyn EventRepository>,
    ) -> Self {
        Self {
            clock,
            event_repository,
            interpreter: CommandInterpreter::default(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("interpreter", &self.interpreter)
            .finish_non_exhaustive()
    }
}
