//! Shared test mocks and utilities for the robot position service.

mod clock;
mod repository;

pub use clock::FixedClock;
pub use repository::{
    EmptyEventRepository, FailingEventRepository, InMemoryEventRepository,
    RecordingEventRepository,
};
