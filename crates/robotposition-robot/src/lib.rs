//! Robot position service: Robot bounded context.
//!
//! Responsible for placing robots on the grid, interpreting movement
//! command sequences, and removing robots.

pub mod application;
pub mod domain;
