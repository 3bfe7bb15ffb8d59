//! Domain layer for the Robot context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod grid;
pub mod interpreter;
