//! Application layer for the Robot context.

pub mod command_handlers;
pub mod query_handlers;
