//! Movement command interpreter.
//!
//! Turns a space-separated instruction string into a sequence of tokens and
//! folds them over a [`Position`], refusing any MOVE that would leave the
//! grid. The interpreter is pure: it takes the starting position by value and
//! hands back the resulting one inside a [`MoveOutcome`].

use thiserror::Error;

use super::grid::{Facing, GridBounds, Position};

/// A single instruction from a command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandToken {
    /// Advance one cell along the current facing.
    Move,
    /// Rotate 90° counter-clockwise.
    Left,
    /// Rotate 90° clockwise.
    Right,
    /// Anything else, including the empty token between two spaces. No-op.
    Unknown(String),
}

impl CommandToken {
    /// Classifies one raw token. Matching is case-sensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "MOVE" => CommandToken::Move,
            "LEFT" => CommandToken::Left,
            "RIGHT" => CommandToken::Right,
            other => CommandToken::Unknown(other.to_owned()),
        }
    }
}

/// Ordered instructions parsed from a command string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandSequence {
    tokens: Vec<CommandToken>,
}

impl CommandSequence {
    /// Splits `input` on single spaces. Consecutive spaces yield empty
    /// tokens, which are kept as [`CommandToken::Unknown`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self {
            tokens: input.split(' ').map(CommandToken::parse).collect(),
        }
    }

    /// The parsed tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[CommandToken] {
        &self.tokens
    }

    /// Number of tokens that will be skipped as no-ops.
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| matches!(token, CommandToken::Unknown(_)))
            .count()
    }
}

impl From<Vec<CommandToken>> for CommandSequence {
    fn from(tokens: Vec<CommandToken>) -> Self {
        Self { tokens }
    }
}

/// A MOVE that would take the robot off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal move: robot cannot move {}", .direction.direction_name())]
pub struct IllegalMoveError {
    /// The facing the robot tried to advance along.
    pub direction: Facing,
}

/// Result of running a command sequence.
///
/// `final_state` always holds the last valid position: the end position when
/// every token applied, or the position just before the rejected MOVE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Position after the last successfully applied token.
    pub final_state: Position,
    /// The rejection that stopped processing, if any.
    pub error: Option<IllegalMoveError>,
}

impl MoveOutcome {
    /// Discards the partial state on rejection.
    ///
    /// # Errors
    ///
    /// Returns the `IllegalMoveError` that aborted the sequence.
    pub fn into_result(self) -> Result<Position, IllegalMoveError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.final_state),
        }
    }
}

/// Applies command sequences within a fixed set of grid bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInterpreter {
    bounds: GridBounds,
}

impl CommandInterpreter {
    /// Creates an interpreter for the given bounds.
    #[must_use]
    pub const fn new(bounds: GridBounds) -> Self {
        Self { bounds }
    }

    /// The bounds moves are checked against.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Runs `commands` left to right starting at `position`, stopping at the
    /// first illegal MOVE.
    #[must_use]
    pub fn apply(&self, position: Position, commands: &CommandSequence) -> MoveOutcome {
        let mut current = position;
        for token in commands.tokens() {
            match token {
                CommandToken::Move => match self.step(current) {
                    Ok(next) => current = next,
                    Err(err) => {
                        return MoveOutcome {
                            final_state: current,
                            error: Some(err),
                        };
                    }
                },
                CommandToken::Left => current.facing = current.facing.left(),
                CommandToken::Right => current.facing = current.facing.right(),
                CommandToken::Unknown(_) => {}
            }
        }
        MoveOutcome {
            final_state: current,
            error: None,
        }
    }

    /// Advances one cell, checking bounds before moving.
    fn step(&self, position: Position) -> Result<Position, IllegalMoveError> {
        let (dx, dy) = position.facing.delta();
        let x = position.x + dx;
        let y = position.y + dy;
        if !self.bounds.contains(x, y) {
            return Err(IllegalMoveError {
                direction: position.facing,
            });
        }
        Ok(Position { x, y, ..position })
    }
}
