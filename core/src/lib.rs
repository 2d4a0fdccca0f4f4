// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gomoku Core - collaborator contracts for the board view
//!
//! This crate provides the pieces the UI layer observes but never owns:
//! - Grid representation and cell occupancy
//! - Connection and game-state source traits with change subscription
//! - Local collaborators for running a game without a network peer

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod client;
pub mod game;
pub mod grid;
pub mod local;
pub mod observe;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::{ConnectParams, ConnectionSource, ConnectionStatus};
pub use game::GameSource;
pub use grid::{Grid, SharedGrid};
pub use observe::{ConnectionObserver, GameObserver, GridObserver, Observers};

/// Occupancy of a single grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Nobody has played here
    #[default]
    Empty,
    /// First player's mark
    PlayerA,
    /// Second player's mark
    PlayerB,
}

impl CellState {
    /// Whether a player occupies the cell
    pub fn is_occupied(&self) -> bool {
        !matches!(self, CellState::Empty)
    }
}

/// Grid position produced by pointer mapping
///
/// Signed and unbounded: a click outside the board maps to a position
/// outside `[0, size)` and is passed along untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl CellPos {
    /// Create a new position
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if the position lies on a board of the given size
    pub fn is_valid(&self, size: usize) -> bool {
        let size = size as i64;
        (0..size).contains(&(self.x as i64)) && (0..size).contains(&(self.y as i64))
    }
}

/// Errors raised by game-state collaborators
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move at ({x}, {y})")]
    IllegalMove { x: i32, y: i32 },
    #[error("not connected to an opponent")]
    NotConnected,
}

/// Errors raised by connection collaborators
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("invalid host: {0:?}")]
    InvalidHost(String),
    #[error("a connection is already open or in progress")]
    AlreadyConnected,
}
