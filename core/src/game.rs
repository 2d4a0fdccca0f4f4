// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game-state collaborator contract.

use crate::grid::SharedGrid;
use crate::observe::GameObserver;
use crate::GameError;
use std::sync::Arc;

/// Observable game state owned by the game logic side
///
/// The game state is the sole judge of move legality. Callers forward raw
/// coordinates and let it reject what it does not accept.
pub trait GameSource: Send + Sync {
    /// The board this game plays on
    fn grid(&self) -> Arc<SharedGrid>;

    /// Human-readable description of the current game phase
    fn status_message(&self) -> String;

    /// Play at column `x`, row `y`
    fn make_move(&self, x: i32, y: i32) -> Result<(), GameError>;

    /// Start over with an empty board
    fn new_game(&self) -> Result<(), GameError>;

    /// End the session with the opponent
    fn disconnect(&self) -> Result<(), GameError>;

    /// Register for game state change notifications
    fn subscribe(&self, observer: Arc<dyn GameObserver>);
}
