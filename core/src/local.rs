// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process collaborators for playing without a remote peer.
//!
//! [`LoopbackClient`] stands in for the network client: it accepts any host,
//! pretends to handshake on a background thread and reports the result as a
//! status notification from that thread. [`HotSeatGame`] lets both players
//! share one board and only rejects moves on occupied or off-board cells.

use crate::client::{ConnectParams, ConnectionSource, ConnectionStatus};
use crate::game::GameSource;
use crate::grid::{Grid, SharedGrid};
use crate::observe::{ConnectionObserver, GameObserver, Observers};
use crate::{CellPos, CellState, ConnectError, GameError};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

/// Default time the loopback handshake takes
pub const DEFAULT_HANDSHAKE_DELAY: Duration = Duration::from_millis(300);

struct ClientState {
    status: ConnectionStatus,
    /// Bumped on every connect/disconnect so a stale handshake thread can tell
    /// it has been overtaken.
    session: u64,
}

struct ClientInner {
    state: Mutex<ClientState>,
    observers: Observers<dyn ConnectionObserver>,
    handshake_delay: Duration,
}

impl ClientInner {
    fn notify(&self) {
        self.observers.notify(|o| o.connection_changed());
    }

    fn finish_handshake(&self, session: u64, params: &ConnectParams) {
        let completed = {
            let mut state = self.state.lock();
            if state.session == session && state.status == ConnectionStatus::Connecting {
                state.status = ConnectionStatus::Connected;
                true
            } else {
                false
            }
        };

        if completed {
            tracing::info!(peer = %params, "Loopback connection established");
            self.notify();
        } else {
            tracing::debug!(peer = %params, "Handshake superseded, ignoring");
        }
    }
}

/// Connection source that completes every handshake locally
#[derive(Clone)]
pub struct LoopbackClient {
    inner: Arc<ClientInner>,
}

impl LoopbackClient {
    pub fn new() -> Self {
        Self::with_handshake_delay(DEFAULT_HANDSHAKE_DELAY)
    }

    pub fn with_handshake_delay(handshake_delay: Duration) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                state: Mutex::new(ClientState {
                    status: ConnectionStatus::Unconnected,
                    session: 0,
                }),
                observers: Observers::new(),
                handshake_delay,
            }),
        }
    }
}

impl Default for LoopbackClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionSource for LoopbackClient {
    fn status(&self) -> ConnectionStatus {
        self.inner.state.lock().status
    }

    fn subscribe(&self, observer: Arc<dyn ConnectionObserver>) {
        self.inner.observers.subscribe(observer);
    }

    fn connect(&self, params: ConnectParams) -> Result<(), ConnectError> {
        if params.host.trim().is_empty() {
            return Err(ConnectError::InvalidHost(params.host));
        }

        let session = {
            let mut state = self.inner.state.lock();
            if !state.status.can_connect() {
                return Err(ConnectError::AlreadyConnected);
            }
            state.status = ConnectionStatus::Connecting;
            state.session += 1;
            state.session
        };

        tracing::info!(peer = %params, "Connecting");
        self.inner.notify();

        let inner = self.inner.clone();
        thread::spawn(move || {
            thread::sleep(inner.handshake_delay);
            inner.finish_handshake(session, &params);
        });

        Ok(())
    }

    fn disconnect(&self) {
        let changed = {
            let mut state = self.inner.state.lock();
            state.session += 1;
            let changed = state.status != ConnectionStatus::Unconnected;
            state.status = ConnectionStatus::Unconnected;
            changed
        };

        if changed {
            tracing::info!("Disconnected");
            self.inner.notify();
        }
    }
}

/// Message shown before any connection exists
pub const NOT_CONNECTED_MESSAGE: &str = "Not connected";
/// Message shown after the player disconnects
pub const DISCONNECTED_MESSAGE: &str = "Disconnected";

fn player_number(player: CellState) -> u8 {
    match player {
        CellState::PlayerB => 2,
        _ => 1,
    }
}

fn turn_message(next: CellState) -> String {
    format!("Player {}'s turn", player_number(next))
}

/// Player A opens; turns alternate, so the mover follows from the stone count.
fn next_mover(grid: &Grid) -> CellState {
    if grid.occupied_count() % 2 == 0 {
        CellState::PlayerA
    } else {
        CellState::PlayerB
    }
}

/// Two players sharing one board on the same machine
pub struct HotSeatGame {
    grid: Arc<SharedGrid>,
    client: Arc<dyn ConnectionSource>,
    message: Mutex<String>,
    observers: Observers<dyn GameObserver>,
}

/// Forwards connection changes to the game without keeping it alive
struct ConnectionWatch(Weak<HotSeatGame>);

impl ConnectionObserver for ConnectionWatch {
    fn connection_changed(&self) {
        if let Some(game) = self.0.upgrade() {
            game.on_connection_changed();
        }
    }
}

impl HotSeatGame {
    /// Create a game on an empty `size`×`size` board, following `client`'s status
    pub fn new(size: usize, client: Arc<dyn ConnectionSource>) -> Arc<Self> {
        let game = Arc::new(Self {
            grid: Arc::new(SharedGrid::new(size)),
            client: client.clone(),
            message: Mutex::new(NOT_CONNECTED_MESSAGE.to_string()),
            observers: Observers::new(),
        });
        client.subscribe(Arc::new(ConnectionWatch(Arc::downgrade(&game))));
        game
    }

    /// Observers hear about a message only when its text changes
    fn set_message(&self, message: String) {
        {
            let mut current = self.message.lock();
            if *current == message {
                return;
            }
            *current = message;
        }
        self.observers.notify(|o| o.game_changed());
    }

    fn require_connection(&self) -> Result<(), GameError> {
        match self.client.status() {
            ConnectionStatus::Connected => Ok(()),
            _ => Err(GameError::NotConnected),
        }
    }

    fn on_connection_changed(&self) {
        let message = match self.client.status() {
            ConnectionStatus::Unconnected => DISCONNECTED_MESSAGE.to_string(),
            ConnectionStatus::Connecting => "Connecting...".to_string(),
            ConnectionStatus::Connected => {
                format!("Connected, {}", turn_message(next_mover(&self.grid.snapshot())))
            }
        };
        self.set_message(message);
    }
}

impl GameSource for HotSeatGame {
    fn grid(&self) -> Arc<SharedGrid> {
        self.grid.clone()
    }

    fn status_message(&self) -> String {
        self.message.lock().clone()
    }

    fn make_move(&self, x: i32, y: i32) -> Result<(), GameError> {
        self.require_connection()?;

        let illegal = GameError::IllegalMove { x, y };
        if !CellPos::new(x, y).is_valid(self.grid.size()) {
            tracing::debug!(x, y, "Move off the board rejected");
            return Err(illegal);
        }
        let (cx, cy) = (x as usize, y as usize);

        let mover = self.grid.try_update(|grid| {
            if grid.cell_state(cx, cy).is_occupied() {
                return Err(illegal);
            }
            let mover = next_mover(grid);
            grid.set(cx, cy, mover);
            Ok(mover)
        })?;

        tracing::debug!(x, y, player = player_number(mover), "Move placed");
        let next = match mover {
            CellState::PlayerA => CellState::PlayerB,
            _ => CellState::PlayerA,
        };
        self.set_message(turn_message(next));
        Ok(())
    }

    fn new_game(&self) -> Result<(), GameError> {
        self.require_connection()?;
        self.grid.update(Grid::clear);
        tracing::info!("New game started");
        self.set_message(format!("New game: {}", turn_message(CellState::PlayerA)));
        Ok(())
    }

    fn disconnect(&self) -> Result<(), GameError> {
        self.grid.update(Grid::clear);
        self.client.disconnect();
        // Usually already set by the client's notification
        self.set_message(DISCONNECTED_MESSAGE.to_string());
        Ok(())
    }

    fn subscribe(&self, observer: Arc<dyn GameObserver>) {
        self.observers.subscribe(observer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_messages_name_the_next_player() {
        assert_eq!(turn_message(CellState::PlayerA), "Player 1's turn");
        assert_eq!(turn_message(CellState::PlayerB), "Player 2's turn");
    }

    #[test]
    fn mover_alternates_with_stone_count() {
        let mut grid = Grid::new(3);
        assert_eq!(next_mover(&grid), CellState::PlayerA);
        grid.set(0, 0, CellState::PlayerA);
        assert_eq!(next_mover(&grid), CellState::PlayerB);
        grid.set(1, 0, CellState::PlayerB);
        assert_eq!(next_mover(&grid), CellState::PlayerA);
    }

    #[test]
    fn empty_host_is_rejected_synchronously() {
        let client = LoopbackClient::with_handshake_delay(Duration::ZERO);
        let err = client.connect(ConnectParams::new("  ", 4000)).unwrap_err();
        assert_eq!(err, ConnectError::InvalidHost("  ".to_string()));
        assert_eq!(client.status(), ConnectionStatus::Unconnected);
    }
}
