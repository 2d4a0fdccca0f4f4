// SPDX-License-Identifier: MIT OR Apache-2.0

//! Control state derived from the connection status.

use gomoku_core::ConnectionStatus;

/// What the controls show about the connection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionView {
    /// Nothing to play against; only connecting makes sense
    #[default]
    Disconnected,
    /// Connected or connecting; the game controls are live
    Connected,
}

impl ConnectionView {
    /// Depends only on the status, never on the previous view
    pub fn from_status(status: ConnectionStatus) -> Self {
        if status.can_connect() {
            ConnectionView::Disconnected
        } else {
            ConnectionView::Connected
        }
    }

    pub fn controls(self) -> Controls {
        let connected = self == ConnectionView::Connected;
        Controls {
            connect: !connected,
            new_game: connected,
            disconnect: connected,
        }
    }
}

/// Which command buttons are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub connect: bool,
    pub new_game: bool,
    pub disconnect: bool,
}

impl Default for Controls {
    fn default() -> Self {
        ConnectionView::default().controls()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected() {
        assert_eq!(
            Controls::default(),
            Controls {
                connect: true,
                new_game: false,
                disconnect: false,
            }
        );
    }

    #[test]
    fn any_live_status_enables_game_controls() {
        for status in [ConnectionStatus::Connecting, ConnectionStatus::Connected] {
            assert_eq!(
                ConnectionView::from_status(status).controls(),
                Controls {
                    connect: false,
                    new_game: true,
                    disconnect: true,
                }
            );
        }
        assert_eq!(
            ConnectionView::from_status(ConnectionStatus::Unconnected),
            ConnectionView::Disconnected
        );
    }
}
