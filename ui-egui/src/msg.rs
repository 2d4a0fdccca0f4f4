// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifications forwarded from collaborators to the UI thread.

use crossbeam_channel::Sender;
use gomoku_core::{ConnectionObserver, GameObserver, GridObserver};

/// Which source changed. Carries no state; the UI thread re-reads the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// Connection status changed
    ConnectionChanged,
    /// Game message changed
    GameChanged,
}

/// Observer registered with both sources on the shell's behalf
///
/// Collaborators may call it from any thread. It never touches UI state: it
/// queues an event and wakes the event loop, and the shell applies the event
/// on the UI thread.
pub struct ShellNotifier {
    tx: Sender<ShellEvent>,
    ctx: egui::Context,
}

impl ShellNotifier {
    pub fn new(tx: Sender<ShellEvent>, ctx: egui::Context) -> Self {
        Self { tx, ctx }
    }

    fn forward(&self, event: ShellEvent) {
        tracing::debug!(?event, "Queueing shell event");
        // Receiver gone means the window closed
        if self.tx.send(event).is_ok() {
            self.ctx.request_repaint();
        }
    }
}

impl ConnectionObserver for ShellNotifier {
    fn connection_changed(&self) {
        self.forward(ShellEvent::ConnectionChanged);
    }
}

impl GameObserver for ShellNotifier {
    fn game_changed(&self) {
        self.forward(ShellEvent::GameChanged);
    }
}

/// Grid observer owned by the board view: a grid change only needs a redraw
pub struct RepaintOnChange {
    ctx: egui::Context,
}

impl RepaintOnChange {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl GridObserver for RepaintOnChange {
    fn grid_changed(&self) {
        self.ctx.request_repaint();
    }
}
