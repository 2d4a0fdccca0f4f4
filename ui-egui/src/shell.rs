// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composition root tying the board, the command buttons and the status label
//! to the connection and game-state sources.

use crate::board_view::BoardView;
use crate::connection_window::{ConnectionWindow, DialogOutcome};
use crate::msg::{ShellEvent, ShellNotifier};
use crate::ui_config::UiConfig;
use crate::view::{ConnectionView, Controls};
use crossbeam_channel::{unbounded, Receiver};
use gomoku_core::{ConnectError, ConnectParams, ConnectionSource, GameError, GameSource};
use std::sync::Arc;

/// Label text until the game state first reports
pub const INITIAL_STATUS_TEXT: &str = "Not connected";

/// The first failure of a frame is returned; later ones are only logged.
fn keep_first_error<E>(result: &mut anyhow::Result<()>, outcome: Result<(), E>)
where
    E: Into<anyhow::Error>,
{
    if let Err(e) = outcome {
        let e: anyhow::Error = e.into();
        if result.is_ok() {
            *result = Err(e);
        } else {
            tracing::warn!(error = %e, "Another action failed in the same frame");
        }
    }
}

/// Window content reacting to two independent sources
///
/// Collaborators notify through a [`ShellNotifier`], which may run on any
/// thread. The events are applied in [`ConnectionAwareShell::pump_events`],
/// called on the UI thread at the start of every frame; that is the only place
/// controls and the status label change in response to a source.
pub struct ConnectionAwareShell {
    game: Arc<dyn GameSource>,
    client: Arc<dyn ConnectionSource>,
    board: BoardView,
    controls: Controls,
    status_text: String,
    events: Receiver<ShellEvent>,
    connect_defaults: ConnectParams,
    connect_window: Option<ConnectionWindow>,
}

impl ConnectionAwareShell {
    pub fn new(
        ctx: &egui::Context,
        game: Arc<dyn GameSource>,
        client: Arc<dyn ConnectionSource>,
        config: &UiConfig,
    ) -> Self {
        let (tx, events) = unbounded();
        let notifier = Arc::new(ShellNotifier::new(tx, ctx.clone()));
        client.subscribe(notifier.clone());
        game.subscribe(notifier);

        let board = BoardView::new(
            ctx,
            game.grid(),
            config.board.cell_size,
            config.board.style(),
        );

        Self {
            game,
            client,
            board,
            controls: Controls::default(),
            status_text: INITIAL_STATUS_TEXT.to_string(),
            events,
            connect_defaults: config.connect.clone(),
            connect_window: None,
        }
    }

    pub fn board(&self) -> &BoardView {
        &self.board
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn is_connect_window_open(&self) -> bool {
        self.connect_window.is_some()
    }

    pub fn connect_window_mut(&mut self) -> Option<&mut ConnectionWindow> {
        self.connect_window.as_mut()
    }

    /// Apply every queued notification. Returns how many were handled.
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            match event {
                ShellEvent::ConnectionChanged => self.on_connection_changed(),
                ShellEvent::GameChanged => self.on_game_changed(),
            }
            handled += 1;
        }
        handled
    }

    /// Only touches the controls
    fn on_connection_changed(&mut self) {
        let status = self.client.status();
        let view = ConnectionView::from_status(status);
        tracing::info!(?status, ?view, "Connection status changed");
        self.controls = view.controls();
    }

    /// Only touches the status label
    fn on_game_changed(&mut self) {
        self.status_text = self.game.status_message();
        tracing::debug!(message = %self.status_text, "Game state changed");
    }

    /// Forward a board click to the game state as-is
    pub fn on_board_click(&self, pixel_x: f32, pixel_y: f32) -> Result<(), GameError> {
        let cell = self.board.pixel_to_cell(pixel_x, pixel_y);
        tracing::debug!(x = cell.x, y = cell.y, "Forwarding move");
        self.game.make_move(cell.x, cell.y)
    }

    pub fn on_connect_pressed(&mut self) {
        if self.connect_window.is_none() {
            self.connect_window = Some(ConnectionWindow::new(&self.connect_defaults));
        }
    }

    pub fn on_new_game_pressed(&self) -> Result<(), GameError> {
        self.game.new_game()
    }

    pub fn on_disconnect_pressed(&self) -> Result<(), GameError> {
        self.game.disconnect()
    }

    /// Submit the open connect dialog. Returns false if there is no dialog or
    /// its fields did not validate (the dialog then stays open).
    pub fn confirm_connect(&mut self) -> Result<bool, ConnectError> {
        let Some(params) = self.connect_window.as_mut().and_then(ConnectionWindow::submit) else {
            return Ok(false);
        };
        self.connect_with(params).map(|()| true)
    }

    pub fn cancel_connect(&mut self) {
        self.connect_window = None;
    }

    fn connect_with(&mut self, params: ConnectParams) -> Result<(), ConnectError> {
        self.connect_window = None;
        tracing::info!(peer = %params, "Connect requested");
        self.client.connect(params)
    }

    /// Draw the window content for one frame
    pub fn show(&mut self, ui: &mut egui::Ui) -> anyhow::Result<()> {
        self.pump_events();

        let mut result: anyhow::Result<()> = Ok(());

        ui.vertical(|ui| {
            if let Some(pos) = self.board.show(ui) {
                keep_first_error(&mut result, self.on_board_click(pos.x, pos.y));
            }

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.controls.connect, egui::Button::new("Connect"))
                    .clicked()
                {
                    self.on_connect_pressed();
                }
                if ui
                    .add_enabled(self.controls.new_game, egui::Button::new("New Game"))
                    .clicked()
                {
                    keep_first_error(&mut result, self.on_new_game_pressed());
                }
                if ui
                    .add_enabled(self.controls.disconnect, egui::Button::new("Disconnect"))
                    .clicked()
                {
                    keep_first_error(&mut result, self.on_disconnect_pressed());
                }
            });

            ui.label(self.status_text.as_str());
        });

        if let Some(window) = self.connect_window.as_mut() {
            match window.show(ui.ctx()) {
                DialogOutcome::Pending => {}
                DialogOutcome::Cancelled => self.cancel_connect(),
                DialogOutcome::Submitted(params) => {
                    keep_first_error(&mut result, self.connect_with(params));
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_of_a_frame_wins() {
        let mut result = Ok(());
        keep_first_error(&mut result, Ok::<(), GameError>(()));
        assert!(result.is_ok());

        keep_first_error(&mut result, Err(GameError::IllegalMove { x: 1, y: 2 }));
        keep_first_error(&mut result, Err(GameError::NotConnected));
        keep_first_error(&mut result, Err(ConnectError::AlreadyConnected));

        let error = result.unwrap_err();
        assert_eq!(
            error.downcast_ref::<GameError>(),
            Some(&GameError::IllegalMove { x: 1, y: 2 })
        );
    }
}
