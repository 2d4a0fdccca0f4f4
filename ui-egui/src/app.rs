// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main application state and error surfacing.

use eframe::egui;
use gomoku_core::{ConnectionSource, GameSource};
use std::sync::Arc;

use crate::shell::ConnectionAwareShell;
use crate::ui_config::UiConfig;

/// Main application state
pub struct GomokuApp {
    /// The window content
    shell: ConnectionAwareShell,
    /// Last failed action, shown until dismissed
    error_msg: Option<String>,
}

impl GomokuApp {
    pub fn new(
        ctx: &egui::Context,
        game: Arc<dyn GameSource>,
        client: Arc<dyn ConnectionSource>,
        config: &UiConfig,
    ) -> Self {
        Self {
            shell: ConnectionAwareShell::new(ctx, game, client, config),
            error_msg: None,
        }
    }

    pub fn shell(&self) -> &ConnectionAwareShell {
        &self.shell
    }

    pub fn error_msg(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }

    /// Collaborator errors end up here instead of being dropped by the shell
    pub fn surface(&mut self, result: anyhow::Result<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "Action failed");
            self.error_msg = Some(e.to_string());
        }
    }

    /// Lay out one frame
    pub fn ui(&mut self, ctx: &egui::Context) {
        if let Some(error) = self.error_msg.clone() {
            egui::TopBottomPanel::bottom("error_panel").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(220, 38, 38), error);
                    if ui.small_button("Dismiss").clicked() {
                        self.error_msg = None;
                    }
                });
            });
        }

        let result = egui::CentralPanel::default()
            .show(ctx, |ui| self.shell.show(ui))
            .inner;
        self.surface(result);
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
