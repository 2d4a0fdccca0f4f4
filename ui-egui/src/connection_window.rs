// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialog asking where to connect.

use gomoku_core::ConnectParams;

/// Result of showing the dialog for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Still open
    Pending,
    /// Closed without connecting
    Cancelled,
    /// User asked to connect with these parameters
    Submitted(ConnectParams),
}

/// Host/port entry window
pub struct ConnectionWindow {
    host: String,
    port: String,
    error: Option<String>,
}

impl ConnectionWindow {
    /// Open with fields pre-filled from `defaults`
    pub fn new(defaults: &ConnectParams) -> Self {
        Self {
            host: defaults.host.clone(),
            port: defaults.port.to_string(),
            error: None,
        }
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn set_port(&mut self, port: impl Into<String>) {
        self.port = port.into();
    }

    /// Inline validation message from the last failed submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate the fields. The host is left for the client to judge.
    pub fn submit(&mut self) -> Option<ConnectParams> {
        match self.port.trim().parse::<u16>() {
            Ok(port) => {
                self.error = None;
                Some(ConnectParams::new(self.host.trim(), port))
            }
            Err(_) => {
                self.error = Some(format!("Invalid port: {:?}", self.port));
                None
            }
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> DialogOutcome {
        let mut outcome = DialogOutcome::Pending;

        egui::Window::new("Connect")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Grid::new("connect_fields")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Host");
                        ui.text_edit_singleline(&mut self.host);
                        ui.end_row();

                        ui.label("Port");
                        ui.text_edit_singleline(&mut self.port);
                        ui.end_row();
                    });

                if let Some(error) = &self.error {
                    ui.colored_label(egui::Color32::from_rgb(220, 38, 38), error.as_str());
                }

                ui.horizontal(|ui| {
                    if ui.button("Connect").clicked() {
                        if let Some(params) = self.submit() {
                            outcome = DialogOutcome::Submitted(params);
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = DialogOutcome::Cancelled;
                    }
                });
            });

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefilled_fields_submit_as_is() {
        let mut window = ConnectionWindow::new(&ConnectParams::new("localhost", 4000));
        assert_eq!(window.submit(), Some(ConnectParams::new("localhost", 4000)));
    }

    #[test]
    fn bad_port_stays_open_with_a_message() {
        let mut window = ConnectionWindow::new(&ConnectParams::new("localhost", 4000));
        window.set_port("70000");
        assert_eq!(window.submit(), None);
        assert!(window.error().is_some());

        window.set_port(" 4001 ");
        window.set_host(" example.org ");
        assert_eq!(window.submit(), Some(ConnectParams::new("example.org", 4001)));
        assert_eq!(window.error(), None);
    }
}
