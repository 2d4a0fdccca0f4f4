// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(clippy::all)]

//! Gomoku UI library

pub mod app;
pub mod board_view;
pub mod canvas;
pub mod connection_window;
pub mod msg;
pub mod shell;
pub mod ui_config;
pub mod view;

pub use app::GomokuApp;
pub use board_view::{BoardStyle, BoardView};
pub use shell::ConnectionAwareShell;
pub use ui_config::UiConfig;
