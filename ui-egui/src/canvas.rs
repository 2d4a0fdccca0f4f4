// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drawing targets for the board view.

use egui::{Color32, Painter, Pos2, Stroke, Vec2};

/// The two primitives the board is drawn with
pub trait Canvas {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
    fn filled_circle(&mut self, center: Pos2, radius: f32, color: Color32);
}

/// Draws onto an egui painter, offset to the board's allocated rect
pub struct PainterCanvas<'a> {
    painter: &'a Painter,
    origin: Vec2,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
        }
    }
}

impl Canvas for PainterCanvas<'_> {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([from + self.origin, to + self.origin], stroke);
    }

    fn filled_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(center + self.origin, radius, color);
    }
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    },
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
}

/// Canvas that keeps every draw call, for headless rendering checks
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl Canvas for RecordingCanvas {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn filled_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}
