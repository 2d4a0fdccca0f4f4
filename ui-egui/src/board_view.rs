// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board view for rendering the game grid.

use crate::canvas::{Canvas, PainterCanvas};
use crate::msg::RepaintOnChange;
use egui::{Color32, Pos2, Sense, Stroke, Vec2};
use gomoku_core::{CellPos, CellState, SharedGrid};
use std::sync::Arc;

/// Colors used to draw the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardStyle {
    pub background: Color32,
    pub grid_line: Color32,
    pub player_a: Color32,
    pub player_b: Color32,
}

impl Default for BoardStyle {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            grid_line: Color32::BLACK,
            player_a: Color32::BLACK,
            player_b: Color32::from_rgb(220, 38, 38), // Red
        }
    }
}

/// Passive view of a grid it never mutates
pub struct BoardView {
    grid: Arc<SharedGrid>,
    /// Rows and columns, fixed for the view's lifetime
    board_size: usize,
    /// Cell size in pixels, shared by grid lines and markers
    cell_size: f32,
    style: BoardStyle,
}

impl BoardView {
    /// Bind a view to `grid` and ask `ctx` for a repaint whenever the grid changes.
    ///
    /// Panics if `cell_size` is not positive.
    pub fn new(ctx: &egui::Context, grid: Arc<SharedGrid>, cell_size: f32, style: BoardStyle) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive, got {cell_size}");

        grid.subscribe(Arc::new(RepaintOnChange::new(ctx.clone())));
        let board_size = grid.size();

        Self {
            grid,
            board_size,
            cell_size,
            style,
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Drawable area: one extra pixel so the last grid line is visible
    pub fn surface_size(&self) -> Vec2 {
        Vec2::splat(self.extent() + 1.0)
    }

    fn extent(&self) -> f32 {
        self.board_size as f32 * self.cell_size
    }

    /// Map a pixel offset within the surface to the cell under it.
    ///
    /// No clamping: pixels past the board give positions past the board.
    pub fn pixel_to_cell(&self, x: f32, y: f32) -> CellPos {
        CellPos::new(
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    fn marker_color(&self, state: CellState) -> Option<Color32> {
        match state {
            CellState::Empty => None,
            CellState::PlayerA => Some(self.style.player_a),
            CellState::PlayerB => Some(self.style.player_b),
        }
    }

    /// Draw grid lines and occupancy markers from the grid's current snapshot
    pub fn render(&self, canvas: &mut impl Canvas) {
        let grid = self.grid.snapshot();
        let extent = self.extent();
        let line_stroke = Stroke::new(1.0, self.style.grid_line);

        for i in 0..=self.board_size {
            let offset = i as f32 * self.cell_size;

            // Vertical
            canvas.line(Pos2::new(offset, 0.0), Pos2::new(offset, extent), line_stroke);
            // Horizontal
            canvas.line(Pos2::new(0.0, offset), Pos2::new(extent, offset), line_stroke);
        }

        let radius = self.cell_size / 2.0;
        for (x, y, state) in grid.occupied() {
            if let Some(color) = self.marker_color(state) {
                let center = Pos2::new(
                    x as f32 * self.cell_size + radius,
                    y as f32 * self.cell_size + radius,
                );
                canvas.filled_circle(center, radius, color);
            }
        }
    }

    /// Lay out and paint the board. Returns the clicked pixel, relative to the
    /// board's top-left corner, if the board was clicked this frame.
    pub fn show(&self, ui: &mut egui::Ui) -> Option<Pos2> {
        let (rect, response) = ui.allocate_exact_size(self.surface_size(), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, self.style.background);
            self.render(&mut PainterCanvas::new(&painter, rect.min));
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - rect.min;
                tracing::debug!(pos_x = local.x, pos_y = local.y, "Board click detected");
                return Some(local.to_pos2());
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use rand::Rng;

    fn view(size: usize, cell_size: f32) -> (Arc<SharedGrid>, BoardView) {
        let grid = Arc::new(SharedGrid::new(size));
        let view = BoardView::new(
            &egui::Context::default(),
            grid.clone(),
            cell_size,
            BoardStyle::default(),
        );
        (grid, view)
    }

    #[test]
    fn surface_leaves_room_for_last_line() {
        let (_, view) = view(15, 20.0);
        assert_eq!(view.surface_size(), Vec2::new(301.0, 301.0));
    }

    #[test]
    fn click_maps_to_cell() {
        let (_, view) = view(15, 20.0);
        assert_eq!(view.pixel_to_cell(45.0, 61.0), CellPos::new(2, 3));
        assert_eq!(view.pixel_to_cell(0.0, 0.0), CellPos::new(0, 0));
        assert_eq!(view.pixel_to_cell(19.9, 20.0), CellPos::new(0, 1));
    }

    #[test]
    fn pixels_past_the_board_are_not_clamped() {
        let (_, view) = view(15, 20.0);
        assert_eq!(view.pixel_to_cell(300.0, 305.0), CellPos::new(15, 15));
        assert_eq!(view.pixel_to_cell(-1.0, 10.0), CellPos::new(-1, 0));
    }

    #[test]
    fn mapping_is_floor_division_everywhere_on_the_board() {
        let mut rng = rand::thread_rng();
        for &(size, cell) in &[(15usize, 20.0f32), (9, 33.0), (19, 7.0), (1, 1.0)] {
            let (_, view) = view(size, cell);
            let extent = size as f32 * cell;
            for _ in 0..500 {
                let x = rng.gen_range(0.0..extent);
                let y = rng.gen_range(0.0..extent);
                let pos = view.pixel_to_cell(x, y);
                assert_eq!(pos.x, (x / cell).floor() as i32);
                assert_eq!(pos.y, (y / cell).floor() as i32);
                assert!(pos.is_valid(size), "{x},{y} -> {pos:?}");
            }
        }
    }

    #[test]
    fn render_draws_every_line_and_one_marker_per_stone() {
        let (grid, view) = view(4, 10.0);
        grid.update(|g| {
            g.set(0, 0, CellState::PlayerA);
            g.set(3, 1, CellState::PlayerB);
            g.set(2, 3, CellState::PlayerA);
        });

        let mut canvas = RecordingCanvas::new();
        view.render(&mut canvas);

        assert_eq!(canvas.lines().count(), 2 * (4 + 1));
        assert_eq!(canvas.circles().count(), 3);

        let style = BoardStyle::default();
        let expected = [
            (Pos2::new(5.0, 5.0), style.player_a),
            (Pos2::new(35.0, 15.0), style.player_b),
            (Pos2::new(25.0, 35.0), style.player_a),
        ];
        let circles: Vec<_> = canvas.circles().cloned().collect();
        for (command, (center, color)) in circles.iter().zip(expected) {
            assert_eq!(
                *command,
                DrawCommand::Circle {
                    center,
                    radius: 5.0,
                    color
                }
            );
        }
    }

    #[test]
    fn lines_span_the_whole_board_at_marker_spacing() {
        let (_, view) = view(3, 20.0);
        let mut canvas = RecordingCanvas::new();
        view.render(&mut canvas);

        let lines: Vec<_> = canvas.lines().cloned().collect();
        assert_eq!(
            lines[2],
            DrawCommand::Line {
                from: Pos2::new(20.0, 0.0),
                to: Pos2::new(20.0, 60.0),
                stroke: Stroke::new(1.0, Color32::BLACK),
            }
        );
        assert_eq!(
            lines[7],
            DrawCommand::Line {
                from: Pos2::new(0.0, 60.0),
                to: Pos2::new(60.0, 60.0),
                stroke: Stroke::new(1.0, Color32::BLACK),
            }
        );
    }

    #[test]
    fn render_is_idempotent() {
        let (grid, view) = view(6, 12.0);
        grid.update(|g| {
            g.set(5, 5, CellState::PlayerB);
        });

        let mut first = RecordingCanvas::new();
        let mut second = RecordingCanvas::new();
        view.render(&mut first);
        view.render(&mut second);

        assert_eq!(first.commands, second.commands);
        assert_eq!(grid.snapshot().occupied_count(), 1);
    }

    #[test]
    fn empty_grid_draws_no_markers() {
        let (_, view) = view(15, 20.0);
        let mut canvas = RecordingCanvas::new();
        view.render(&mut canvas);
        assert_eq!(canvas.circles().count(), 0);
        assert_eq!(canvas.lines().count(), 32);
    }

    #[test]
    #[should_panic]
    fn zero_cell_size_is_rejected() {
        view(15, 0.0);
    }
}
