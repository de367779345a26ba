use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    GLYPH_APPLE, GLYPH_BODY_HORIZONTAL, GLYPH_BODY_VERTICAL, GLYPH_CORNER_DOWN_LEFT,
    GLYPH_CORNER_DOWN_RIGHT, GLYPH_CORNER_UP_LEFT, GLYPH_CORNER_UP_RIGHT, GLYPH_HEAD_DOWN,
    GLYPH_HEAD_LEFT, GLYPH_HEAD_RIGHT, GLYPH_HEAD_UP, GridSize, PALETTE,
};
use crate::game::{SessionStatus, Snapshot};
use crate::input::Heading;
use crate::snake::{Position, SegmentOrientation};
use crate::ui::hud::render_hud;
use crate::ui::menu::render_pause_menu;

/// Renders the full frame from an immutable snapshot.
///
/// Every grid cell is `tile_width` terminal columns wide so the board looks
/// roughly square in a typical terminal font.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, tile_width: u16) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot);
    let board_area = board_rect(play_area, snapshot.bounds, tile_width);

    let block = Block::bordered().border_style(Style::new().fg(PALETTE.border_fg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let board = BoardGeometry {
        inner,
        bounds: snapshot.bounds,
        tile_width,
    };
    render_background(frame, &board);
    render_apples(frame, &board, snapshot);
    render_snake(frame, &board, snapshot);

    if snapshot.status == SessionStatus::Paused {
        render_pause_menu(frame, play_area);
    }
}

#[derive(Debug, Clone, Copy)]
struct BoardGeometry {
    inner: Rect,
    bounds: GridSize,
    tile_width: u16,
}

impl BoardGeometry {
    fn cell_origin(&self, position: Position) -> Option<(u16, u16)> {
        if !position.is_within_bounds(self.bounds) {
            return None;
        }

        let column = u16::try_from(position.x).ok()?;
        let row = u16::try_from(position.y).ok()?;

        let x = self
            .inner
            .x
            .saturating_add(column.saturating_mul(self.tile_width));
        let y = self.inner.y.saturating_add(row);
        if x >= self.inner.right() || y >= self.inner.bottom() {
            return None;
        }

        Some((x, y))
    }

    /// Writes `glyph` followed by `pad` into the cell, clipped to the board.
    fn paint(
        &self,
        frame: &mut Frame<'_>,
        position: Position,
        glyph: &str,
        pad: &str,
        style: Style,
    ) {
        let Some((x, y)) = self.cell_origin(position) else {
            return;
        };

        let buffer = frame.buffer_mut();
        buffer.set_string(x, y, glyph, style);
        for offset in 1..self.tile_width {
            let column = x.saturating_add(offset);
            if column >= self.inner.right() {
                break;
            }
            buffer.set_string(column, y, pad, style);
        }
    }
}

fn board_rect(play_area: Rect, bounds: GridSize, tile_width: u16) -> Rect {
    let width = bounds.width.saturating_mul(tile_width).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(play_area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    board
}

fn tile_color(position: Position) -> Color {
    if (position.x + position.y) % 2 == 1 {
        PALETTE.tile_dark
    } else {
        PALETTE.tile_light
    }
}

fn render_background(frame: &mut Frame<'_>, board: &BoardGeometry) {
    for y in 0..i32::from(board.bounds.height) {
        for x in 0..i32::from(board.bounds.width) {
            let position = Position { x, y };
            let style = Style::new().bg(tile_color(position));
            board.paint(frame, position, " ", " ", style);
        }
    }
}

fn render_apples(frame: &mut Frame<'_>, board: &BoardGeometry, snapshot: &Snapshot) {
    for apple in &snapshot.apples {
        let style = Style::new().fg(PALETTE.apple).bg(tile_color(*apple));
        board.paint(frame, *apple, GLYPH_APPLE, " ", style);
    }
}

fn render_snake(frame: &mut Frame<'_>, board: &BoardGeometry, snapshot: &Snapshot) {
    let last = snapshot.body.len().saturating_sub(1);

    for (index, segment) in snapshot.body.iter().enumerate() {
        let position = segment.position;
        let background = tile_color(position);

        if index == last {
            let style = Style::new()
                .fg(PALETTE.snake_head)
                .bg(background)
                .add_modifier(Modifier::BOLD);
            let glyph = head_glyph(segment.orientation.exit());
            board.paint(frame, position, glyph, " ", style);
            continue;
        }

        let color = if index == 0 {
            PALETTE.snake_tail
        } else {
            PALETTE.snake_body
        };
        let style = Style::new().fg(color).bg(background);
        let pad = if connects_right(segment.orientation) {
            GLYPH_BODY_HORIZONTAL
        } else {
            " "
        };
        board.paint(frame, position, body_glyph(segment.orientation), pad, style);
    }
}

fn head_glyph(heading: Heading) -> &'static str {
    match heading {
        Heading::Up => GLYPH_HEAD_UP,
        Heading::Right => GLYPH_HEAD_RIGHT,
        Heading::Down => GLYPH_HEAD_DOWN,
        Heading::Left => GLYPH_HEAD_LEFT,
    }
}

/// Sides of the cell a segment connects to: where it came in and where it
/// goes out.
fn connected_sides(orientation: SegmentOrientation) -> (Heading, Heading) {
    (orientation.entry().opposite(), orientation.exit())
}

fn connects_right(orientation: SegmentOrientation) -> bool {
    let (from, to) = connected_sides(orientation);
    from == Heading::Right || to == Heading::Right
}

fn body_glyph(orientation: SegmentOrientation) -> &'static str {
    if !orientation.is_corner() {
        return if orientation.exit().is_horizontal() {
            GLYPH_BODY_HORIZONTAL
        } else {
            GLYPH_BODY_VERTICAL
        };
    }

    let (from, to) = connected_sides(orientation);
    let vertical = if from.is_horizontal() { to } else { from };
    let horizontal = if from.is_horizontal() { from } else { to };
    match (vertical, horizontal) {
        (Heading::Up, Heading::Left) => GLYPH_CORNER_UP_LEFT,
        (Heading::Up, _) => GLYPH_CORNER_UP_RIGHT,
        (_, Heading::Left) => GLYPH_CORNER_DOWN_LEFT,
        _ => GLYPH_CORNER_DOWN_RIGHT,
    }
}
