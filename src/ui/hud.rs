use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthStr;

use crate::config::PALETTE;
use crate::game::Snapshot;

const HINT_TEXT: &str = "arrows/WASD move · P pause · Q quit";

/// Renders the score and hint rows and returns the remaining play area above
/// them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) -> Rect {
    let [play_area, score_area, hint_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let score_text = format!("Size: {}", snapshot.length);
    draw_centered(
        frame,
        score_area,
        &score_text,
        Style::new()
            .fg(PALETTE.score)
            .add_modifier(Modifier::BOLD),
    );
    draw_centered(frame, hint_area, HINT_TEXT, Style::new().fg(PALETTE.hint));

    play_area
}

/// Writes `text` horizontally centered in the single-row `area`.
fn draw_centered(frame: &mut Frame<'_>, area: Rect, text: &str, style: Style) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let x = area.x + centered_offset(area.width, text);
    let max_width = usize::from(area.right().saturating_sub(x));
    let _ = frame
        .buffer_mut()
        .set_stringn(x, area.y, text, max_width, style);
}

fn centered_offset(available: u16, text: &str) -> u16 {
    let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
    available.saturating_sub(width) / 2
}
