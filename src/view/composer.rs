//! Floating composer dock: input echo, recording state, staged files.
//!
//! The pane never interprets input; it echoes the composer value and
//! forwards edits to the host verbatim.

use crate::state::{AppState, ComposerState};
use crate::view::constants::COMPOSER_PLACEHOLDER;
use crate::view::styles::PaneStyles;
use crate::view_state::layout::wrapped_rows;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Measured composer-dock height for the current state and width.
///
/// The separating border, the wrapped input text (at least one row),
/// and one status row. Multi-line input grows the dock, which in turn
/// grows the scroll area's bottom padding.
pub fn measure(composer: &ComposerState, width: u16) -> u16 {
    let wrap_width = width.saturating_sub(2).max(1);
    let input_rows = if composer.value.is_empty() {
        1
    } else {
        wrapped_rows(&composer.value, wrap_width).min(u16::MAX as usize) as u16
    };
    1 + input_rows.max(1) + 1
}

/// Render the composer dock into its floating area.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, styles: &PaneStyles) {
    let composer = &state.composer;

    let input_line = if composer.value.is_empty() {
        Line::from(Span::styled(COMPOSER_PLACEHOLDER, styles.hint()))
    } else {
        Line::from(Span::raw(composer.value.clone()))
    };

    let mut status_spans = Vec::new();
    if composer.recording {
        status_spans.push(Span::styled("● rec ", styles.notice_warning()));
    }
    if !composer.files.is_empty() {
        status_spans.push(Span::styled(
            format!("{} file(s) staged ", composer.files.len()),
            styles.hint(),
        ));
    }
    status_spans.push(Span::styled(
        "Enter send · ^R record · PgUp/PgDn scroll · End jump · ^C quit",
        styles.hint(),
    ));

    let dock = Paragraph::new(vec![input_line, Line::from(status_spans)])
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(styles.chrome()),
        );
    frame.render_widget(dock, area);
}
