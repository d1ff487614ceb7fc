//! Transcript rendering: message bubbles in the scroll area.
//!
//! The bubbles are drawn at the rows the transcript view-state computed;
//! this module never makes scroll decisions of its own.

use crate::model::{MessageRecord, Role};
use crate::state::AppState;
use crate::view::constants::{ASSISTANT_LABEL, EMPTY_STATE_HINT, SPINNER_FRAMES, USER_LABEL};
use crate::view::styles::PaneStyles;
use crate::view_state::constants::TEXT_INDENT_COLS;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

/// Render the visible transcript slice into the scroll area.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, styles: &PaneStyles) {
    let history = state.history();
    if history.is_empty() {
        render_empty_state(frame, area, styles);
        return;
    }

    let records = history.records();
    for slot in state.transcript.visible_slots(history.len()) {
        let Some(record) = records.get(slot.history_index) else {
            continue;
        };

        // Clip the bubble to the viewport: rows scrolled off above are
        // skipped inside the paragraph, rows below the area are cut by
        // the render rect.
        let skip = (-slot.top_row).max(0) as u16;
        if skip >= slot.height {
            continue;
        }
        let y = slot.top_row.max(0) as u16;
        if y >= area.height {
            continue;
        }
        let visible_rows = (slot.height - skip).min(area.height - y);
        if visible_rows == 0 {
            continue;
        }

        let indent = TEXT_INDENT_COLS.min(area.width.saturating_sub(1));
        let bubble_area = Rect::new(
            area.x + indent,
            area.y + y,
            area.width - indent,
            visible_rows,
        );
        let bubble = Paragraph::new(bubble_text(record, state.spinner_frame, styles))
            .wrap(Wrap { trim: false })
            .scroll((skip, 0));
        frame.render_widget(bubble, bubble_area);
    }
}

/// Bubble content: sender label, body, attachments, spinner.
fn bubble_text<'a>(
    record: &'a MessageRecord,
    spinner_frame: usize,
    styles: &PaneStyles,
) -> Text<'a> {
    let mut text = match record.role() {
        Role::User => {
            let mut text = Text::from(Line::from(Span::styled(USER_LABEL, styles.user())));
            if !record.text().is_empty() {
                for line in record.text().split('\n') {
                    text.push_line(Line::raw(line));
                }
            }
            text
        }
        Role::Assistant => {
            let mut text = Text::from(Line::from(Span::styled(
                ASSISTANT_LABEL,
                styles.assistant(),
            )));
            if !record.text().is_empty() {
                text.extend(tui_markdown::from_str(record.text()));
            }
            text
        }
    };

    for attachment in record.attachments() {
        text.push_line(Line::from(Span::styled(
            format!("attachment: {}", attachment.name()),
            styles.hint(),
        )));
    }

    if record.is_loading() {
        let frame_glyph = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        text.push_line(Line::from(Span::styled(
            frame_glyph.to_string(),
            styles.assistant(),
        )));
    }

    text
}

/// Hint shown when the conversation has no messages yet.
fn render_empty_state(frame: &mut Frame, area: Rect, styles: &PaneStyles) {
    let row = area.height / 2;
    let hint_area = Rect::new(area.x, area.y + row, area.width, 1);
    let hint = Paragraph::new(Span::styled(EMPTY_STATE_HINT, styles.hint()))
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(hint, hint_area);
}
