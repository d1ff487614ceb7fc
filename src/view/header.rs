//! Floating header: pane title and the stop-generating affordance.

use crate::state::AppState;
use crate::view::constants::STOP_AFFORDANCE_LABEL;
use crate::view::styles::PaneStyles;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// Measured header height for the current state and width.
///
/// One content row plus the separating border; the stop affordance gets
/// its own row when the title leaves it no room.
pub fn measure(title: &str, ai_replying: bool, width: u16) -> u16 {
    let mut rows = 2;
    if ai_replying && !affordance_fits(title, width) {
        rows += 1;
    }
    rows
}

fn affordance_fits(title: &str, width: u16) -> bool {
    let needed = UnicodeWidthStr::width(title) + UnicodeWidthStr::width(STOP_AFFORDANCE_LABEL) + 3;
    needed <= width as usize
}

/// Render the header into its floating area.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, styles: &PaneStyles) {
    let mut lines = Vec::new();

    if state.ai_replying && affordance_fits(&state.title, area.width) {
        // Title and affordance share the row, affordance pushed right.
        let gap = area.width as usize
            - UnicodeWidthStr::width(state.title.as_str())
            - UnicodeWidthStr::width(STOP_AFFORDANCE_LABEL)
            - 1;
        lines.push(Line::from(vec![
            Span::styled(state.title.clone(), styles.chrome()),
            Span::raw(" ".repeat(gap + 1)),
            Span::styled(STOP_AFFORDANCE_LABEL, styles.notice_warning()),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            state.title.clone(),
            styles.chrome(),
        )));
        if state.ai_replying {
            lines.push(Line::from(Span::styled(
                STOP_AFFORDANCE_LABEL,
                styles.notice_warning(),
            )));
        }
    }

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(styles.chrome()),
    );
    frame.render_widget(header, area);
}
