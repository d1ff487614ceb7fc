//! Rendering layer.
//!
//! The transcript scroll area spans the whole pane; the header and the
//! composer dock float above it (drawn last), which is why their
//! measured heights are republished as scroll padding by the chrome
//! tracker rather than carved out of the layout.

pub mod chat;
pub mod composer;
pub mod constants;
pub mod header;
pub mod styles;

pub use styles::{ColorConfig, PaneStyles};

use crate::state::{AppState, NoticeKind};
use crate::view::constants::JUMP_AFFORDANCE_LABEL;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// Render the whole pane for one frame.
///
/// Assumes the layout pass already ran for this frame: the transcript's
/// metrics and chrome observations reflect the current size.
pub fn render(frame: &mut Frame, state: &AppState, styles: &PaneStyles) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    // Scrollable transcript first; floating chrome over it.
    chat::render(frame, area, state, styles);

    let header_rows = state.transcript.chrome().header_rows().min(area.height);
    if header_rows > 0 {
        let header_area = Rect::new(area.x, area.y, area.width, header_rows);
        header::render(frame, header_area, state, styles);
    }

    let composer_rows = state.transcript.chrome().composer_rows().min(area.height);
    if composer_rows > 0 {
        let composer_area = Rect::new(
            area.x,
            area.y + area.height - composer_rows,
            area.width,
            composer_rows,
        );
        composer::render(frame, composer_area, state, styles);
    }

    render_offline_banner(frame, area, header_rows, state, styles);
    render_notice(frame, area, header_rows, state, styles);
    render_jump_affordance(frame, area, composer_rows, state, styles);
}

/// Persistent banner above the transcript while offline.
fn render_offline_banner(
    frame: &mut Frame,
    area: Rect,
    header_rows: u16,
    state: &AppState,
    styles: &PaneStyles,
) {
    if !state.connectivity.is_offline() || header_rows >= area.height {
        return;
    }
    let banner_area = Rect::new(area.x, area.y + header_rows, area.width, 1);
    let banner = Paragraph::new(Span::styled(
        " offline: messages will not be delivered ",
        styles.banner(),
    ));
    frame.render_widget(banner, banner_area);
}

/// One-shot connectivity notice, right-aligned below the header.
fn render_notice(
    frame: &mut Frame,
    area: Rect,
    header_rows: u16,
    state: &AppState,
    styles: &PaneStyles,
) {
    let Some(notice) = state.active_notice() else {
        return;
    };
    // The offline banner occupies the row below the header; the notice
    // sits one row further down.
    let row = header_rows + u16::from(state.connectivity.is_offline());
    if row >= area.height {
        return;
    }
    let label = format!(" {} ", notice.text);
    let width = (UnicodeWidthStr::width(label.as_str()) as u16).min(area.width);
    let x = area.x + area.width - width;
    let style = match notice.kind {
        NoticeKind::Success => styles.notice_success(),
        NoticeKind::Warning => styles.notice_warning(),
    };
    let notice_area = Rect::new(x, area.y + row, width, 1);
    frame.render_widget(Paragraph::new(Span::styled(label, style)), notice_area);
}

/// Floating jump-to-bottom affordance, visible exactly while auto-follow
/// is off.
fn render_jump_affordance(
    frame: &mut Frame,
    area: Rect,
    composer_rows: u16,
    state: &AppState,
    styles: &PaneStyles,
) {
    if state.transcript.auto_follow() {
        return;
    }
    let width = (UnicodeWidthStr::width(JUMP_AFFORDANCE_LABEL) as u16).min(area.width);
    let rows_from_bottom = composer_rows + 1;
    if rows_from_bottom >= area.height {
        return;
    }
    let affordance_area = Rect::new(
        area.x + area.width - width,
        area.y + area.height - rows_from_bottom,
        width,
        1,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(JUMP_AFFORDANCE_LABEL, styles.affordance())),
        affordance_area,
    );
}
