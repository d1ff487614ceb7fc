//! Per-message height calculation.
//!
//! Heights are the layout authority: the renderer draws each bubble into
//! exactly the area this module computed, so the cumulative offsets in
//! `HeightIndex` and what is on screen can never disagree.

use crate::model::MessageRecord;
use crate::view_state::constants::TEXT_INDENT_COLS;
use crate::view_state::types::RowHeight;
use unicode_width::UnicodeWidthStr;

/// Rows occupied by `text` when word-wrapped to `width` columns.
///
/// Hard line breaks are preserved; an empty line still occupies a row.
/// Words wider than the wrap width are broken across rows.
pub fn wrapped_rows(text: &str, width: u16) -> usize {
    let width = width.max(1) as usize;
    text.split('\n')
        .map(|line| wrapped_line_rows(line, width))
        .sum()
}

fn wrapped_line_rows(line: &str, width: usize) -> usize {
    let mut rows = 1usize;
    let mut used = 0usize;
    for word in line.split_whitespace() {
        let w = UnicodeWidthStr::width(word);
        let sep = usize::from(used > 0);
        if used + sep + w <= width {
            used += sep + w;
        } else if w <= width {
            rows += 1;
            used = w;
        } else {
            // Over-long word: break it across as many rows as needed.
            if used > 0 {
                rows += 1;
            }
            let extra_full_rows = (w - 1) / width;
            rows += extra_full_rows;
            used = w - extra_full_rows * width;
        }
    }
    rows
}

/// Height of a message bubble rendered at `area_width` columns.
///
/// One row of sender label, the wrapped body (absent while an incoming
/// reply is still empty), one row per attachment, one spinner row while
/// streaming, and one separator row.
pub fn message_height(record: &MessageRecord, area_width: u16) -> RowHeight {
    let wrap_width = area_width.saturating_sub(TEXT_INDENT_COLS).max(1);
    let text_rows = if record.text().is_empty() {
        0
    } else {
        wrapped_rows(record.text(), wrap_width)
    };
    let rows = 1
        + text_rows
        + record.attachments().len()
        + usize::from(record.is_loading())
        + 1;
    RowHeight::new(rows.min(u16::MAX as usize) as u16).unwrap_or(RowHeight::ONE)
}
