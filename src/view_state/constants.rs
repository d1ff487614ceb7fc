//! Core scroll-management tunables.
//!
//! Centralized location for the numeric values the windowing and follow
//! logic is parameterized on. All distances are in rows of the virtual
//! transcript document.

/// History length above which lazy windowing engages.
///
/// At or below this length the full history is materialized and the
/// window cursor stays pinned to 0.
pub const LAZY_THRESHOLD: usize = 60;

/// Number of trailing messages materialized when lazy windowing first
/// activates for a conversation.
pub const INITIAL_RENDER_COUNT: usize = 40;

/// Number of additional (older) messages materialized per load-more
/// request. The cursor floors at 0.
pub const LOAD_MORE_STEP: usize = 20;

/// Distance from the bottom, in rows, within which auto-follow stays
/// engaged. Scrolling further away than this pauses following.
pub const NEAR_BOTTOM_THRESHOLD: usize = 120;

/// Offset subtracted from the bottom by the manual jump action so the
/// landing position clears the floating composer.
pub const JUMP_BOTTOM_OFFSET: usize = 40;

/// Scroll offset, in rows from the top, at or below which a load-more
/// request is issued while older history remains.
pub const LOAD_MORE_TRIGGER: usize = 80;

/// Fixed padding rows added above and below the transcript content, on
/// top of the measured chrome heights.
pub const CONTENT_PADDING_ROWS: usize = 1;

/// Columns reserved for the bubble gutter; text wraps to the remainder.
pub const TEXT_INDENT_COLS: u16 = 2;
