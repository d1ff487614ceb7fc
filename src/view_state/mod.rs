//! View-state layer - lazy windowing, scroll geometry, and anchoring
//!
//! This module implements the scroll-management core of the pane,
//! responsible for deciding which suffix of the history is materialized,
//! how the scroll offset reacts to content-height changes, and how much
//! padding the scroll area reserves for the floating chrome.
//!
//! # Module Structure
//!
//! - `constants`: Core tunables (lazy threshold, load step, follow distance)
//! - `types`: Core newtypes (RowHeight, MessageIndex)
//! - `metrics`: ScrollMetrics - the scroll container geometry triple
//! - `height_index`: HeightIndex - O(log n) cumulative heights via Fenwick tree
//! - `layout`: Per-message height calculation (wrap-aware)
//! - `window`: LazyWindow - the materialized suffix cursor
//! - `anchor`: PendingAnchor + post-layout scroll adjustment
//! - `chrome`: ChromeTracker - header/composer heights as scroll padding
//! - `transcript`: TranscriptViewState - composition + frame pipeline

pub mod anchor;
pub mod chrome;
pub mod constants;
pub mod height_index;
pub mod layout;
pub mod metrics;
pub mod transcript;
pub mod types;
pub mod window;
