//! Pane styling configuration.
//!
//! Provides distinct styles for the two message roles and the chrome,
//! honouring `--no-color` and the `NO_COLOR` environment variable.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Priority (first match wins):
/// 1. `--no-color` flag (disables colors)
/// 2. `NO_COLOR` env var (any value disables colors)
/// 3. Default: colors enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== PaneStyles =====

/// Styles for every visual element of the pane.
#[derive(Debug, Clone)]
pub struct PaneStyles {
    user: Style,
    assistant: Style,
    chrome: Style,
    hint: Style,
    banner: Style,
    notice_success: Style,
    notice_warning: Style,
    affordance: Style,
}

impl PaneStyles {
    /// Create styles with the default color scheme.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Create styles under the given color configuration.
    ///
    /// With colors disabled, everything falls back to modifier-only
    /// styling so the pane stays legible on monochrome terminals.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                user: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                assistant: Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                chrome: Style::default().fg(Color::DarkGray),
                hint: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                banner: Style::default().fg(Color::White).bg(Color::Red),
                notice_success: Style::default().fg(Color::Black).bg(Color::Green),
                notice_warning: Style::default().fg(Color::Black).bg(Color::Yellow),
                affordance: Style::default().add_modifier(Modifier::REVERSED),
            }
        } else {
            Self {
                user: Style::default().add_modifier(Modifier::BOLD),
                assistant: Style::default().add_modifier(Modifier::BOLD),
                chrome: Style::default(),
                hint: Style::default().add_modifier(Modifier::DIM),
                banner: Style::default().add_modifier(Modifier::REVERSED),
                notice_success: Style::default().add_modifier(Modifier::REVERSED),
                notice_warning: Style::default().add_modifier(Modifier::REVERSED),
                affordance: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    /// Style for the user sender label.
    pub fn user(&self) -> Style {
        self.user
    }

    /// Style for the assistant sender label.
    pub fn assistant(&self) -> Style {
        self.assistant
    }

    /// Style for chrome text (borders, titles).
    pub fn chrome(&self) -> Style {
        self.chrome
    }

    /// Style for dim hints (placeholder, attachments, key help).
    pub fn hint(&self) -> Style {
        self.hint
    }

    /// Style for the offline banner.
    pub fn banner(&self) -> Style {
        self.banner
    }

    /// Style for the "connection restored" notice.
    pub fn notice_success(&self) -> Style {
        self.notice_success
    }

    /// Style for the "connection lost" notice.
    pub fn notice_warning(&self) -> Style {
        self.notice_warning
    }

    /// Style for the jump-to-bottom affordance.
    pub fn affordance(&self) -> Style {
        self.affordance
    }
}

impl Default for PaneStyles {
    fn default() -> Self {
        Self::new()
    }
}
