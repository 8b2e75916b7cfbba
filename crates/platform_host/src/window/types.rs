//! Window geometry, lifecycle state, and open-request models shared by host adapters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// Screen-space window rectangle as reported and accepted by the host.
pub struct WindowBounds {
    /// Left edge in screen pixels.
    pub left: i32,
    /// Top edge in screen pixels.
    pub top: i32,
    /// Outer width in pixels.
    pub width: i32,
    /// Outer height in pixels.
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Lifecycle state reported by a live window.
pub enum WindowState {
    /// Regular, restored window.
    #[default]
    Normal,
    /// Window is minimized to the taskbar.
    Minimized,
    /// Window fills its display.
    Maximized,
}

impl WindowState {
    /// Returns the stable wire token for this state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Minimized => "minimized",
            Self::Maximized => "maximized",
        }
    }

    /// Parses a state reported by a live handle.
    ///
    /// Hosts occasionally report states outside the known set; those are treated as
    /// [`WindowState::Normal`].
    pub fn from_reported(raw: &str) -> Self {
        match raw {
            "minimized" => Self::Minimized,
            "maximized" => Self::Maximized,
            _ => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Host identity of one window, keyed by its unique name.
pub struct WindowIdentity {
    /// Unique window name within the current application.
    pub name: String,
}

impl WindowIdentity {
    /// Builds an identity for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Configuration for opening a new top-level window.
pub struct WindowOpenConfig {
    /// Unique window name.
    pub name: String,
    /// Content URL loaded into the window.
    pub url: String,
    /// Initial outer width.
    pub width: i32,
    /// Initial outer height.
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// One-time initial placement applied when a window is first opened.
pub struct PositionOverride {
    /// Initial left edge.
    pub default_left: i32,
    /// Initial top edge.
    pub default_top: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Journal entry for one platform operation issued against a window.
pub enum WindowCall {
    /// Window open request.
    Open {
        /// Requested configuration.
        config: WindowOpenConfig,
        /// Requested initial placement, if any.
        position: Option<PositionOverride>,
    },
    /// Window close.
    Close,
    /// Make visible.
    Show,
    /// Make invisible.
    Hide,
    /// Minimize.
    Minimize,
    /// Maximize.
    Maximize,
    /// Restore from minimized/maximized.
    Restore,
    /// Apply bounds.
    SetBounds(WindowBounds),
    /// Leave the current window group.
    LeaveGroup,
    /// Raise above sibling windows.
    BringToFront,
}

impl WindowCall {
    /// Returns a short stable label used in logs and diagnostics.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open",
            Self::Close => "close",
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Restore => "restore",
            Self::SetBounds(_) => "set-bounds",
            Self::LeaveGroup => "leave-group",
            Self::BringToFront => "bring-to-front",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_state_uses_lowercase_wire_tokens() {
        let json = serde_json::to_string(&WindowState::Maximized).expect("serialize state");
        assert_eq!(json, "\"maximized\"");
        let parsed: WindowState = serde_json::from_str("\"minimized\"").expect("parse state");
        assert_eq!(parsed, WindowState::Minimized);
    }

    #[test]
    fn unrecognized_reported_state_falls_back_to_normal() {
        assert_eq!(WindowState::from_reported("maximized"), WindowState::Maximized);
        assert_eq!(WindowState::from_reported("fullscreen"), WindowState::Normal);
        assert_eq!(WindowState::from_reported(""), WindowState::Normal);
    }
}
