//! Pure decision logic mapping window state to ordered corrective platform actions.

use platform_host::{WindowBounds, WindowState};

use crate::model::WindowDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One platform operation to issue against a live window.
pub enum WindowAction {
    /// Apply outer bounds.
    SetBounds(WindowBounds),
    /// Leave any window group.
    LeaveGroup,
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
    /// Raise above sibling windows.
    BringToFront,
}

impl WindowAction {
    /// Returns a short stable label used in logs and errors.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SetBounds(_) => "set-bounds",
            Self::LeaveGroup => "leave-group",
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Restore => "restore",
            Self::BringToFront => "bring-to-front",
        }
    }
}

/// Returns the ordered actions that bring a live window in line with `descriptor`.
///
/// Bounds always go first. Tabbed windows only need to be shown, since the tab group governs
/// their grouping and visibility. Everything else leaves its group before state correction.
pub fn reconcile_actions(descriptor: &WindowDescriptor) -> Vec<WindowAction> {
    let mut actions = vec![WindowAction::SetBounds(descriptor.bounds)];
    if descriptor.is_tabbed {
        actions.push(WindowAction::Show);
        return actions;
    }
    actions.push(WindowAction::LeaveGroup);
    actions.extend_from_slice(state_actions(descriptor.is_showing, descriptor.state));
    actions
}

/// Returns the state-correction tail for an ungrouped window.
///
/// Hidden wins over any saved state. A restored window still needs an explicit show because
/// restore alone emits no shown event for the UI to observe.
pub const fn state_actions(is_showing: bool, state: WindowState) -> &'static [WindowAction] {
    if !is_showing {
        return &[WindowAction::Hide];
    }
    match state {
        WindowState::Normal => &[WindowAction::Restore, WindowAction::Show],
        WindowState::Minimized => &[WindowAction::Minimize],
        WindowState::Maximized => &[WindowAction::Maximize],
    }
}

/// Returns what the maximize button should do for a window currently in `state`.
pub const fn toggle_maximize_actions(state: WindowState) -> &'static [WindowAction] {
    match state {
        WindowState::Maximized | WindowState::Minimized => {
            &[WindowAction::Restore, WindowAction::BringToFront]
        }
        WindowState::Normal => &[WindowAction::Maximize],
    }
}
