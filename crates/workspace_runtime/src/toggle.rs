//! Maximize-button behavior for a single live window.

use platform_host::{WindowHandle, WindowState};

use crate::{
    error::PlatformError, reconciler::apply_action, state_machine::toggle_maximize_actions,
};

#[derive(Debug, Clone, Copy, Default)]
/// Toggles a window between maximized and restored based on its live state.
pub struct WindowToggleController;

impl WindowToggleController {
    /// Restores and raises a maximized or minimized window; maximizes a normal one.
    ///
    /// Returns the state the window reported before the toggle.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Host`] naming the first operation the host rejected.
    pub async fn toggle_maximize(
        &self,
        handle: &dyn WindowHandle,
    ) -> Result<WindowState, PlatformError> {
        let state = handle
            .get_state()
            .await
            .map_err(PlatformError::host("get-state"))?;
        for action in toggle_maximize_actions(state) {
            apply_action(handle, *action)
                .await
                .map_err(PlatformError::host(action.label()))?;
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{MemoryWindowPlatform, MemoryWindowRecord, WindowBounds, WindowCall};
    use pretty_assertions::assert_eq;

    use super::*;

    fn host_with(state: WindowState) -> MemoryWindowPlatform {
        let host = MemoryWindowPlatform::default();
        let mut record = MemoryWindowRecord::new("/shell", WindowBounds::default());
        record.state = state;
        host.insert_window("shell", record);
        host
    }

    #[test]
    fn minimized_window_is_restored_and_raised() {
        let host = host_with(WindowState::Minimized);
        let before = block_on(WindowToggleController.toggle_maximize(&host.handle("shell")))
            .expect("toggle");

        assert_eq!(before, WindowState::Minimized);
        assert_eq!(
            host.calls_for("shell"),
            vec![WindowCall::Restore, WindowCall::BringToFront]
        );
        assert_eq!(host.frontmost().as_deref(), Some("shell"));
    }

    #[test]
    fn maximized_window_is_restored_and_raised() {
        let host = host_with(WindowState::Maximized);
        block_on(WindowToggleController.toggle_maximize(&host.handle("shell"))).expect("toggle");

        assert_eq!(
            host.calls_for("shell"),
            vec![WindowCall::Restore, WindowCall::BringToFront]
        );
        assert_eq!(
            host.window("shell").expect("record").state,
            WindowState::Normal
        );
    }

    #[test]
    fn normal_window_is_maximized() {
        let host = host_with(WindowState::Normal);
        block_on(WindowToggleController.toggle_maximize(&host.handle("shell"))).expect("toggle");

        assert_eq!(host.calls_for("shell"), vec![WindowCall::Maximize]);
    }

    #[test]
    fn unrecognized_reported_state_is_maximized_like_normal() {
        let host = host_with(WindowState::Minimized);
        host.report_state("shell", "restored");

        let before = block_on(WindowToggleController.toggle_maximize(&host.handle("shell")))
            .expect("toggle");

        assert_eq!(before, WindowState::Normal);
        assert_eq!(host.calls_for("shell"), vec![WindowCall::Maximize]);
    }

    #[test]
    fn toggling_twice_returns_to_normal() {
        let host = host_with(WindowState::Normal);
        let handle = host.handle("shell");
        block_on(WindowToggleController.toggle_maximize(&handle)).expect("maximize");
        block_on(WindowToggleController.toggle_maximize(&handle)).expect("restore");

        assert_eq!(
            host.window("shell").expect("record").state,
            WindowState::Normal
        );
    }

    #[test]
    fn state_query_failure_is_reported() {
        let host = host_with(WindowState::Normal);
        host.fail_handle("shell");

        let err = block_on(WindowToggleController.toggle_maximize(&host.handle("shell")))
            .expect_err("toggle should fail");
        assert_eq!(
            err,
            PlatformError::Host {
                operation: "get-state",
                reason: "window `shell` rejected get-state".to_string(),
            }
        );
        assert!(host.calls_for("shell").is_empty());
    }
}
