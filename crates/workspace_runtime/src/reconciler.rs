//! Effectful driver that walks one live window through its corrective action list.

use leptos::logging;
use platform_host::WindowHandle;

use crate::{
    error::RestoreError,
    model::WindowDescriptor,
    state_machine::{reconcile_actions, WindowAction},
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Settled result of one per-window restore pipeline.
pub enum PipelineOutcome {
    /// A window with no live counterpart was opened.
    Launched {
        /// Descriptor name.
        name: String,
    },
    /// An existing window was brought in line with its descriptor.
    Reconciled {
        /// Descriptor name.
        name: String,
    },
    /// The pipeline stopped at a failing step.
    Failed(RestoreError),
}

impl PipelineOutcome {
    /// Returns whether the pipeline failed.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Issues one [`WindowAction`] against `handle`.
pub(crate) async fn apply_action(
    handle: &dyn WindowHandle,
    action: WindowAction,
) -> Result<(), String> {
    match action {
        WindowAction::SetBounds(bounds) => handle.set_bounds(bounds).await,
        WindowAction::LeaveGroup => handle.leave_group().await,
        WindowAction::Show => handle.show().await,
        WindowAction::Hide => handle.hide().await,
        WindowAction::Minimize => handle.minimize().await,
        WindowAction::Maximize => handle.maximize().await,
        WindowAction::Restore => handle.restore().await,
        WindowAction::BringToFront => handle.bring_to_front().await,
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Drives existing windows through bounds, grouping, and visibility correction.
pub struct WindowReconciler;

impl WindowReconciler {
    /// Reconciles `handle` with `descriptor`, one awaited step at a time.
    ///
    /// A failing step ends the pipeline where it stands; the failure is logged and reported in the
    /// outcome, never propagated.
    pub async fn reconcile(
        &self,
        descriptor: &WindowDescriptor,
        handle: &dyn WindowHandle,
    ) -> PipelineOutcome {
        match self.try_reconcile(descriptor, handle).await {
            Ok(()) => PipelineOutcome::Reconciled {
                name: descriptor.name.clone(),
            },
            Err(err) => {
                logging::warn!("workspace restore: {err}");
                PipelineOutcome::Failed(err)
            }
        }
    }

    async fn try_reconcile(
        &self,
        descriptor: &WindowDescriptor,
        handle: &dyn WindowHandle,
    ) -> Result<(), RestoreError> {
        for action in reconcile_actions(descriptor) {
            apply_action(handle, action)
                .await
                .map_err(|reason| RestoreError::ReconcileFailure {
                    name: descriptor.name.clone(),
                    step: action.label(),
                    reason,
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{
        MemoryWindowPlatform, MemoryWindowRecord, WindowBounds, WindowCall, WindowState,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    const SAVED: WindowBounds = WindowBounds {
        left: 100,
        top: 120,
        width: 800,
        height: 600,
    };

    fn descriptor(is_showing: bool, state: WindowState, is_tabbed: bool) -> WindowDescriptor {
        WindowDescriptor {
            name: "blotter".to_string(),
            url: "/blotter".to_string(),
            bounds: SAVED,
            state,
            is_showing,
            is_tabbed,
        }
    }

    fn live_host() -> MemoryWindowPlatform {
        let host = MemoryWindowPlatform::default();
        let mut record = MemoryWindowRecord::new("/blotter", WindowBounds::default());
        record.grouped = true;
        record.state = WindowState::Maximized;
        host.insert_window("blotter", record);
        host
    }

    #[test]
    fn tabbed_window_is_positioned_and_shown_only() {
        let host = live_host();
        let outcome = block_on(WindowReconciler.reconcile(
            &descriptor(false, WindowState::Minimized, true),
            &host.handle("blotter"),
        ));

        assert_eq!(
            outcome,
            PipelineOutcome::Reconciled {
                name: "blotter".to_string()
            }
        );
        assert_eq!(
            host.calls_for("blotter"),
            vec![WindowCall::SetBounds(SAVED), WindowCall::Show]
        );
        assert!(host.window("blotter").expect("record").grouped);
    }

    #[test]
    fn showing_normal_window_leaves_group_then_restores_and_shows() {
        let host = live_host();
        block_on(WindowReconciler.reconcile(
            &descriptor(true, WindowState::Normal, false),
            &host.handle("blotter"),
        ));

        assert_eq!(
            host.calls_for("blotter"),
            vec![
                WindowCall::SetBounds(SAVED),
                WindowCall::LeaveGroup,
                WindowCall::Restore,
                WindowCall::Show,
            ]
        );
        let record = host.window("blotter").expect("record");
        assert_eq!(record.bounds, SAVED);
        assert_eq!(record.state, WindowState::Normal);
        assert!(record.visible);
        assert!(!record.grouped);
    }

    #[test]
    fn hidden_window_is_hidden_regardless_of_state() {
        let host = live_host();
        block_on(WindowReconciler.reconcile(
            &descriptor(false, WindowState::Maximized, false),
            &host.handle("blotter"),
        ));

        assert_eq!(
            host.calls_for("blotter"),
            vec![
                WindowCall::SetBounds(SAVED),
                WindowCall::LeaveGroup,
                WindowCall::Hide
            ]
        );
        assert!(!host.window("blotter").expect("record").visible);
    }

    #[test]
    fn failing_step_stops_pipeline_and_is_reported() {
        let host = live_host();
        host.fail_handle("blotter");

        let outcome = block_on(WindowReconciler.reconcile(
            &descriptor(true, WindowState::Minimized, false),
            &host.handle("blotter"),
        ));

        match outcome {
            PipelineOutcome::Failed(RestoreError::ReconcileFailure { name, step, .. }) => {
                assert_eq!(name, "blotter");
                assert_eq!(step, "set-bounds");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(host.calls_for("blotter"), vec![WindowCall::SetBounds(SAVED)]);
    }

    #[test]
    fn reconciling_twice_reaches_the_same_window_state() {
        let host = live_host();
        let handle = host.handle("blotter");
        let saved = descriptor(true, WindowState::Minimized, false);

        block_on(WindowReconciler.reconcile(&saved, &handle));
        let after_first = host.window("blotter").expect("record");
        let first_calls = host.calls_for("blotter");
        host.clear_journal();

        block_on(WindowReconciler.reconcile(&saved, &handle));
        assert_eq!(host.window("blotter").expect("record"), after_first);
        assert_eq!(host.calls_for("blotter"), first_calls);
    }
}
