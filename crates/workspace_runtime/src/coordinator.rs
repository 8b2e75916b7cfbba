//! Top-level workspace restore: diff a snapshot against live windows and fan out per window.

use std::rc::Rc;

use futures::{future::join_all, FutureExt};
use leptos::logging;
use platform_host::WindowPlatform;
use serde_json::Value;

use crate::{
    error::RestoreError,
    launcher::WindowLauncher,
    layout::LayoutDispatcher,
    model::{LiveWindowSet, WindowDescriptor, WorkspaceSnapshot},
    reconciler::{PipelineOutcome, WindowReconciler},
};

#[derive(Debug, Clone, PartialEq)]
/// Snapshot acknowledgment plus the settled outcome of every per-window pipeline.
pub struct RestoreReport {
    /// The snapshot that was restored, unchanged.
    pub snapshot: WorkspaceSnapshot,
    /// One outcome per descriptor, in snapshot order.
    pub outcomes: Vec<PipelineOutcome>,
}

impl RestoreReport {
    /// Returns the failures among the outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &RestoreError> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            PipelineOutcome::Failed(err) => Some(err),
            _ => None,
        })
    }
}

#[derive(Clone)]
/// Brings the live window set of an application in line with a persisted snapshot.
pub struct WorkspaceRestoreCoordinator {
    windows: Rc<dyn WindowPlatform>,
    launcher: WindowLauncher,
    reconciler: WindowReconciler,
}

impl WorkspaceRestoreCoordinator {
    /// Creates a coordinator over the host window platform and layout store.
    pub fn new(windows: Rc<dyn WindowPlatform>, layout: Rc<dyn LayoutDispatcher>) -> Self {
        Self {
            launcher: WindowLauncher::new(windows.clone(), layout),
            windows,
            reconciler: WindowReconciler,
        }
    }

    /// Restores `snapshot` against `live` and resolves with the snapshot unchanged.
    ///
    /// Never fails as a whole; per-window failures are logged.
    pub async fn restore(
        &self,
        snapshot: WorkspaceSnapshot,
        live: &LiveWindowSet,
    ) -> WorkspaceSnapshot {
        self.restore_with_report(snapshot, live).await.snapshot
    }

    /// Restores `snapshot` against `live`, reporting every pipeline's outcome.
    ///
    /// Every descriptor missing from `live` is launched exactly once and every present one is
    /// reconciled exactly once. All pipelines start together and this resolves after the last
    /// one settles.
    pub async fn restore_with_report(
        &self,
        snapshot: WorkspaceSnapshot,
        live: &LiveWindowSet,
    ) -> RestoreReport {
        logging::log!(
            "workspace restore started: {} windows in snapshot, {} live",
            snapshot.child_windows().len(),
            live.len()
        );
        let outcomes = {
            let pipelines = snapshot
                .child_windows()
                .iter()
                .map(|descriptor| {
                    if live.contains(&descriptor.name) {
                        self.reconcile_existing(descriptor).boxed_local()
                    } else {
                        self.launcher.launch(descriptor).boxed_local()
                    }
                })
                .collect::<Vec<_>>();
            join_all(pipelines).await
        };

        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        let launched = outcomes
            .iter()
            .filter(|o| matches!(o, PipelineOutcome::Launched { .. }))
            .count();
        logging::log!(
            "workspace restore settled: {launched} launched, {} reconciled, {failed} failed",
            outcomes.len() - launched - failed
        );

        RestoreReport { snapshot, outcomes }
    }

    /// Entry point for the host restore handler: parses `raw`, reads the live window set, runs
    /// the restore, and hands `raw` back unchanged whatever happened.
    pub async fn restore_raw(&self, raw: Value) -> Value {
        let snapshot = match WorkspaceSnapshot::from_value(raw.clone()) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                logging::warn!("workspace restore skipped: {err}");
                return raw;
            }
        };
        let live = match self.windows.child_windows().await {
            Ok(identities) => identities.into_iter().collect::<LiveWindowSet>(),
            Err(err) => {
                logging::warn!("workspace restore skipped: listing child windows failed: {err}");
                return raw;
            }
        };
        self.restore(snapshot, &live).await.into_raw()
    }

    async fn reconcile_existing(&self, descriptor: &WindowDescriptor) -> PipelineOutcome {
        let identity = descriptor.identity();
        match self.windows.wrap(&identity).await {
            Ok(handle) => self.reconciler.reconcile(descriptor, handle.as_ref()).await,
            Err(reason) => {
                let err = RestoreError::ReconcileFailure {
                    name: descriptor.name.clone(),
                    step: "wrap",
                    reason,
                };
                logging::warn!("workspace restore: {err}");
                PipelineOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        future::Future,
        pin::Pin,
        task::{Context, Poll},
    };

    use futures::executor::block_on;
    use platform_host::{
        MemoryWindowPlatform, MemoryWindowRecord, OnWindowClose, OnWindowOpen, PositionOverride,
        WindowBounds, WindowCall, WindowFuture, WindowHandle, WindowIdentity, WindowOpenConfig,
        WindowState,
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout::{LayoutAction, MemoryLayoutStore};

    fn descriptor(name: &str, is_tabbed: bool) -> WindowDescriptor {
        WindowDescriptor {
            name: name.to_string(),
            url: format!("/{name}"),
            bounds: WindowBounds {
                left: 1,
                top: 2,
                width: 300,
                height: 200,
            },
            state: WindowState::Normal,
            is_showing: true,
            is_tabbed,
        }
    }

    fn coordinator(
        host: &MemoryWindowPlatform,
        layout: &MemoryLayoutStore,
    ) -> WorkspaceRestoreCoordinator {
        WorkspaceRestoreCoordinator::new(Rc::new(host.clone()), Rc::new(layout.clone()))
    }

    /// Yields to the executor once before completing.
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    /// Wraps the memory host so every platform call suspends once, exposing interleaving.
    struct SuspendingPlatform {
        inner: MemoryWindowPlatform,
    }

    struct SuspendingHandle {
        inner: Rc<dyn WindowHandle>,
    }

    macro_rules! suspend {
        ($call:expr) => {
            Box::pin(async move {
                YieldOnce(false).await;
                $call.await
            })
        };
    }

    impl WindowHandle for SuspendingHandle {
        fn name(&self) -> &str {
            self.inner.name()
        }
        fn set_bounds(&self, bounds: WindowBounds) -> WindowFuture<'_, Result<(), String>> {
            suspend!(self.inner.set_bounds(bounds))
        }
        fn show(&self) -> WindowFuture<'_, Result<(), String>> {
            suspend!(self.inner.show())
        }
        fn hide(&self) -> WindowFuture<'_, Result<(), String>> {
            suspend!(self.inner.hide())
        }
        fn minimize(&self) -> WindowFuture<'_, Result<(), String>> {
            suspend!(self.inner.minimize())
        }
        fn maximize(&self) -> WindowFuture<'_, Result<(), String>> {
            suspend!(self.inner.maximize())
        }
        fn restore(&self) -> WindowFuture<'_, Result<(), String>> {
            suspend!(self.inner.restore())
        }
        fn leave_group(&self) -> WindowFuture<'_, Result<(), String>> {
            suspend!(self.inner.leave_group())
        }
        fn bring_to_front(&self) -> WindowFuture<'_, Result<(), String>> {
            suspend!(self.inner.bring_to_front())
        }
        fn close(&self) -> WindowFuture<'_, Result<(), String>> {
            suspend!(self.inner.close())
        }
        fn get_state(&self) -> WindowFuture<'_, Result<WindowState, String>> {
            suspend!(self.inner.get_state())
        }
    }

    impl WindowPlatform for SuspendingPlatform {
        fn open<'a>(
            &'a self,
            config: WindowOpenConfig,
            position: Option<PositionOverride>,
            on_open: OnWindowOpen,
            on_close: Option<OnWindowClose>,
        ) -> WindowFuture<'a, Result<(), String>> {
            suspend!(self.inner.open(config, position, on_open, on_close))
        }

        fn wrap<'a>(
            &'a self,
            identity: &'a WindowIdentity,
        ) -> WindowFuture<'a, Result<Rc<dyn WindowHandle>, String>> {
            Box::pin(async move {
                let inner = self.inner.wrap(identity).await?;
                let handle: Rc<dyn WindowHandle> = Rc::new(SuspendingHandle { inner });
                Ok(handle)
            })
        }

        fn current(&self) -> Rc<dyn WindowHandle> {
            self.inner.current()
        }

        fn child_windows(&self) -> WindowFuture<'_, Result<Vec<WindowIdentity>, String>> {
            self.inner.child_windows()
        }
    }

    #[test]
    fn missing_windows_launch_and_present_windows_reconcile() {
        let host = MemoryWindowPlatform::default();
        host.insert_window("A", MemoryWindowRecord::new("/A", WindowBounds::default()));
        let layout = MemoryLayoutStore::default();
        let snapshot = WorkspaceSnapshot::new(vec![descriptor("A", true), descriptor("B", false)]);
        let live: LiveWindowSet = ["A"].into_iter().collect();

        let report =
            block_on(coordinator(&host, &layout).restore_with_report(snapshot.clone(), &live));

        assert_eq!(report.snapshot, snapshot);
        assert_eq!(
            report.outcomes,
            vec![
                PipelineOutcome::Reconciled {
                    name: "A".to_string()
                },
                PipelineOutcome::Launched {
                    name: "B".to_string()
                },
            ]
        );
        assert_eq!(
            host.calls_for("A"),
            vec![
                WindowCall::SetBounds(descriptor("A", true).bounds),
                WindowCall::Show
            ]
        );
        let opens = host
            .journal()
            .into_iter()
            .filter(|(_, call)| matches!(call, WindowCall::Open { .. }))
            .count();
        assert_eq!(opens, 1);
        assert_eq!(
            layout.dispatched(),
            vec![
                LayoutAction::show_standalone("B"),
                LayoutAction::hide_embedded("B"),
            ]
        );
    }

    #[test]
    fn pipelines_interleave_and_restore_waits_for_all() {
        let memory = MemoryWindowPlatform::default();
        memory.insert_window("A", MemoryWindowRecord::new("/A", WindowBounds::default()));
        let host = SuspendingPlatform {
            inner: memory.clone(),
        };
        let layout = MemoryLayoutStore::default();
        let coordinator = WorkspaceRestoreCoordinator::new(Rc::new(host), Rc::new(layout.clone()));
        let live: LiveWindowSet = ["A"].into_iter().collect();
        let snapshot = WorkspaceSnapshot::new(vec![descriptor("A", true), descriptor("B", false)]);

        let settled = Cell::new(false);
        block_on(async {
            coordinator.restore(snapshot, &live).await;
            settled.set(true);
        });

        let order: Vec<(String, &'static str)> = memory
            .journal()
            .into_iter()
            .map(|(name, call)| (name, call.label()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("A".to_string(), "set-bounds"),
                ("B".to_string(), "open"),
                ("A".to_string(), "show"),
            ]
        );
        assert!(settled.get());
        assert_eq!(layout.dispatched().len(), 2);
    }

    #[test]
    fn restore_resolves_with_snapshot_when_every_pipeline_fails() {
        let host = MemoryWindowPlatform::default();
        for name in ["A", "B"] {
            host.insert_window(name, MemoryWindowRecord::new("", WindowBounds::default()));
            host.fail_handle(name);
        }
        host.reject_open("C");
        let layout = MemoryLayoutStore::default();
        let snapshot = WorkspaceSnapshot::new(vec![
            descriptor("A", false),
            descriptor("B", true),
            descriptor("C", false),
        ]);
        let live: LiveWindowSet = ["A", "B"].into_iter().collect();

        let report =
            block_on(coordinator(&host, &layout).restore_with_report(snapshot.clone(), &live));

        assert_eq!(report.snapshot, snapshot);
        assert_eq!(report.failures().count(), 3);
        let failed: Vec<&str> = report.failures().map(RestoreError::window_name).collect();
        assert_eq!(failed, vec!["A", "B", "C"]);
        assert!(layout.dispatched().is_empty());
    }

    #[test]
    fn restore_raw_hands_back_unparseable_documents_untouched() {
        let host = MemoryWindowPlatform::default();
        let layout = MemoryLayoutStore::default();
        let raw = serde_json::json!({"childWindows": [{"name": "A"}]});

        let echoed = block_on(coordinator(&host, &layout).restore_raw(raw.clone()));

        assert_eq!(echoed, raw);
        assert!(host.journal().is_empty());
    }

    #[test]
    fn restore_raw_reads_live_children_from_host() {
        let host = MemoryWindowPlatform::default();
        host.insert_window("A", MemoryWindowRecord::new("/A", WindowBounds::default()));
        let layout = MemoryLayoutStore::default();
        let raw = WorkspaceSnapshot::new(vec![descriptor("A", false), descriptor("B", false)])
            .into_raw();

        let echoed = block_on(coordinator(&host, &layout).restore_raw(raw.clone()));

        assert_eq!(echoed, raw);
        assert_eq!(
            host.calls_for("A").first(),
            Some(&WindowCall::SetBounds(descriptor("A", false).bounds))
        );
        assert!(matches!(
            host.calls_for("B").as_slice(),
            [WindowCall::Open { .. }]
        ));
    }
}
