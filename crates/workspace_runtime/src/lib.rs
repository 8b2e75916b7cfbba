//! Workspace restore engine and platform adapter surface for the trading desktop UI.
//!
//! When the host restores a persisted workspace, [`WorkspaceRestoreCoordinator`] diffs the
//! snapshot's child windows against the live window set, launching the missing ones through
//! [`WindowLauncher`] and correcting the rest through [`WindowReconciler`]. All per-window
//! pipelines run concurrently on the UI thread and the coordinator resolves once every one of
//! them has settled, successful or not.
//!
//! [`PlatformAdapter`] exposes the remaining platform operations (window chrome, app launch,
//! interop, notifications, spreadsheet) behind the negotiated [`platform_host::HostCapabilities`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapter;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod launcher;
pub mod layout;
pub mod model;
pub mod reconciler;
pub mod state_machine;
pub mod toggle;

pub use adapter::{AppOpen, PlatformAdapter};
pub use coordinator::{RestoreReport, WorkspaceRestoreCoordinator};
pub use error::{PlatformError, RestoreError, SnapshotParseError};
pub use host::{install_workspace_restore, restore_handler, spawn_workspace_restore_install};
pub use launcher::WindowLauncher;
pub use layout::{
    reduce_layout, ContainerPlacement, ContainerVisibility, LayoutAction, LayoutDispatcher,
    LayoutState, MemoryLayoutStore,
};
pub use model::{LiveWindowSet, WindowDescriptor, WorkspaceSnapshot, CHILD_WINDOWS_KEY};
pub use reconciler::{PipelineOutcome, WindowReconciler};
pub use state_machine::{reconcile_actions, state_actions, toggle_maximize_actions, WindowAction};
pub use toggle::WindowToggleController;
