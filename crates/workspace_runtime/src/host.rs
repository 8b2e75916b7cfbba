//! Startup wiring between the host workspace service and the restore coordinator.

use std::rc::Rc;

use futures::FutureExt;
use leptos::{logging, spawn_local};
use platform_host::{Capability, HostServices, RestoreHandler, WindowPlatform};
use serde_json::Value;

use crate::{
    coordinator::WorkspaceRestoreCoordinator, error::PlatformError, layout::LayoutDispatcher,
};

/// Builds the restore handler the host invokes with a persisted workspace.
///
/// The handler always resolves with the workspace it was given.
pub fn restore_handler(
    windows: Rc<dyn WindowPlatform>,
    layout: Rc<dyn LayoutDispatcher>,
) -> RestoreHandler {
    let coordinator = WorkspaceRestoreCoordinator::new(windows, layout);
    Rc::new(move |workspace: Value| {
        let coordinator = coordinator.clone();
        async move { coordinator.restore_raw(workspace).await }.boxed_local()
    })
}

/// Registers the restore handler with the host and signals readiness.
///
/// Returns `Ok(false)` without touching the host when workspaces are not available, as in a
/// plain browser tab.
///
/// # Errors
///
/// Returns [`PlatformError::Host`] when the host rejects registration or the ready signal.
pub async fn install_workspace_restore(
    services: &HostServices,
    layout: Rc<dyn LayoutDispatcher>,
) -> Result<bool, PlatformError> {
    if let Err(err) = services.capabilities.require(Capability::Workspaces) {
        logging::log!(
            "workspace restore not installed on {} host: {err}",
            services.host_strategy.as_str()
        );
        return Ok(false);
    }

    services
        .workspaces
        .set_restore_handler(restore_handler(services.windows.clone(), layout))
        .await
        .map_err(PlatformError::host("set-restore-handler"))?;
    services
        .workspaces
        .ready()
        .await
        .map_err(PlatformError::host("workspace-ready"))?;
    Ok(true)
}

/// Installs workspace restore in the background, logging any failure.
pub fn spawn_workspace_restore_install(
    services: HostServices,
    layout: Rc<dyn LayoutDispatcher>,
) {
    spawn_local(async move {
        if let Err(err) = install_workspace_restore(&services, layout).await {
            logging::warn!("install workspace restore failed: {err}");
        }
    });
}
