//! Host-bundle and capability models produced once at startup.

use std::rc::Rc;

use crate::{
    ApplicationLauncher, InteropBus, NoopApplicationLauncher, NoopInteropBus,
    NoopNotificationService, NoopSpreadsheetInterop, NoopWindowPlatform, NoopWorkspaceService,
    NotificationService, SpreadsheetInterop, WindowPlatform, WorkspaceService,
};

/// Stable host strategy selected for the current runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Plain browser tab without a desktop container.
    Browser,
    /// Desktop container runtime with native windows, workspaces, and interop.
    DesktopContainer,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics and runtime inspection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::DesktopContainer => "desktop-container",
        }
    }

    /// Returns the coarse platform kind reported to the UI.
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::DesktopContainer => "desktop",
        }
    }
}

/// Host availability state for one optional capability domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// Capability is available.
    Available,
    /// Capability is not supported on the active host.
    Unavailable,
    /// Capability exists but stays disabled until explicit user activation.
    RequiresUserActivation,
}

impl CapabilityStatus {
    /// Returns whether the capability can be used immediately.
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Capability domains negotiated with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Native window lifecycle.
    Windows,
    /// Workspace snapshot restore.
    Workspaces,
    /// Inter-application messaging.
    Interop,
    /// Host notifications.
    Notifications,
    /// Spreadsheet publishing.
    Spreadsheet,
    /// Launching other applications by identity.
    AppLaunch,
}

impl Capability {
    /// Returns a stable capability label for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Workspaces => "workspaces",
            Self::Interop => "interop",
            Self::Notifications => "notifications",
            Self::Spreadsheet => "spreadsheet",
            Self::AppLaunch => "app-launch",
        }
    }
}

/// Typed error describing capability-level rejection before a host operation executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The host does not support the requested capability.
    Unavailable {
        /// Rejected capability.
        capability: Capability,
    },
    /// The capability requires an explicit user activation or permission grant first.
    RequiresUserActivation {
        /// Rejected capability.
        capability: Capability,
    },
}

impl CapabilityError {
    /// Returns the rejected capability.
    pub const fn capability(&self) -> Capability {
        match self {
            Self::Unavailable { capability } | Self::RequiresUserActivation { capability } => {
                *capability
            }
        }
    }
}

impl std::fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { capability } => {
                write!(f, "capability unavailable: {}", capability.as_str())
            }
            Self::RequiresUserActivation { capability } => {
                write!(
                    f,
                    "capability requires user activation: {}",
                    capability.as_str()
                )
            }
        }
    }
}

impl std::error::Error for CapabilityError {}

/// Host capability snapshot consumed by the runtime instead of re-probing the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Native window lifecycle.
    pub windows: CapabilityStatus,
    /// Workspace snapshot restore.
    pub workspaces: CapabilityStatus,
    /// Inter-application messaging.
    pub interop: CapabilityStatus,
    /// Host notifications.
    pub notifications: CapabilityStatus,
    /// Spreadsheet publishing.
    pub spreadsheet: CapabilityStatus,
    /// Launching applications by identity.
    pub app_launch: CapabilityStatus,
}

impl HostCapabilities {
    /// Browser capability posture.
    pub const fn browser() -> Self {
        Self {
            windows: CapabilityStatus::Unavailable,
            workspaces: CapabilityStatus::Unavailable,
            interop: CapabilityStatus::Unavailable,
            notifications: CapabilityStatus::RequiresUserActivation,
            spreadsheet: CapabilityStatus::Unavailable,
            app_launch: CapabilityStatus::Unavailable,
        }
    }

    /// Desktop container capability posture.
    pub const fn desktop_container() -> Self {
        Self {
            windows: CapabilityStatus::Available,
            workspaces: CapabilityStatus::Available,
            interop: CapabilityStatus::Available,
            notifications: CapabilityStatus::Available,
            spreadsheet: CapabilityStatus::Available,
            app_launch: CapabilityStatus::Available,
        }
    }

    /// Returns the negotiated status of `capability`.
    pub const fn status(&self, capability: Capability) -> CapabilityStatus {
        match capability {
            Capability::Windows => self.windows,
            Capability::Workspaces => self.workspaces,
            Capability::Interop => self.interop,
            Capability::Notifications => self.notifications,
            Capability::Spreadsheet => self.spreadsheet,
            Capability::AppLaunch => self.app_launch,
        }
    }

    /// Checks that `capability` is usable right now.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] describing why the capability cannot be used.
    pub const fn require(&self, capability: Capability) -> Result<(), CapabilityError> {
        match self.status(capability) {
            CapabilityStatus::Available => Ok(()),
            CapabilityStatus::Unavailable => Err(CapabilityError::Unavailable { capability }),
            CapabilityStatus::RequiresUserActivation => {
                Err(CapabilityError::RequiresUserActivation { capability })
            }
        }
    }
}

/// Runtime-selected host service bundle injected into the workspace runtime.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `workspace_runtime`, which never re-tests whether the desktop container is present.
#[derive(Clone)]
pub struct HostServices {
    /// Window lifecycle service.
    pub windows: Rc<dyn WindowPlatform>,
    /// Workspace snapshot service.
    pub workspaces: Rc<dyn WorkspaceService>,
    /// Inter-application bus.
    pub interop: Rc<dyn InteropBus>,
    /// Notification delivery service.
    pub notifications: Rc<dyn NotificationService>,
    /// Spreadsheet interop service.
    pub spreadsheet: Rc<dyn SpreadsheetInterop>,
    /// Application launcher.
    pub apps: Rc<dyn ApplicationLauncher>,
    /// Host availability snapshot for optional capability domains.
    pub capabilities: HostCapabilities,
    /// Stable strategy identifier for diagnostics and policy.
    pub host_strategy: HostStrategy,
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("capabilities", &self.capabilities)
            .field("host_strategy", &self.host_strategy)
            .field("spreadsheet", &self.spreadsheet.adapter_name())
            .finish_non_exhaustive()
    }
}

impl HostServices {
    /// Browser bundle: no-op adapters for every desktop-only domain.
    pub fn browser() -> Self {
        Self {
            windows: Rc::new(NoopWindowPlatform),
            workspaces: Rc::new(NoopWorkspaceService),
            interop: Rc::new(NoopInteropBus),
            notifications: Rc::new(NoopNotificationService),
            spreadsheet: Rc::new(NoopSpreadsheetInterop),
            apps: Rc::new(NoopApplicationLauncher),
            capabilities: HostCapabilities::browser(),
            host_strategy: HostStrategy::Browser,
        }
    }

    /// Desktop container bundle built from concrete host adapters.
    pub fn desktop_container(
        windows: Rc<dyn WindowPlatform>,
        workspaces: Rc<dyn WorkspaceService>,
        interop: Rc<dyn InteropBus>,
        notifications: Rc<dyn NotificationService>,
        spreadsheet: Rc<dyn SpreadsheetInterop>,
        apps: Rc<dyn ApplicationLauncher>,
    ) -> Self {
        Self {
            windows,
            workspaces,
            interop,
            notifications,
            spreadsheet,
            apps,
            capabilities: HostCapabilities::desktop_container(),
            host_strategy: HostStrategy::DesktopContainer,
        }
    }

    /// Performs the single startup capability negotiation.
    ///
    /// `probe` returns the desktop container bundle when the container runtime is present and
    /// `None` otherwise, in which case the browser bundle is selected.
    pub fn negotiate(probe: impl FnOnce() -> Option<HostServices>) -> Self {
        probe().unwrap_or_else(Self::browser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_posture_rejects_desktop_only_domains() {
        let caps = HostCapabilities::browser();
        assert_eq!(
            caps.require(Capability::Workspaces),
            Err(CapabilityError::Unavailable {
                capability: Capability::Workspaces
            })
        );
        assert_eq!(
            caps.require(Capability::Notifications),
            Err(CapabilityError::RequiresUserActivation {
                capability: Capability::Notifications
            })
        );
    }

    #[test]
    fn negotiate_falls_back_to_browser_bundle() {
        let services = HostServices::negotiate(|| None);
        assert_eq!(services.host_strategy, HostStrategy::Browser);
        assert!(!services.capabilities.windows.is_available());
    }

    #[test]
    fn capability_error_display_names_the_domain() {
        let err = CapabilityError::Unavailable {
            capability: Capability::AppLaunch,
        };
        assert_eq!(err.to_string(), "capability unavailable: app-launch");
        assert_eq!(err.capability(), Capability::AppLaunch);
    }
}
