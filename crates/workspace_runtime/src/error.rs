//! Error taxonomy for workspace restoration and the platform adapter surface.

use platform_host::CapabilityError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure of one per-window restore pipeline.
///
/// These never escape the coordinator; they are logged and reported per window.
pub enum RestoreError {
    /// Opening a window that had no live counterpart was rejected.
    #[error("launch of window `{name}` failed: {reason}")]
    LaunchFailure {
        /// Descriptor name.
        name: String,
        /// Host rejection detail.
        reason: String,
    },
    /// A platform call while correcting an existing window failed.
    #[error("reconcile of window `{name}` failed at {step}: {reason}")]
    ReconcileFailure {
        /// Descriptor name.
        name: String,
        /// Step that failed.
        step: &'static str,
        /// Host rejection detail.
        reason: String,
    },
}

impl RestoreError {
    /// Returns the name of the window whose pipeline failed.
    pub fn window_name(&self) -> &str {
        match self {
            Self::LaunchFailure { name, .. } | Self::ReconcileFailure { name, .. } => name,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejection of a persisted workspace at the boundary where it enters the runtime.
pub enum SnapshotParseError {
    /// The document is not an object carrying a `childWindows` array.
    #[error("workspace snapshot must be an object with a `childWindows` array")]
    MissingChildWindows,
    /// One child window entry does not match the descriptor shape.
    #[error("child window {index} is malformed: {reason}")]
    InvalidDescriptor {
        /// Position within `childWindows`.
        index: usize,
        /// Deserialization detail.
        reason: String,
    },
    /// Two descriptors share one name.
    #[error("child window name `{name}` appears more than once")]
    DuplicateName {
        /// Repeated name.
        name: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure of a platform adapter operation.
pub enum PlatformError {
    /// The negotiated host does not offer the capability.
    #[error(transparent)]
    Capability(#[from] CapabilityError),
    /// The host rejected the operation.
    #[error("{operation} failed: {reason}")]
    Host {
        /// Operation label.
        operation: &'static str,
        /// Host rejection detail.
        reason: String,
    },
}

impl PlatformError {
    pub(crate) fn host(operation: &'static str) -> impl FnOnce(String) -> Self {
        move |reason| Self::Host { operation, reason }
    }
}
