//! Typed host-domain contracts and shared models for the trading desktop platform layer.
//!
//! This crate is the API-first boundary for host services: window lifecycle, workspace restore,
//! inter-application messaging, notifications, spreadsheet interop, and application launch.
//! Every service is an object-safe trait with a no-op adapter for hosts that lack the capability
//! and an in-memory adapter for headless composition and tests. Concrete container adapters live
//! outside this crate and are selected once through [`HostServices::negotiate`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod apps;
pub mod config;
pub mod host;
pub mod interop;
pub mod notifications;
pub mod spreadsheet;
pub mod window;
pub mod workspace;

pub use apps::{
    AppLaunchConfig, AppLaunchFuture, ApplicationLauncher, MemoryApplicationLauncher,
    NoopApplicationLauncher, RunningApplication,
};
pub use config::{
    load_platform_config_with, ConfigFuture, ConfigSource, MemoryConfigSource, NoopConfigSource,
    PlatformConfig, PLATFORM_CONFIG_KEY,
};
pub use host::{
    Capability, CapabilityError, CapabilityStatus, HostCapabilities, HostServices, HostStrategy,
};
pub use interop::{InteropBus, InteropFuture, InteropTopic, MemoryInteropBus, NoopInteropBus};
pub use notifications::{
    InboxPush, MemoryNotificationService, NoopNotificationService, NotificationFuture,
    NotificationHandler, NotificationInbox, NotificationRequest, NotificationService,
};
pub use spreadsheet::{
    CurrencyPairPosition, MemorySpreadsheetInterop, NoopSpreadsheetInterop, SpreadsheetFuture,
    SpreadsheetInterop,
};
pub use window::memory::{MemoryWindowHandle, MemoryWindowPlatform, MemoryWindowRecord};
pub use window::service::{
    NoopWindowHandle, NoopWindowPlatform, OnWindowClose, OnWindowOpen, WindowFuture,
    WindowHandle, WindowPlatform,
};
pub use window::types::{
    PositionOverride, WindowBounds, WindowCall, WindowIdentity, WindowOpenConfig, WindowState,
};
pub use workspace::{
    MemoryWorkspaceService, NoopWorkspaceService, RestoreHandler, WorkspaceFuture,
    WorkspaceService,
};
