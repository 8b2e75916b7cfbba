//! Application launch contracts used for launch-by-identity.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Object-safe boxed future used by [`ApplicationLauncher`].
pub type AppLaunchFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Launch request for a separately packaged application.
pub struct AppLaunchConfig {
    /// Application identity; also its window name.
    pub uuid: String,
    /// Main window content URL.
    pub url: String,
    /// Optional taskbar icon URL.
    pub icon: Option<String>,
    /// Topic used to hand `payload` to an already running instance.
    pub topic: String,
    /// Optional payload delivered to a running instance instead of relaunching it.
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One application known to the host.
pub struct RunningApplication {
    /// Application identity.
    pub uuid: String,
    /// Whether the application currently runs.
    pub is_running: bool,
}

/// Host service for enumerating and launching applications.
pub trait ApplicationLauncher {
    /// Lists applications known to the host.
    fn applications(&self) -> AppLaunchFuture<'_, Result<Vec<RunningApplication>, String>>;

    /// Creates and runs the application described by `config`.
    fn launch<'a>(
        &'a self,
        config: &'a AppLaunchConfig,
    ) -> AppLaunchFuture<'a, Result<(), String>>;

    /// Closes the application hosting the caller, along with all of its windows.
    fn exit_current(&self) -> AppLaunchFuture<'_, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Launcher for hosts that cannot start other applications.
pub struct NoopApplicationLauncher;

impl ApplicationLauncher for NoopApplicationLauncher {
    fn applications(&self) -> AppLaunchFuture<'_, Result<Vec<RunningApplication>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn launch<'a>(
        &'a self,
        config: &'a AppLaunchConfig,
    ) -> AppLaunchFuture<'a, Result<(), String>> {
        Box::pin(async move { Err(format!("cannot launch `{}` on this host", config.uuid)) })
    }

    fn exit_current(&self) -> AppLaunchFuture<'_, Result<(), String>> {
        Box::pin(async { Err("cannot exit the application on this host".to_string()) })
    }
}

#[derive(Debug, Default)]
struct MemoryLauncherInner {
    applications: Vec<RunningApplication>,
    launched: Vec<AppLaunchConfig>,
    exits: usize,
}

#[derive(Debug, Clone, Default)]
/// In-memory launcher; launched applications become running.
pub struct MemoryApplicationLauncher {
    inner: Rc<RefCell<MemoryLauncherInner>>,
}

impl MemoryApplicationLauncher {
    /// Marks `uuid` as a running application.
    pub fn insert_running(&self, uuid: impl Into<String>) {
        self.inner.borrow_mut().applications.push(RunningApplication {
            uuid: uuid.into(),
            is_running: true,
        });
    }

    /// Returns every launch request in order.
    pub fn launched(&self) -> Vec<AppLaunchConfig> {
        self.inner.borrow().launched.clone()
    }

    /// Returns how many times the hosting application was asked to exit.
    pub fn exit_requests(&self) -> usize {
        self.inner.borrow().exits
    }
}

impl ApplicationLauncher for MemoryApplicationLauncher {
    fn applications(&self) -> AppLaunchFuture<'_, Result<Vec<RunningApplication>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().applications.clone()) })
    }

    fn launch<'a>(
        &'a self,
        config: &'a AppLaunchConfig,
    ) -> AppLaunchFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.launched.push(config.clone());
            inner.applications.push(RunningApplication {
                uuid: config.uuid.clone(),
                is_running: true,
            });
            Ok(())
        })
    }

    fn exit_current(&self) -> AppLaunchFuture<'_, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().exits += 1;
            Ok(())
        })
    }
}
