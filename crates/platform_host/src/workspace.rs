//! Host workspace (layout snapshot) service contracts.
//!
//! The host owns persistence of application workspaces. The runtime only registers a restore
//! handler that receives the raw persisted workspace and returns it as an acknowledgment once the
//! live window set has been reconciled.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use futures::future::LocalBoxFuture;
use serde_json::Value;

/// Object-safe boxed future used by [`WorkspaceService`].
pub type WorkspaceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Restore callback registered with the host.
pub type RestoreHandler = Rc<dyn Fn(Value) -> LocalBoxFuture<'static, Value>>;

/// Host service for workspace snapshot restoration.
pub trait WorkspaceService {
    /// Registers the handler invoked when the host restores an application workspace.
    fn set_restore_handler(
        &self,
        handler: RestoreHandler,
    ) -> WorkspaceFuture<'_, Result<(), String>>;

    /// Signals that the application is ready to receive restore requests.
    fn ready(&self) -> WorkspaceFuture<'_, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op workspace service for hosts without workspace persistence.
pub struct NoopWorkspaceService;

impl WorkspaceService for NoopWorkspaceService {
    fn set_restore_handler(
        &self,
        _handler: RestoreHandler,
    ) -> WorkspaceFuture<'_, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn ready(&self) -> WorkspaceFuture<'_, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Default)]
struct MemoryWorkspaceInner {
    handler: Option<RestoreHandler>,
    ready: bool,
}

#[derive(Clone, Default)]
/// In-memory workspace service that lets callers trigger restores directly.
pub struct MemoryWorkspaceService {
    inner: Rc<RefCell<MemoryWorkspaceInner>>,
}

impl std::fmt::Debug for MemoryWorkspaceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryWorkspaceService")
            .field("has_handler", &inner.handler.is_some())
            .field("ready", &inner.ready)
            .finish()
    }
}

impl MemoryWorkspaceService {
    /// Returns whether a restore handler has been registered.
    pub fn has_handler(&self) -> bool {
        self.inner.borrow().handler.is_some()
    }

    /// Returns whether [`WorkspaceService::ready`] has been signaled.
    pub fn is_ready(&self) -> bool {
        self.inner.borrow().ready
    }

    /// Simulates the host restoring `workspace` through the registered handler.
    ///
    /// # Errors
    ///
    /// Returns an error when no handler is registered or the service has not been marked ready.
    pub async fn trigger_restore(&self, workspace: Value) -> Result<Value, String> {
        let handler = {
            let inner = self.inner.borrow();
            if !inner.ready {
                return Err("workspace service not ready".to_string());
            }
            inner
                .handler
                .clone()
                .ok_or_else(|| "no restore handler registered".to_string())?
        };
        Ok(handler(workspace).await)
    }
}

impl WorkspaceService for MemoryWorkspaceService {
    fn set_restore_handler(
        &self,
        handler: RestoreHandler,
    ) -> WorkspaceFuture<'_, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().handler = Some(handler);
            Ok(())
        })
    }

    fn ready(&self) -> WorkspaceFuture<'_, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().ready = true;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::{executor::block_on, FutureExt};
    use serde_json::json;

    use super::*;

    #[test]
    fn trigger_restore_requires_ready_signal() {
        let service = MemoryWorkspaceService::default();
        let handler: RestoreHandler = Rc::new(|value: Value| async move { value }.boxed_local());
        block_on(service.set_restore_handler(handler)).expect("register");

        assert!(block_on(service.trigger_restore(json!({}))).is_err());

        block_on(service.ready()).expect("ready");
        let echoed = block_on(service.trigger_restore(json!({"childWindows": []})))
            .expect("restore");
        assert_eq!(echoed, json!({"childWindows": []}));
    }
}
