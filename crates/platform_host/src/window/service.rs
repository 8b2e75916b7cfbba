//! Window platform service contracts and no-op adapter.

use std::{future::Future, pin::Pin, rc::Rc};

use super::types::{
    PositionOverride, WindowBounds, WindowIdentity, WindowOpenConfig, WindowState,
};

/// Object-safe boxed future used by [`WindowPlatform`] and [`WindowHandle`].
pub type WindowFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Callback invoked once the host acknowledges that a newly opened window is showing.
pub type OnWindowOpen = Box<dyn FnOnce()>;

/// Callback invoked once when a window opened through [`WindowPlatform::open`] closes.
pub type OnWindowClose = Box<dyn FnOnce()>;

/// Live reference to one open window.
///
/// Handles are borrowed for the duration of one operation sequence and are not retained by the
/// runtime afterwards.
pub trait WindowHandle {
    /// Returns the unique window name this handle is bound to.
    fn name(&self) -> &str;

    /// Applies outer bounds to the window.
    fn set_bounds(&self, bounds: WindowBounds) -> WindowFuture<'_, Result<(), String>>;

    /// Makes the window visible.
    fn show(&self) -> WindowFuture<'_, Result<(), String>>;

    /// Hides the window without closing it.
    fn hide(&self) -> WindowFuture<'_, Result<(), String>>;

    /// Minimizes the window.
    fn minimize(&self) -> WindowFuture<'_, Result<(), String>>;

    /// Maximizes the window.
    fn maximize(&self) -> WindowFuture<'_, Result<(), String>>;

    /// Restores the window from a minimized or maximized state.
    fn restore(&self) -> WindowFuture<'_, Result<(), String>>;

    /// Removes the window from any window group it belongs to.
    fn leave_group(&self) -> WindowFuture<'_, Result<(), String>>;

    /// Raises the window above its siblings.
    fn bring_to_front(&self) -> WindowFuture<'_, Result<(), String>>;

    /// Closes the window.
    fn close(&self) -> WindowFuture<'_, Result<(), String>>;

    /// Queries the window's current lifecycle state.
    ///
    /// Adapters over hosts that report state as text parse it with
    /// [`WindowState::from_reported`].
    fn get_state(&self) -> WindowFuture<'_, Result<WindowState, String>>;
}

/// Host service for creating and addressing application windows.
pub trait WindowPlatform {
    /// Opens a new top-level window.
    ///
    /// `on_open` runs once the host reports the window open and `on_close`, when given, once it
    /// closes. The returned future resolves when the open request itself has been accepted or
    /// rejected.
    fn open<'a>(
        &'a self,
        config: WindowOpenConfig,
        position: Option<PositionOverride>,
        on_open: OnWindowOpen,
        on_close: Option<OnWindowClose>,
    ) -> WindowFuture<'a, Result<(), String>>;

    /// Binds a handle to an existing window by identity.
    fn wrap<'a>(
        &'a self,
        identity: &'a WindowIdentity,
    ) -> WindowFuture<'a, Result<Rc<dyn WindowHandle>, String>>;

    /// Returns a handle to the window hosting the caller.
    fn current(&self) -> Rc<dyn WindowHandle>;

    /// Lists the child windows currently open for this application.
    fn child_windows(&self) -> WindowFuture<'_, Result<Vec<WindowIdentity>, String>>;
}

#[derive(Debug, Clone, Default)]
/// No-op handle returned by [`NoopWindowPlatform`].
pub struct NoopWindowHandle {
    name: String,
}

impl NoopWindowHandle {
    /// Builds a no-op handle bound to `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

fn ready() -> WindowFuture<'static, Result<(), String>> {
    Box::pin(async { Ok(()) })
}

impl WindowHandle for NoopWindowHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_bounds(&self, _bounds: WindowBounds) -> WindowFuture<'_, Result<(), String>> {
        ready()
    }

    fn show(&self) -> WindowFuture<'_, Result<(), String>> {
        ready()
    }

    fn hide(&self) -> WindowFuture<'_, Result<(), String>> {
        ready()
    }

    fn minimize(&self) -> WindowFuture<'_, Result<(), String>> {
        ready()
    }

    fn maximize(&self) -> WindowFuture<'_, Result<(), String>> {
        ready()
    }

    fn restore(&self) -> WindowFuture<'_, Result<(), String>> {
        ready()
    }

    fn leave_group(&self) -> WindowFuture<'_, Result<(), String>> {
        ready()
    }

    fn bring_to_front(&self) -> WindowFuture<'_, Result<(), String>> {
        ready()
    }

    fn close(&self) -> WindowFuture<'_, Result<(), String>> {
        ready()
    }

    fn get_state(&self) -> WindowFuture<'_, Result<WindowState, String>> {
        Box::pin(async { Ok(WindowState::Normal) })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Window platform for hosts without native window management.
///
/// Opening windows is rejected; every other operation succeeds without effect.
pub struct NoopWindowPlatform;

impl WindowPlatform for NoopWindowPlatform {
    fn open<'a>(
        &'a self,
        config: WindowOpenConfig,
        _position: Option<PositionOverride>,
        _on_open: OnWindowOpen,
        _on_close: Option<OnWindowClose>,
    ) -> WindowFuture<'a, Result<(), String>> {
        Box::pin(async move {
            Err(format!(
                "window platform unavailable: cannot open `{}`",
                config.name
            ))
        })
    }

    fn wrap<'a>(
        &'a self,
        identity: &'a WindowIdentity,
    ) -> WindowFuture<'a, Result<Rc<dyn WindowHandle>, String>> {
        Box::pin(async move {
            let handle: Rc<dyn WindowHandle> = Rc::new(NoopWindowHandle::new(&identity.name));
            Ok(handle)
        })
    }

    fn current(&self) -> Rc<dyn WindowHandle> {
        Rc::new(NoopWindowHandle::new("main"))
    }

    fn child_windows(&self) -> WindowFuture<'_, Result<Vec<WindowIdentity>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}
