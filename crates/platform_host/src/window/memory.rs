//! In-memory window platform used by tests and headless runtime composition.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

use super::{
    service::{OnWindowClose, OnWindowOpen, WindowFuture, WindowHandle, WindowPlatform},
    types::{
        PositionOverride, WindowBounds, WindowCall, WindowIdentity, WindowOpenConfig, WindowState,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Observable state of one window held by [`MemoryWindowPlatform`].
pub struct MemoryWindowRecord {
    /// Content URL.
    pub url: String,
    /// Current outer bounds.
    pub bounds: WindowBounds,
    /// Current lifecycle state.
    pub state: WindowState,
    /// Whether the window is visible.
    pub visible: bool,
    /// Whether the window belongs to a window group.
    pub grouped: bool,
}

impl MemoryWindowRecord {
    /// Builds a visible, ungrouped, normal-state record.
    pub fn new(url: impl Into<String>, bounds: WindowBounds) -> Self {
        Self {
            url: url.into(),
            bounds,
            state: WindowState::Normal,
            visible: true,
            grouped: false,
        }
    }
}

#[derive(Default)]
struct MemoryWindowInner {
    current: String,
    windows: BTreeMap<String, MemoryWindowRecord>,
    journal: Vec<(String, WindowCall)>,
    rejected_opens: BTreeSet<String>,
    failing_handles: BTreeSet<String>,
    frontmost: Option<String>,
    close_callbacks: BTreeMap<String, OnWindowClose>,
}

impl std::fmt::Debug for MemoryWindowInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryWindowInner")
            .field("current", &self.current)
            .field("windows", &self.windows)
            .field("journal", &self.journal)
            .field("rejected_opens", &self.rejected_opens)
            .field("failing_handles", &self.failing_handles)
            .field("frontmost", &self.frontmost)
            .field("close_callbacks", &self.close_callbacks.keys())
            .finish()
    }
}

#[derive(Debug, Clone)]
/// In-memory window host with an ordered call journal and per-window failure injection.
///
/// Every issued operation is journaled before it is applied, so a failing call still shows up as
/// the last attempted step for that window.
pub struct MemoryWindowPlatform {
    inner: Rc<RefCell<MemoryWindowInner>>,
}

impl Default for MemoryWindowPlatform {
    fn default() -> Self {
        Self::new("main")
    }
}

impl MemoryWindowPlatform {
    /// Creates a host whose current (hosting) window is named `current`.
    pub fn new(current: impl Into<String>) -> Self {
        let current = current.into();
        let mut windows = BTreeMap::new();
        windows.insert(
            current.clone(),
            MemoryWindowRecord::new("", WindowBounds::default()),
        );
        Self {
            inner: Rc::new(RefCell::new(MemoryWindowInner {
                current,
                windows,
                ..MemoryWindowInner::default()
            })),
        }
    }

    /// Registers an already-open child window.
    pub fn insert_window(&self, name: impl Into<String>, record: MemoryWindowRecord) {
        self.inner.borrow_mut().windows.insert(name.into(), record);
    }

    /// Makes the next open request for `name` reject.
    pub fn reject_open(&self, name: impl Into<String>) {
        self.inner.borrow_mut().rejected_opens.insert(name.into());
    }

    /// Makes every operation issued through a handle for `name` fail.
    pub fn fail_handle(&self, name: impl Into<String>) {
        self.inner.borrow_mut().failing_handles.insert(name.into());
    }

    /// Sets the state of `name` from a raw host state string, as a container reports it.
    ///
    /// Returns `false` when no such window is open.
    pub fn report_state(&self, name: &str, raw: &str) -> bool {
        match self.inner.borrow_mut().windows.get_mut(name) {
            Some(record) => {
                record.state = WindowState::from_reported(raw);
                true
            }
            None => false,
        }
    }

    /// Returns the current record for `name`.
    pub fn window(&self, name: &str) -> Option<MemoryWindowRecord> {
        self.inner.borrow().windows.get(name).cloned()
    }

    /// Returns the name of the window most recently brought to front.
    pub fn frontmost(&self) -> Option<String> {
        self.inner.borrow().frontmost.clone()
    }

    /// Returns every journaled call in issue order.
    pub fn journal(&self) -> Vec<(String, WindowCall)> {
        self.inner.borrow().journal.clone()
    }

    /// Returns the journaled calls issued for one window, in order.
    pub fn calls_for(&self, name: &str) -> Vec<WindowCall> {
        self.inner
            .borrow()
            .journal
            .iter()
            .filter(|(window, _)| window == name)
            .map(|(_, call)| call.clone())
            .collect()
    }

    /// Clears the call journal while keeping window state.
    pub fn clear_journal(&self) {
        self.inner.borrow_mut().journal.clear();
    }

    /// Returns a handle bound to `name` without going through [`WindowPlatform::wrap`].
    pub fn handle(&self, name: impl Into<String>) -> MemoryWindowHandle {
        MemoryWindowHandle {
            name: name.into(),
            inner: self.inner.clone(),
        }
    }
}

impl WindowPlatform for MemoryWindowPlatform {
    fn open<'a>(
        &'a self,
        config: WindowOpenConfig,
        position: Option<PositionOverride>,
        on_open: OnWindowOpen,
        on_close: Option<OnWindowClose>,
    ) -> WindowFuture<'a, Result<(), String>> {
        Box::pin(async move {
            {
                let mut inner = self.inner.borrow_mut();
                inner.journal.push((
                    config.name.clone(),
                    WindowCall::Open {
                        config: config.clone(),
                        position,
                    },
                ));
                if inner.rejected_opens.remove(&config.name) {
                    return Err(format!("host refused to open window `{}`", config.name));
                }
                let (left, top) = position
                    .map(|p| (p.default_left, p.default_top))
                    .unwrap_or((0, 0));
                let bounds = WindowBounds {
                    left,
                    top,
                    width: config.width,
                    height: config.height,
                };
                inner.windows.insert(
                    config.name.clone(),
                    MemoryWindowRecord::new(config.url.clone(), bounds),
                );
                match on_close {
                    Some(on_close) => {
                        inner.close_callbacks.insert(config.name.clone(), on_close);
                    }
                    None => {
                        inner.close_callbacks.remove(&config.name);
                    }
                }
            }
            on_open();
            Ok(())
        })
    }

    fn wrap<'a>(
        &'a self,
        identity: &'a WindowIdentity,
    ) -> WindowFuture<'a, Result<Rc<dyn WindowHandle>, String>> {
        Box::pin(async move {
            let handle: Rc<dyn WindowHandle> = Rc::new(self.handle(identity.name.clone()));
            Ok(handle)
        })
    }

    fn current(&self) -> Rc<dyn WindowHandle> {
        let current = self.inner.borrow().current.clone();
        Rc::new(self.handle(current))
    }

    fn child_windows(&self) -> WindowFuture<'_, Result<Vec<WindowIdentity>, String>> {
        Box::pin(async move {
            let inner = self.inner.borrow();
            Ok(inner
                .windows
                .keys()
                .filter(|name| **name != inner.current)
                .map(WindowIdentity::new)
                .collect())
        })
    }
}

#[derive(Debug, Clone)]
/// Handle issued by [`MemoryWindowPlatform`].
pub struct MemoryWindowHandle {
    name: String,
    inner: Rc<RefCell<MemoryWindowInner>>,
}

impl MemoryWindowHandle {
    fn apply(&self, call: WindowCall) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        inner.journal.push((self.name.clone(), call.clone()));
        if inner.failing_handles.contains(&self.name) {
            return Err(format!("window `{}` rejected {}", self.name, call.label()));
        }
        if matches!(call, WindowCall::BringToFront) {
            inner.frontmost = Some(self.name.clone());
        }
        let closed = matches!(call, WindowCall::Close);
        let Some(record) = inner.windows.get_mut(&self.name) else {
            return Err(format!("window `{}` is not open", self.name));
        };
        match call {
            WindowCall::SetBounds(bounds) => record.bounds = bounds,
            WindowCall::Show => record.visible = true,
            WindowCall::Hide => record.visible = false,
            WindowCall::Minimize => record.state = WindowState::Minimized,
            WindowCall::Maximize => record.state = WindowState::Maximized,
            WindowCall::Restore => record.state = WindowState::Normal,
            WindowCall::LeaveGroup => record.grouped = false,
            WindowCall::Open { .. } | WindowCall::Close | WindowCall::BringToFront => {}
        }
        if closed {
            inner.windows.remove(&self.name);
            let on_close = inner.close_callbacks.remove(&self.name);
            drop(inner);
            if let Some(on_close) = on_close {
                on_close();
            }
        }
        Ok(())
    }

    fn run(&self, call: WindowCall) -> WindowFuture<'_, Result<(), String>> {
        Box::pin(async move { self.apply(call) })
    }
}

impl WindowHandle for MemoryWindowHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_bounds(&self, bounds: WindowBounds) -> WindowFuture<'_, Result<(), String>> {
        self.run(WindowCall::SetBounds(bounds))
    }

    fn show(&self) -> WindowFuture<'_, Result<(), String>> {
        self.run(WindowCall::Show)
    }

    fn hide(&self) -> WindowFuture<'_, Result<(), String>> {
        self.run(WindowCall::Hide)
    }

    fn minimize(&self) -> WindowFuture<'_, Result<(), String>> {
        self.run(WindowCall::Minimize)
    }

    fn maximize(&self) -> WindowFuture<'_, Result<(), String>> {
        self.run(WindowCall::Maximize)
    }

    fn restore(&self) -> WindowFuture<'_, Result<(), String>> {
        self.run(WindowCall::Restore)
    }

    fn leave_group(&self) -> WindowFuture<'_, Result<(), String>> {
        self.run(WindowCall::LeaveGroup)
    }

    fn bring_to_front(&self) -> WindowFuture<'_, Result<(), String>> {
        self.run(WindowCall::BringToFront)
    }

    fn close(&self) -> WindowFuture<'_, Result<(), String>> {
        self.run(WindowCall::Close)
    }

    fn get_state(&self) -> WindowFuture<'_, Result<WindowState, String>> {
        Box::pin(async move {
            let inner = self.inner.borrow();
            if inner.failing_handles.contains(&self.name) {
                return Err(format!("window `{}` rejected get-state", self.name));
            }
            inner
                .windows
                .get(&self.name)
                .map(|record| record.state)
                .ok_or_else(|| format!("window `{}` is not open", self.name))
        })
    }
}
