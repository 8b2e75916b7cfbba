//! Notification service contracts and no-op/in-memory adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One host notification: the route rendering it, its payload, and its display lifetime.
pub struct NotificationRequest {
    /// Route loaded inside the notification window.
    pub url: String,
    /// Structured payload handed to the notification route.
    pub message: Value,
    /// Auto-dismiss timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Host service for user-visible notifications.
pub trait NotificationService {
    /// Dispatches a notification.
    fn notify<'a>(
        &'a self,
        request: &'a NotificationRequest,
    ) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(
        &'a self,
        _request: &'a NotificationRequest,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Notification service that records every delivered request.
pub struct MemoryNotificationService {
    delivered: Rc<RefCell<Vec<NotificationRequest>>>,
}

impl MemoryNotificationService {
    /// Returns delivered requests in order.
    pub fn delivered(&self) -> Vec<NotificationRequest> {
        self.delivered.borrow().clone()
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify<'a>(
        &'a self,
        request: &'a NotificationRequest,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.delivered.borrow_mut().push(request.clone());
            Ok(())
        })
    }
}
