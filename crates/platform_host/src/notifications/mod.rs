//! Notification delivery contracts and the inbound notification inbox.

mod inbox;
mod service;

pub use inbox::{InboxPush, NotificationHandler, NotificationInbox};
pub use service::{
    MemoryNotificationService, NoopNotificationService, NotificationFuture, NotificationRequest,
    NotificationService,
};
