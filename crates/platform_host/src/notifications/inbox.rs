//! Bounded buffer for notification messages delivered by the host before the notification route
//! is mounted.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use serde_json::Value;

/// Callback the host notification subsystem invokes for every inbound message.
pub type NotificationHandler = Rc<dyn Fn(Value)>;

#[derive(Debug, Clone, PartialEq)]
/// Outcome of [`NotificationInbox::push`].
pub enum InboxPush {
    /// Message buffered without eviction.
    Buffered,
    /// Buffer was full; the oldest message was evicted to make room.
    EvictedOldest(Value),
}

#[derive(Debug, Clone)]
/// Owned FIFO of inbound notification messages with a fixed capacity.
///
/// Clones share the same buffer, so the handler given to the host and the route that drains the
/// inbox observe one queue.
pub struct NotificationInbox {
    messages: Rc<RefCell<VecDeque<Value>>>,
    evicted: Rc<Cell<usize>>,
    capacity: usize,
}

impl NotificationInbox {
    /// Creates an inbox holding at most `capacity` messages (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: Rc::new(RefCell::new(VecDeque::with_capacity(capacity))),
            evicted: Rc::new(Cell::new(0)),
            capacity,
        }
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of buffered messages.
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    /// Returns whether no messages are buffered.
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    /// Returns how many messages were evicted unread since the inbox was created.
    pub fn evicted_count(&self) -> usize {
        self.evicted.get()
    }

    /// Buffers `message`, evicting the oldest one when full.
    ///
    /// Evictions are also counted in [`Self::evicted_count`].
    pub fn push(&self, message: Value) -> InboxPush {
        let mut messages = self.messages.borrow_mut();
        let evicted = if messages.len() >= self.capacity {
            messages.pop_front()
        } else {
            None
        };
        messages.push_back(message);
        match evicted {
            Some(oldest) => {
                self.evicted.set(self.evicted.get() + 1);
                InboxPush::EvictedOldest(oldest)
            }
            None => InboxPush::Buffered,
        }
    }

    /// Removes and returns every buffered message in arrival order.
    pub fn drain(&self) -> Vec<Value> {
        self.messages.borrow_mut().drain(..).collect()
    }

    /// Returns a handler that pushes into this inbox, for injection into the host notification
    /// subsystem at construction time.
    pub fn handler(&self) -> NotificationHandler {
        let inbox = self.clone();
        Rc::new(move |message| {
            inbox.push(message);
        })
    }
}
