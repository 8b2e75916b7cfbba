//! Inter-application publish/subscribe bus contracts.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use futures::{
    channel::mpsc::{unbounded, UnboundedSender},
    stream::LocalBoxStream,
    StreamExt,
};
use serde_json::Value;

/// Object-safe boxed future used by [`InteropBus`].
pub type InteropFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Well-known topics exchanged between trading applications.
pub enum InteropTopic {
    /// Highlight a trade row in the blotter.
    HighlightBlotter,
    /// Open the FX trading application with a currency pair payload.
    OpenFxApp,
    /// Open a chart for a currency pair.
    OpenChart,
}

impl InteropTopic {
    /// Returns the stable wire topic string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighlightBlotter => "highlight-blotter",
            Self::OpenFxApp => "open-fx-app",
            Self::OpenChart => "open-chart",
        }
    }
}

impl std::fmt::Display for InteropTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host service for cross-application messaging.
pub trait InteropBus {
    /// Subscribes to every message published on `topic` from any sender.
    ///
    /// Dropping the stream unsubscribes.
    fn subscribe(&self, topic: &str) -> LocalBoxStream<'static, Value>;

    /// Publishes `message` on `topic`.
    fn publish<'a>(
        &'a self,
        topic: &'a str,
        message: Value,
    ) -> InteropFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op bus: subscriptions never yield and publishes are dropped.
pub struct NoopInteropBus;

impl InteropBus for NoopInteropBus {
    fn subscribe(&self, _topic: &str) -> LocalBoxStream<'static, Value> {
        futures::stream::pending().boxed_local()
    }

    fn publish<'a>(
        &'a self,
        _topic: &'a str,
        _message: Value,
    ) -> InteropFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Default)]
struct MemoryInteropInner {
    subscribers: HashMap<String, Vec<UnboundedSender<Value>>>,
    published: Vec<(String, Value)>,
}

#[derive(Debug, Clone, Default)]
/// In-process bus that fans messages out to live subscribers and records every publish.
pub struct MemoryInteropBus {
    inner: Rc<RefCell<MemoryInteropInner>>,
}

impl MemoryInteropBus {
    /// Returns every published `(topic, message)` pair in order.
    pub fn published(&self) -> Vec<(String, Value)> {
        self.inner.borrow().published.clone()
    }
}

impl InteropBus for MemoryInteropBus {
    fn subscribe(&self, topic: &str) -> LocalBoxStream<'static, Value> {
        let (sender, receiver) = unbounded();
        self.inner
            .borrow_mut()
            .subscribers
            .entry(topic.to_string())
            .or_default()
            .push(sender);
        receiver.boxed_local()
    }

    fn publish<'a>(
        &'a self,
        topic: &'a str,
        message: Value,
    ) -> InteropFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            if let Some(subscribers) = inner.subscribers.get_mut(topic) {
                subscribers.retain(|sender| sender.unbounded_send(message.clone()).is_ok());
            }
            inner.published.push((topic.to_string(), message));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn publish_reaches_subscribers_of_the_same_topic_only() {
        let bus = MemoryInteropBus::default();
        let mut highlights = bus.subscribe(InteropTopic::HighlightBlotter.as_str());
        let mut charts = bus.subscribe(InteropTopic::OpenChart.as_str());

        block_on(bus.publish(
            InteropTopic::HighlightBlotter.as_str(),
            json!({"tradeId": 7}),
        ))
        .expect("publish");

        assert_eq!(block_on(highlights.next()), Some(json!({"tradeId": 7})));
        assert_eq!(bus.published().len(), 1);
        assert!(futures::FutureExt::now_or_never(charts.next()).is_none());
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_publish() {
        let bus = MemoryInteropBus::default();
        drop(bus.subscribe("topic"));

        block_on(bus.publish("topic", json!(1))).expect("publish");
        assert!(bus.inner.borrow().subscribers["topic"].is_empty());
    }
}
