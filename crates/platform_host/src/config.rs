//! Platform configuration model and the source it is loaded from.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Storage key holding the serialized [`PlatformConfig`].
pub const PLATFORM_CONFIG_KEY: &str = "trading.platform.config.v1";

/// Object-safe boxed future used by [`ConfigSource`].
pub type ConfigFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Tunables for the platform adapter surface. Missing fields take their defaults.
pub struct PlatformConfig {
    /// Route rendered inside host notification windows.
    pub notification_url: String,
    /// Notification auto-dismiss timeout.
    pub notification_timeout_ms: u64,
    /// Capacity of the inbound notification inbox.
    pub notification_inbox_capacity: usize,
    /// Time a freshly launched application needs before it accepts interop messages.
    pub app_launch_settle_ms: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            notification_url: "/notification".to_string(),
            notification_timeout_ms: 8_000,
            notification_inbox_capacity: 64,
            app_launch_settle_ms: 1_000,
        }
    }
}

/// Source of raw JSON configuration documents keyed by string.
pub trait ConfigSource {
    /// Loads the raw JSON stored under `key`, if any.
    fn load_raw<'a>(&'a self, key: &'a str) -> ConfigFuture<'a, Result<Option<String>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Config source with nothing stored.
pub struct NoopConfigSource;

impl ConfigSource for NoopConfigSource {
    fn load_raw<'a>(&'a self, _key: &'a str) -> ConfigFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory config source keyed by string.
pub struct MemoryConfigSource {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryConfigSource {
    /// Stores a raw JSON document under `key`.
    pub fn insert(&self, key: impl Into<String>, raw_json: impl Into<String>) {
        self.inner.borrow_mut().insert(key.into(), raw_json.into());
    }
}

impl ConfigSource for MemoryConfigSource {
    fn load_raw<'a>(&'a self, key: &'a str) -> ConfigFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }
}

/// Loads [`PlatformConfig`] from `source`, falling back to defaults when nothing is stored.
///
/// # Errors
///
/// Returns an error when the source fails or the stored document is not valid JSON.
pub async fn load_platform_config_with<S: ConfigSource + ?Sized>(
    source: &S,
) -> Result<PlatformConfig, String> {
    let Some(raw) = source.load_raw(PLATFORM_CONFIG_KEY).await? else {
        return Ok(PlatformConfig::default());
    };
    serde_json::from_str(&raw).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_document_yields_defaults() {
        let config = block_on(load_platform_config_with(&NoopConfigSource)).expect("load");
        assert_eq!(config, PlatformConfig::default());
        assert_eq!(config.notification_timeout_ms, 8_000);
    }

    #[test]
    fn partial_document_keeps_defaults_for_missing_fields() {
        let source = MemoryConfigSource::default();
        source.insert(PLATFORM_CONFIG_KEY, r#"{"notification_timeout_ms": 3000}"#);

        let config = block_on(load_platform_config_with(&source)).expect("load");
        assert_eq!(config.notification_timeout_ms, 3_000);
        assert_eq!(config.notification_url, "/notification");
    }

    #[test]
    fn malformed_document_is_an_error() {
        let source = MemoryConfigSource::default();
        source.insert(PLATFORM_CONFIG_KEY, "{not json");

        assert!(block_on(load_platform_config_with(&source)).is_err());
    }
}
