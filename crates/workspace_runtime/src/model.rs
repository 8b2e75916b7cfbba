//! Typed workspace snapshot models parsed at the host boundary.

use std::collections::BTreeSet;

use platform_host::{
    PositionOverride, WindowBounds, WindowIdentity, WindowOpenConfig, WindowState,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SnapshotParseError;

/// Key holding the child window list inside a persisted application workspace.
pub const CHILD_WINDOWS_KEY: &str = "childWindows";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Desired configuration of one child window inside a workspace snapshot.
pub struct WindowDescriptor {
    /// Unique window name; joins the snapshot to the live window set.
    pub name: String,
    /// Content URL.
    pub url: String,
    /// Saved outer bounds.
    pub bounds: WindowBounds,
    /// Saved lifecycle state.
    pub state: WindowState,
    /// Whether the window was visible.
    pub is_showing: bool,
    /// Whether the window was a member of a tab group.
    pub is_tabbed: bool,
}

impl WindowDescriptor {
    /// Returns the host identity for this descriptor.
    pub fn identity(&self) -> WindowIdentity {
        WindowIdentity::new(&self.name)
    }

    /// Builds the open configuration used when the window has no live counterpart.
    pub fn open_config(&self) -> WindowOpenConfig {
        WindowOpenConfig {
            name: self.name.clone(),
            url: self.url.clone(),
            width: self.bounds.width,
            height: self.bounds.height,
        }
    }

    /// Returns the one-time initial placement derived from the saved bounds.
    pub const fn position_override(&self) -> PositionOverride {
        PositionOverride {
            default_left: self.bounds.left,
            default_top: self.bounds.top,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Persisted application workspace: ordered child window descriptors plus the untouched host
/// document they were parsed from.
pub struct WorkspaceSnapshot {
    child_windows: Vec<WindowDescriptor>,
    raw: Value,
}

impl WorkspaceSnapshot {
    /// Builds a snapshot from descriptors, synthesizing the host document.
    pub fn new(child_windows: Vec<WindowDescriptor>) -> Self {
        let raw = serde_json::json!({ "childWindows": child_windows });
        Self { child_windows, raw }
    }

    /// Parses a persisted host workspace document.
    ///
    /// Fields outside the descriptor shape are ignored but kept in [`Self::raw`].
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotParseError`] when `childWindows` is missing, an entry is malformed, or
    /// two entries share a name.
    pub fn from_value(raw: Value) -> Result<Self, SnapshotParseError> {
        let entries = raw
            .get(CHILD_WINDOWS_KEY)
            .and_then(Value::as_array)
            .ok_or(SnapshotParseError::MissingChildWindows)?;

        let mut seen = BTreeSet::new();
        let mut child_windows = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let descriptor: WindowDescriptor = serde_json::from_value(entry.clone())
                .map_err(|err| SnapshotParseError::InvalidDescriptor {
                    index,
                    reason: err.to_string(),
                })?;
            if !seen.insert(descriptor.name.clone()) {
                return Err(SnapshotParseError::DuplicateName {
                    name: descriptor.name,
                });
            }
            child_windows.push(descriptor);
        }

        Ok(Self { child_windows, raw })
    }

    /// Returns the descriptors in snapshot order.
    pub fn child_windows(&self) -> &[WindowDescriptor] {
        &self.child_windows
    }

    /// Returns the host document this snapshot was built from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consumes the snapshot and returns the host document unchanged.
    pub fn into_raw(self) -> Value {
        self.raw
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Names of the child windows open at the instant a restore began.
pub struct LiveWindowSet {
    names: BTreeSet<String>,
}

impl LiveWindowSet {
    /// Returns whether a window named `name` was open.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns the number of live windows.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether no windows were open.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<WindowIdentity> for LiveWindowSet {
    fn from_iter<I: IntoIterator<Item = WindowIdentity>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|identity| identity.name).collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for LiveWindowSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(str::to_string).collect(),
        }
    }
}
