//! Container visibility store: reducer actions, state, and dispatch seam.
//!
//! A container is a logical panel that renders either embedded in the main window or promoted to
//! its own standalone window. Each placement carries its own display flag, so the restore
//! pipelines of different windows never write the same key.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use leptos::{Callable, Callback};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Where a container renders.
pub enum ContainerPlacement {
    /// Placeholder slot inside the main window layout.
    Embedded,
    /// Dedicated top-level window.
    Standalone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Actions accepted by [`reduce_layout`].
pub enum LayoutAction {
    /// Show or hide a container at one placement.
    UpdateContainerVisibility {
        /// Container (and window) name.
        name: String,
        /// Placement being updated.
        placement: ContainerPlacement,
        /// Whether the container renders at that placement.
        display: bool,
    },
}

impl LayoutAction {
    /// Marks `name` as showing in its standalone window.
    pub fn show_standalone(name: impl Into<String>) -> Self {
        Self::UpdateContainerVisibility {
            name: name.into(),
            placement: ContainerPlacement::Standalone,
            display: true,
        }
    }

    /// Removes `name` from its embedded placeholder in the main window.
    pub fn hide_embedded(name: impl Into<String>) -> Self {
        Self::UpdateContainerVisibility {
            name: name.into(),
            placement: ContainerPlacement::Embedded,
            display: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Display flags for one container.
pub struct ContainerVisibility {
    /// Rendered inside the main window.
    pub embedded: bool,
    /// Rendered in a standalone window.
    pub standalone: bool,
}

impl Default for ContainerVisibility {
    fn default() -> Self {
        Self {
            embedded: true,
            standalone: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Visibility of every container the layout has been told about.
pub struct LayoutState {
    containers: BTreeMap<String, ContainerVisibility>,
}

impl LayoutState {
    /// Returns the visibility of `name`; unknown containers are embedded only.
    pub fn container(&self, name: &str) -> ContainerVisibility {
        self.containers.get(name).copied().unwrap_or_default()
    }
}

/// Applies a [`LayoutAction`] to the layout state.
pub fn reduce_layout(state: &mut LayoutState, action: LayoutAction) {
    match action {
        LayoutAction::UpdateContainerVisibility {
            name,
            placement,
            display,
        } => {
            let container = state.containers.entry(name).or_default();
            match placement {
                ContainerPlacement::Embedded => container.embedded = display,
                ContainerPlacement::Standalone => container.standalone = display,
            }
        }
    }
}

/// Dispatch seam into the layout store. Dispatches are fire-and-forget.
pub trait LayoutDispatcher {
    /// Dispatches one layout action.
    fn dispatch(&self, action: LayoutAction);
}

impl LayoutDispatcher for Callback<LayoutAction> {
    fn dispatch(&self, action: LayoutAction) {
        self.call(action);
    }
}

#[derive(Debug, Clone, Default)]
/// Layout store held in memory, with an ordered log of every dispatched action.
pub struct MemoryLayoutStore {
    state: Rc<RefCell<LayoutState>>,
    log: Rc<RefCell<Vec<LayoutAction>>>,
}

impl MemoryLayoutStore {
    /// Returns the current layout state.
    pub fn state(&self) -> LayoutState {
        self.state.borrow().clone()
    }

    /// Returns every dispatched action in order.
    pub fn dispatched(&self) -> Vec<LayoutAction> {
        self.log.borrow().clone()
    }
}

impl LayoutDispatcher for MemoryLayoutStore {
    fn dispatch(&self, action: LayoutAction) {
        self.log.borrow_mut().push(action.clone());
        reduce_layout(&mut self.state.borrow_mut(), action);
    }
}
