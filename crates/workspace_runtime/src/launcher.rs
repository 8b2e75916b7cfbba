//! Opens windows that a snapshot names but the live window set lacks.

use std::rc::Rc;

use leptos::logging;
use platform_host::{OnWindowOpen, WindowPlatform};

use crate::{
    error::RestoreError,
    layout::{LayoutAction, LayoutDispatcher},
    model::WindowDescriptor,
    reconciler::PipelineOutcome,
};

#[derive(Clone)]
/// Launches standalone windows and flips their container placement in the layout store.
pub struct WindowLauncher {
    windows: Rc<dyn WindowPlatform>,
    layout: Rc<dyn LayoutDispatcher>,
}

impl WindowLauncher {
    /// Creates a launcher over the host window platform and layout store.
    pub fn new(windows: Rc<dyn WindowPlatform>, layout: Rc<dyn LayoutDispatcher>) -> Self {
        Self { windows, layout }
    }

    /// Opens a window for `descriptor` at its saved position and size.
    ///
    /// The standalone placement is shown from the host's open acknowledgment. The embedded
    /// placeholder is hidden as soon as the open request is accepted, without waiting for that
    /// acknowledgment. A rejected open is logged and reported, never propagated.
    pub async fn launch(&self, descriptor: &WindowDescriptor) -> PipelineOutcome {
        let layout = self.layout.clone();
        let name = descriptor.name.clone();
        let on_open: OnWindowOpen =
            Box::new(move || layout.dispatch(LayoutAction::show_standalone(name)));

        let opened = self
            .windows
            .open(
                descriptor.open_config(),
                Some(descriptor.position_override()),
                on_open,
                None,
            )
            .await;

        match opened {
            Ok(()) => {
                self.layout
                    .dispatch(LayoutAction::hide_embedded(descriptor.name.clone()));
                PipelineOutcome::Launched {
                    name: descriptor.name.clone(),
                }
            }
            Err(reason) => {
                let err = RestoreError::LaunchFailure {
                    name: descriptor.name.clone(),
                    reason,
                };
                logging::warn!("workspace restore: {err}");
                PipelineOutcome::Failed(err)
            }
        }
    }
}
