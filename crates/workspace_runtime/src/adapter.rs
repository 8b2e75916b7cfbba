//! Capability-checked platform surface consumed by trading UI components.

use std::time::Duration;

use futures::stream::LocalBoxStream;
use platform_host::{
    AppLaunchConfig, Capability, CurrencyPairPosition, HostCapabilities, HostServices,
    InteropTopic, NotificationHandler, NotificationInbox, NotificationRequest, OnWindowClose,
    PlatformConfig, WindowOpenConfig, WindowState,
};
use serde_json::Value;

use crate::{error::PlatformError, toggle::WindowToggleController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How [`PlatformAdapter::open_app`] satisfied a request.
pub enum AppOpen {
    /// The application already ran; its payload, if any, was published on its topic.
    AlreadyRunning,
    /// A new instance was launched.
    Launched {
        /// Time the new instance needs before it accepts interop messages.
        settle_after: Duration,
    },
}

#[derive(Clone)]
/// Platform operations for the negotiated host, rejecting those the host cannot offer.
pub struct PlatformAdapter {
    services: HostServices,
    config: PlatformConfig,
    inbox: NotificationInbox,
}

impl std::fmt::Debug for PlatformAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformAdapter")
            .field("services", &self.services)
            .field("config", &self.config)
            .field("inbox_len", &self.inbox.len())
            .finish()
    }
}

impl PlatformAdapter {
    /// Creates an adapter over negotiated `services`.
    pub fn new(services: HostServices, config: PlatformConfig) -> Self {
        let inbox = NotificationInbox::with_capacity(config.notification_inbox_capacity);
        Self {
            services,
            config,
            inbox,
        }
    }

    /// Stable host name for diagnostics.
    pub fn name(&self) -> &'static str {
        self.services.host_strategy.as_str()
    }

    /// Host kind: `"browser"` or `"desktop"`.
    pub fn kind(&self) -> &'static str {
        self.services.host_strategy.kind()
    }

    /// Negotiated capabilities.
    pub fn capabilities(&self) -> HostCapabilities {
        self.services.capabilities
    }

    /// Active configuration.
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Bounded buffer for notification messages delivered by the host.
    pub fn notification_inbox(&self) -> &NotificationInbox {
        &self.inbox
    }

    /// Callback the host invokes with inbound notification messages.
    pub fn notification_handler(&self) -> NotificationHandler {
        self.inbox.handler()
    }

    fn require(&self, capability: Capability) -> Result<(), PlatformError> {
        Ok(self.services.capabilities.require(capability)?)
    }

    /// Closes the window this UI runs in.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when windows are unavailable or the host rejects the close.
    pub async fn close_current(&self) -> Result<(), PlatformError> {
        self.require(Capability::Windows)?;
        self.services
            .windows
            .current()
            .close()
            .await
            .map_err(PlatformError::host("close"))
    }

    /// Minimizes the window this UI runs in.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when windows are unavailable or the host rejects the call.
    pub async fn minimize_current(&self) -> Result<(), PlatformError> {
        self.require(Capability::Windows)?;
        self.services
            .windows
            .current()
            .minimize()
            .await
            .map_err(PlatformError::host("minimize"))
    }

    /// Toggles maximize on the window this UI runs in, returning its prior state.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when windows are unavailable or a toggle step fails.
    pub async fn maximize_current(&self) -> Result<WindowState, PlatformError> {
        self.require(Capability::Windows)?;
        let current = self.services.windows.current();
        WindowToggleController
            .toggle_maximize(current.as_ref())
            .await
    }

    /// Opens a standalone window; `on_close` runs once when that window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when windows are unavailable or the host refuses the open.
    pub async fn open_window(
        &self,
        config: WindowOpenConfig,
        on_close: Option<OnWindowClose>,
    ) -> Result<(), PlatformError> {
        self.require(Capability::Windows)?;
        self.services
            .windows
            .open(config, None, Box::new(|| {}), on_close)
            .await
            .map_err(PlatformError::host("open-window"))
    }

    /// Exits the application this UI belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when app lifecycle control is unavailable or the host refuses.
    pub async fn exit_app(&self) -> Result<(), PlatformError> {
        self.require(Capability::AppLaunch)?;
        self.services
            .apps
            .exit_current()
            .await
            .map_err(PlatformError::host("exit-application"))
    }

    /// Opens application `id`, reusing a running instance when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when app launch (or interop, for a payload handoff) is
    /// unavailable or the host fails to list, launch, or publish.
    pub async fn open_app(
        &self,
        id: &str,
        config: &AppLaunchConfig,
    ) -> Result<AppOpen, PlatformError> {
        self.require(Capability::AppLaunch)?;
        let running = self
            .services
            .apps
            .applications()
            .await
            .map_err(PlatformError::host("list-applications"))?
            .into_iter()
            .any(|app| app.is_running && app.uuid == id);

        if running {
            if let Some(payload) = &config.payload {
                self.publish(&config.topic, payload.clone()).await?;
            }
            return Ok(AppOpen::AlreadyRunning);
        }

        self.services
            .apps
            .launch(config)
            .await
            .map_err(PlatformError::host("launch-application"))?;
        Ok(AppOpen::Launched {
            settle_after: Duration::from_millis(self.config.app_launch_settle_ms),
        })
    }

    /// Opens the charting application.
    ///
    /// # Errors
    ///
    /// See [`Self::open_app`].
    pub async fn open_chart(
        &self,
        id: &str,
        config: &AppLaunchConfig,
    ) -> Result<AppOpen, PlatformError> {
        self.open_app(id, config).await
    }

    /// Subscribes to messages published on `topic` by any application.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Capability`] when interop is unavailable.
    pub fn subscribe(&self, topic: &str) -> Result<LocalBoxStream<'static, Value>, PlatformError> {
        self.require(Capability::Interop)?;
        Ok(self.services.interop.subscribe(topic))
    }

    /// Publishes `message` on `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when interop is unavailable or the host rejects the publish.
    pub async fn publish(&self, topic: &str, message: Value) -> Result<(), PlatformError> {
        self.require(Capability::Interop)?;
        self.services
            .interop
            .publish(topic, message)
            .await
            .map_err(PlatformError::host("publish"))
    }

    /// Subscribes to blotter highlight requests raised from notifications.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Capability`] when interop is unavailable.
    pub fn notification_highlight(&self) -> Result<LocalBoxStream<'static, Value>, PlatformError> {
        self.subscribe(InteropTopic::HighlightBlotter.as_str())
    }

    /// Shows a host notification carrying `message`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when notifications are unavailable or need user activation, or
    /// when the host rejects the notification.
    pub async fn notify(&self, message: Value) -> Result<(), PlatformError> {
        self.require(Capability::Notifications)?;
        let request = NotificationRequest {
            url: self.config.notification_url.clone(),
            message,
            timeout_ms: self.config.notification_timeout_ms,
        };
        self.services
            .notifications
            .notify(&request)
            .await
            .map_err(PlatformError::host("notify"))
    }

    /// Name of the spreadsheet adapter in use.
    pub fn spreadsheet_adapter_name(&self) -> &'static str {
        self.services.spreadsheet.adapter_name()
    }

    /// Returns whether a spreadsheet is connected.
    pub fn spreadsheet_is_open(&self) -> bool {
        self.services.spreadsheet.is_open()
    }

    /// Opens the spreadsheet workbook.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when spreadsheets are unavailable or the host fails to open one.
    pub async fn open_spreadsheet(&self) -> Result<(), PlatformError> {
        self.require(Capability::Spreadsheet)?;
        self.services
            .spreadsheet
            .open()
            .await
            .map_err(PlatformError::host("open-spreadsheet"))
    }

    /// Publishes position rows to the spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when spreadsheets are unavailable or the publish fails.
    pub async fn publish_positions(
        &self,
        positions: &[CurrencyPairPosition],
    ) -> Result<(), PlatformError> {
        self.require(Capability::Spreadsheet)?;
        self.services
            .spreadsheet
            .publish_positions(positions)
            .await
            .map_err(PlatformError::host("publish-positions"))
    }

    /// Publishes blotter rows to the spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when spreadsheets are unavailable or the publish fails.
    pub async fn publish_blotter(&self, blotter: Value) -> Result<(), PlatformError> {
        self.require(Capability::Spreadsheet)?;
        self.services
            .spreadsheet
            .publish_blotter(blotter)
            .await
            .map_err(PlatformError::host("publish-blotter"))
    }
}
