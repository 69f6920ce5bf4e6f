use std::sync::Arc;

use pipit_core::item::SharedItem;
use pipit_core::settings::Settings;
use pipit_events::{EventBus, Notification};
use pipit_host::HostPage;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::activate::{ActivatorConfig, ControlActivator};
use crate::enhance::{EnhanceOutcome, ItemEnhancer};
use crate::materialize::materialize_tracks;
use crate::probe::{AvailabilityProbe, HttpProbe};
use crate::Result;

/// The subtitle module: reacts to opened items with the full discovery and
/// activation workflow.
///
/// Self-contained: it shares no state with other modules and only touches
/// the host through the page lookups and the opened item record.
pub struct AutoSubtitles<P = HttpProbe> {
    enhancer: ItemEnhancer<P>,
    page: Arc<dyn HostPage>,
    activator: ActivatorConfig,
}

impl AutoSubtitles<HttpProbe> {
    /// Production wiring: HEAD probe with the configured timeout.
    pub fn from_settings(settings: &Settings, page: Arc<dyn HostPage>) -> Result<Self> {
        let probe = HttpProbe::new(settings.probe_timeout())?;
        Self::with_probe(settings, probe, page)
    }
}

impl<P: AvailabilityProbe + 'static> AutoSubtitles<P> {
    pub fn with_probe(settings: &Settings, probe: P, page: Arc<dyn HostPage>) -> Result<Self> {
        Ok(Self {
            enhancer: ItemEnhancer::from_settings(settings, probe)?,
            page,
            activator: ActivatorConfig::from_settings(settings),
        })
    }

    /// Subscribe to the bus and handle opened items until the bus closes.
    pub fn spawn(self, bus: &EventBus) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        let this = Arc::new(self);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(Notification::ItemOpened { item, .. }) => {
                        // Items are independent; overlapping workflows for
                        // different items are fine.
                        let module = this.clone();
                        tokio::spawn(async move { module.handle_item(item).await });
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event bus lagged, opened items were dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    /// The per-item workflow: enhance, materialize, activate.
    pub async fn handle_item(&self, item: SharedItem) {
        match self.enhancer.enhance(&item).await {
            EnhanceOutcome::Enhanced => {}
            outcome => {
                tracing::debug!(?outcome, item = item.lock().id, "item not enhanced");
                return;
            }
        }

        // The host fires itemOpened after rendering the item, so the video
        // element is normally already there; the activator covers the case
        // where it is not.
        if let Some(video) = self.page.active_video() {
            materialize_tracks(&item, video.as_ref());
        } else {
            tracing::debug!(item = item.lock().id, "video not rendered yet");
        }

        let outcome = ControlActivator::new(self.page.clone(), self.activator.clone())
            .run()
            .await;
        tracing::debug!(?outcome, "caption activation finished");
    }
}
