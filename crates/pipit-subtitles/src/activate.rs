use std::sync::Arc;
use std::time::Duration;

use pipit_core::settings::Settings;
use pipit_host::{HostPage, ListenerAttach, ToggleControl, TrackMode, VideoSurface};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Timing and budget for one activation attempt.
#[derive(Debug, Clone)]
pub struct ActivatorConfig {
    /// Pause between DOM lookups while searching.
    pub poll_interval: Duration,
    /// Lookup budget before giving up silently.
    pub max_attempts: u32,
    /// Pause before the one-shot auto-enable.
    pub auto_enable_delay: Duration,
    /// Whether a discovered default track is switched on automatically.
    pub auto_enable: bool,
}

impl ActivatorConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            poll_interval: settings.activator.poll_interval(),
            max_attempts: settings.activator.max_attempts,
            auto_enable_delay: settings.activator.auto_enable_delay(),
            auto_enable: settings.auto_enable_captions,
        }
    }
}

impl Default for ActivatorConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Terminal state of an activation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Both elements were found and the toggle is wired.
    Attached,
    /// The lookup budget ran out; no retry happens for this activation.
    GaveUp,
    /// The task was cancelled while still searching.
    Cancelled,
}

/// Wires the host's caption toggle to the caption tracks of the active
/// video.
///
/// The caption UI renders asynchronously and is not otherwise observable,
/// so the activator starts out *searching*: it re-looks both elements up on
/// a fixed interval, up to a bounded attempt count. Finding them moves it to
/// *attached*: the change listener is registered (at most once per control,
/// guarded host-side) and, when configured, a default track that is not yet
/// showing is switched on after a short delay. Exhausting the budget is a
/// silent give-up, logged but never surfaced.
pub struct ControlActivator {
    page: Arc<dyn HostPage>,
    config: ActivatorConfig,
}

impl ControlActivator {
    pub fn new(page: Arc<dyn HostPage>, config: ActivatorConfig) -> Self {
        Self { page, config }
    }

    /// Run the activation to its terminal state.
    pub async fn run(self) -> ActivationOutcome {
        let mut attempts = 0u32;
        loop {
            if let (Some(toggle), Some(video)) =
                (self.page.caption_toggle(), self.page.active_video())
            {
                return self.attach(toggle, video).await;
            }

            attempts += 1;
            if attempts >= self.config.max_attempts {
                tracing::debug!(attempts, "caption controls never rendered, giving up");
                return ActivationOutcome::GaveUp;
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Spawn the activation as a cancellable task. Dropping the returned
    /// task handle detaches the activation rather than cancelling it.
    pub fn spawn(self) -> ActivationTask {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let run = self.run();
            tokio::pin!(run);
            tokio::select! {
                cancelled = cancel_rx => {
                    if cancelled.is_ok() {
                        tracing::debug!("activation cancelled");
                        ActivationOutcome::Cancelled
                    } else {
                        // Sender dropped: the caller detached; finish anyway.
                        run.await
                    }
                }
                outcome = &mut run => outcome,
            }
        });
        ActivationTask {
            cancel: Some(cancel_tx),
            handle,
        }
    }

    async fn attach(
        &self,
        toggle: Arc<dyn ToggleControl>,
        video: Arc<dyn VideoSurface>,
    ) -> ActivationOutcome {
        let listener_video = video.clone();
        let attach = toggle.attach_change_listener(Box::new(move |checked| {
            let mode = if checked {
                TrackMode::Showing
            } else {
                TrackMode::Hidden
            };
            for index in 0..listener_video.caption_tracks().len() {
                listener_video.set_track_mode(index, mode);
            }
        }));
        match attach {
            ListenerAttach::Attached => tracing::debug!("caption toggle wired"),
            ListenerAttach::AlreadyAttached => {
                tracing::debug!("caption toggle was already wired")
            }
        }

        if self.config.auto_enable {
            let tracks = video.caption_tracks();
            if let Some(index) = tracks.iter().position(|track| track.is_default) {
                if tracks[index].mode != TrackMode::Showing {
                    tokio::time::sleep(self.config.auto_enable_delay).await;
                    toggle.set_checked(true);
                    video.set_track_mode(index, TrackMode::Showing);
                    tracing::debug!("default caption track auto-enabled");
                }
            }
        }

        ActivationOutcome::Attached
    }
}

/// Handle to a spawned activation.
pub struct ActivationTask {
    cancel: Option<oneshot::Sender<()>>,
    handle: JoinHandle<ActivationOutcome>,
}

impl ActivationTask {
    /// Cancel the activation if it is still searching. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the terminal state.
    pub async fn join(self) -> ActivationOutcome {
        let ActivationTask { cancel, handle } = self;
        // Keep the cancel sender alive while joining so the task does not
        // observe a spurious detach.
        let _cancel = cancel;
        handle.await.unwrap_or(ActivationOutcome::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use pipit_core::item::{self, CaptionDescriptor, StreamItem};
    use pipit_host::{MemoryPage, MemoryToggle, MemoryVideo};

    use crate::materialize_tracks;

    use super::*;

    fn fast_config() -> ActivatorConfig {
        ActivatorConfig {
            poll_interval: Duration::from_millis(50),
            max_attempts: 5,
            auto_enable_delay: Duration::from_millis(20),
            auto_enable: true,
        }
    }

    fn captioned_video() -> (Arc<MemoryVideo>, pipit_core::item::SharedItem) {
        let mut stream_item = StreamItem::new(1, "https://videos.pr0gramm.com/a.mp4");
        stream_item.captions.push(CaptionDescriptor {
            source_url: "https://images.pr0gramm.com/a-de.vtt".to_string(),
            label: "Deutsch".to_string(),
            language_tag: "de".to_string(),
            is_default: true,
        });
        let item = item::shared(stream_item);
        let video = MemoryVideo::new();
        materialize_tracks(&item, video.as_ref());
        (video, item)
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_attempt_budget() {
        let page = MemoryPage::new();
        let activator = ControlActivator::new(page, fast_config());
        assert_eq!(activator.run().await, ActivationOutcome::GaveUp);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attaches_when_elements_render_late() {
        let page = MemoryPage::new();
        let (video, _item) = captioned_video();
        let toggle = MemoryToggle::new();

        let mut config = fast_config();
        config.max_attempts = 50;
        let task = ControlActivator::new(page.clone(), config).spawn();

        // Let a couple of polls miss before the caption UI shows up.
        tokio::time::sleep(Duration::from_millis(120)).await;
        page.mount_video(video.clone());
        page.mount_toggle(toggle.clone());

        assert_eq!(task.join().await, ActivationOutcome::Attached);
        assert!(toggle.has_listener());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_enables_default_track() {
        let page = MemoryPage::new();
        let (video, _item) = captioned_video();
        let toggle = MemoryToggle::new();
        page.mount_video(video.clone());
        page.mount_toggle(toggle.clone());

        let outcome = ControlActivator::new(page, fast_config()).run().await;
        assert_eq!(outcome, ActivationOutcome::Attached);
        assert!(toggle.is_checked());
        assert_eq!(video.caption_tracks()[0].mode, TrackMode::Showing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_enable_respects_setting() {
        let page = MemoryPage::new();
        let (video, _item) = captioned_video();
        let toggle = MemoryToggle::new();
        page.mount_video(video.clone());
        page.mount_toggle(toggle.clone());

        let mut config = fast_config();
        config.auto_enable = false;
        ControlActivator::new(page, config).run().await;

        assert!(!toggle.is_checked());
        assert_eq!(video.caption_tracks()[0].mode, TrackMode::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_enable_is_one_shot() {
        let page = MemoryPage::new();
        let (video, _item) = captioned_video();
        video.set_track_mode(0, TrackMode::Showing);
        let toggle = MemoryToggle::new();
        page.mount_video(video.clone());
        page.mount_toggle(toggle.clone());

        ControlActivator::new(page, fast_config()).run().await;

        // Already showing: nothing is forced, the toggle stays as the user
        // left it.
        assert!(!toggle.is_checked());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_activation_does_not_double_register() {
        let page = MemoryPage::new();
        let (video, _item) = captioned_video();
        let toggle = MemoryToggle::new();
        page.mount_video(video.clone());
        page.mount_toggle(toggle.clone());

        let first = ControlActivator::new(page.clone(), fast_config()).run().await;
        let second = ControlActivator::new(page, fast_config()).run().await;
        assert_eq!(first, ActivationOutcome::Attached);
        assert_eq!(second, ActivationOutcome::Attached);

        // The control still holds exactly one listener.
        assert_eq!(
            toggle.attach_change_listener(Box::new(|_| {})),
            pipit_host::ListenerAttach::AlreadyAttached
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_change_drives_every_track() {
        let page = MemoryPage::new();
        let (video, item) = captioned_video();
        item.lock().captions.push(CaptionDescriptor {
            source_url: "https://images.pr0gramm.com/a-en.vtt".to_string(),
            label: "English".to_string(),
            language_tag: "en".to_string(),
            is_default: false,
        });
        materialize_tracks(&item, video.as_ref());
        let toggle = MemoryToggle::new();
        page.mount_video(video.clone());
        page.mount_toggle(toggle.clone());

        let mut config = fast_config();
        config.auto_enable = false;
        ControlActivator::new(page, config).run().await;

        toggle.simulate_change(true);
        assert!(
            video
                .caption_tracks()
                .iter()
                .all(|track| track.mode == TrackMode::Showing)
        );

        toggle.simulate_change(false);
        assert!(
            video
                .caption_tracks()
                .iter()
                .all(|track| track.mode == TrackMode::Hidden)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_while_searching() {
        let page = MemoryPage::new();
        let mut config = fast_config();
        config.max_attempts = 1_000;

        let mut task = ControlActivator::new(page, config).spawn();
        task.cancel();
        assert_eq!(task.join().await, ActivationOutcome::Cancelled);
    }
}
