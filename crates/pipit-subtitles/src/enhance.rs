use pipit_core::caption_url::{CaptionUrlDeriver, normalize_video_url};
use pipit_core::item::{CaptionDescriptor, SharedItem};
use pipit_core::settings::Settings;

use crate::probe::AvailabilityProbe;
use crate::Result;

/// How an enhancement attempt ended. Everything but `Enhanced` is a skip,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhanceOutcome {
    /// A caption descriptor was attached.
    Enhanced,
    /// The item already carries captions; nothing was probed or changed.
    AlreadyCaptioned,
    /// The item has no media reference, or it is not a video asset.
    NotAVideo,
    /// The video URL does not match the allow-listed caption-source shape.
    NoCandidate,
    /// The probe answered "not there" (or failed transport-side).
    Unavailable,
}

/// Orchestrates derive → probe → attach for one item.
///
/// Concurrent enhancements of different items are independent; the only
/// state touched is the item record itself, and its lock is never held
/// across the probe await.
pub struct ItemEnhancer<P> {
    deriver: CaptionUrlDeriver,
    probe: P,
    label: String,
}

impl<P: AvailabilityProbe> ItemEnhancer<P> {
    pub fn new(deriver: CaptionUrlDeriver, probe: P, label: impl Into<String>) -> Self {
        Self {
            deriver,
            probe,
            label: label.into(),
        }
    }

    pub fn from_settings(settings: &Settings, probe: P) -> Result<Self> {
        Ok(Self::new(
            settings.caption_url_deriver()?,
            probe,
            settings.captions.label.clone(),
        ))
    }

    pub async fn enhance(&self, item: &SharedItem) -> EnhanceOutcome {
        let candidate = {
            let guard = item.lock();
            if guard.has_captions() {
                return EnhanceOutcome::AlreadyCaptioned;
            }
            if !guard.has_video() {
                return EnhanceOutcome::NotAVideo;
            }
            // has_video() guarantees media_url is present.
            let Some(media) = guard.media_url.clone() else {
                return EnhanceOutcome::NotAVideo;
            };
            match self.deriver.derive(&normalize_video_url(&media)) {
                Some(candidate) => candidate,
                None => return EnhanceOutcome::NoCandidate,
            }
        };

        if !self.probe.is_available(&candidate).await {
            tracing::debug!(item = item.lock().id, url = %candidate, "no captions found");
            return EnhanceOutcome::Unavailable;
        }

        let mut guard = item.lock();
        // The lock was released across the probe; someone may have captioned
        // the item in the meantime, and captions attach at most once.
        if guard.has_captions() {
            return EnhanceOutcome::AlreadyCaptioned;
        }
        guard.captions.push(CaptionDescriptor {
            source_url: candidate,
            label: self.label.clone(),
            language_tag: self.deriver.language().to_string(),
            is_default: true,
        });
        tracing::debug!(item = guard.id, "caption descriptor attached");
        EnhanceOutcome::Enhanced
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use pipit_core::item::{self, StreamItem};

    use super::*;

    /// Scripted probe that counts how often it was asked.
    struct StubProbe {
        available: bool,
        calls: Arc<AtomicU32>,
    }

    impl StubProbe {
        fn new(available: bool) -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            (
                Self {
                    available,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl AvailabilityProbe for StubProbe {
        async fn is_available(&self, _url: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.available
        }
    }

    fn enhancer(probe: StubProbe) -> ItemEnhancer<StubProbe> {
        ItemEnhancer::new(CaptionUrlDeriver::default(), probe, "Deutsch")
    }

    #[tokio::test]
    async fn test_reachable_captions_attach_one_descriptor() {
        let (probe, _) = StubProbe::new(true);
        let item = item::shared(StreamItem::new(
            43405,
            "https://videos.pr0gramm.com/2025/09/16/43405b442ccd5086.mp4",
        ));

        assert_eq!(enhancer(probe).enhance(&item).await, EnhanceOutcome::Enhanced);

        let guard = item.lock();
        assert_eq!(guard.captions.len(), 1);
        let descriptor = &guard.captions[0];
        assert_eq!(
            descriptor.source_url,
            "https://images.pr0gramm.com/2025/09/16/43405b442ccd5086-de.vtt"
        );
        assert_eq!(descriptor.language_tag, "de");
        assert!(descriptor.is_default);
    }

    #[tokio::test]
    async fn test_already_captioned_item_skips_probe() {
        let (probe, calls) = StubProbe::new(true);
        let item = item::shared(StreamItem::new(1, "https://videos.pr0gramm.com/a.mp4"));
        item.lock().captions.push(CaptionDescriptor {
            source_url: "https://images.pr0gramm.com/a-de.vtt".to_string(),
            label: "Deutsch".to_string(),
            language_tag: "de".to_string(),
            is_default: true,
        });

        assert_eq!(
            enhancer(probe).enhance(&item).await,
            EnhanceOutcome::AlreadyCaptioned
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(item.lock().captions.len(), 1);
    }

    #[tokio::test]
    async fn test_protocol_relative_reference_derives_identically() {
        let (probe_a, _) = StubProbe::new(true);
        let (probe_b, _) = StubProbe::new(true);
        let relative = item::shared(StreamItem::new(1, "//videos.pr0gramm.com/2025/a.mp4"));
        let explicit = item::shared(StreamItem::new(2, "https://videos.pr0gramm.com/2025/a.mp4"));

        enhancer(probe_a).enhance(&relative).await;
        enhancer(probe_b).enhance(&explicit).await;

        assert_eq!(
            relative.lock().captions[0].source_url,
            explicit.lock().captions[0].source_url
        );
    }

    #[tokio::test]
    async fn test_unavailable_probe_leaves_item_untouched() {
        let (probe, calls) = StubProbe::new(false);
        let item = item::shared(StreamItem::new(1, "https://videos.pr0gramm.com/a.mp4"));

        assert_eq!(
            enhancer(probe).enhance(&item).await,
            EnhanceOutcome::Unavailable
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!item.lock().has_captions());
    }

    #[tokio::test]
    async fn test_non_video_media_skips_without_probe() {
        let (probe, calls) = StubProbe::new(true);
        let item = item::shared(StreamItem::new(1, "https://images.pr0gramm.com/a.jpg"));

        assert_eq!(enhancer(probe).enhance(&item).await, EnhanceOutcome::NotAVideo);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_media_skips() {
        let (probe, _) = StubProbe::new(true);
        let item = item::shared(StreamItem {
            id: 1,
            ..Default::default()
        });

        assert_eq!(enhancer(probe).enhance(&item).await, EnhanceOutcome::NotAVideo);
    }

    #[tokio::test]
    async fn test_unmatched_host_is_no_candidate() {
        let (probe, calls) = StubProbe::new(true);
        let item = item::shared(StreamItem::new(1, "https://cdn.elsewhere.net/a.mp4"));

        assert_eq!(
            enhancer(probe).enhance(&item).await,
            EnhanceOutcome::NoCandidate
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
