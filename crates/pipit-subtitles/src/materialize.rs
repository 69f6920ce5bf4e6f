use pipit_core::item::SharedItem;
use pipit_host::{CaptionTrack, TrackMode, VideoSurface};

/// Project an item's caption descriptors onto the rendered video element.
///
/// Full replace, not a diff: existing caption tracks are dropped first, then
/// one track is appended per descriptor, so repeated calls with the same
/// descriptor list leave exactly one track per descriptor. The default
/// marker lands on the descriptor flagged default, or on the sole
/// descriptor when there is exactly one. Tracks materialize hidden; display
/// is the activator's business.
///
/// Returns the number of tracks attached.
pub fn materialize_tracks(item: &SharedItem, video: &dyn VideoSurface) -> usize {
    let descriptors = item.lock().captions.clone();

    video.clear_caption_tracks();
    let sole = descriptors.len() == 1;
    for descriptor in &descriptors {
        video.append_caption_track(CaptionTrack {
            source_url: descriptor.source_url.clone(),
            label: descriptor.label.clone(),
            language_tag: descriptor.language_tag.clone(),
            is_default: descriptor.is_default || sole,
            mode: TrackMode::Hidden,
        });
    }

    tracing::debug!(item = item.lock().id, tracks = descriptors.len(), "tracks materialized");
    descriptors.len()
}
