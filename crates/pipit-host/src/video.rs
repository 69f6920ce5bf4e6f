/// Display mode of one caption track, mirroring the host's track modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMode {
    Showing,
    Hidden,
}

/// A caption track as rendered on a video element. Transient: tracks are
/// dropped and recreated whenever the subtitle module re-materializes an
/// item's descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub source_url: String,
    pub label: String,
    pub language_tag: String,
    pub is_default: bool,
    pub mode: TrackMode,
}

/// The rendered video element for one feed item.
///
/// Handles are shared (the activator and the materializer may hold the same
/// surface), so all methods take `&self` and implementations use interior
/// mutability.
pub trait VideoSurface: Send + Sync {
    /// Snapshot of the currently attached caption tracks, in order.
    fn caption_tracks(&self) -> Vec<CaptionTrack>;

    /// Drop every attached caption track.
    fn clear_caption_tracks(&self);

    /// Append one caption track after any existing ones.
    fn append_caption_track(&self, track: CaptionTrack);

    /// Set the display mode of the track at `index`. Out-of-range indices
    /// are ignored, matching how the host element behaves for stale handles.
    fn set_track_mode(&self, index: usize, mode: TrackMode);
}
