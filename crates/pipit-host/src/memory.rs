//! In-memory host doubles.
//!
//! Reference implementations of the adapter traits backed by plain state.
//! Tests drive them directly; embedders without a live host (headless runs,
//! demos) can mount them as a stand-in page.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    CaptionTrack, ChangeListener, HostPage, ListenerAttach, NodeRef, ToggleControl, TrackMode,
    VideoSurface,
};

/// In-memory video element.
#[derive(Default)]
pub struct MemoryVideo {
    tracks: Mutex<Vec<CaptionTrack>>,
}

impl MemoryVideo {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl VideoSurface for MemoryVideo {
    fn caption_tracks(&self) -> Vec<CaptionTrack> {
        self.tracks.lock().clone()
    }

    fn clear_caption_tracks(&self) {
        self.tracks.lock().clear();
    }

    fn append_caption_track(&self, track: CaptionTrack) {
        self.tracks.lock().push(track);
    }

    fn set_track_mode(&self, index: usize, mode: TrackMode) {
        if let Some(track) = self.tracks.lock().get_mut(index) {
            track.mode = mode;
        }
    }
}

/// In-memory caption toggle. `simulate_change` plays the role of a user
/// interaction: it flips the state and fires the registered listener.
#[derive(Default)]
pub struct MemoryToggle {
    checked: Mutex<bool>,
    listener: Mutex<Option<ChangeListener>>,
}

impl MemoryToggle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn has_listener(&self) -> bool {
        self.listener.lock().is_some()
    }

    /// Flip the toggle the way a user would, firing the change listener.
    pub fn simulate_change(&self, checked: bool) {
        *self.checked.lock() = checked;
        // Take the listener out of the lock before invoking it so a listener
        // reading the toggle state does not deadlock.
        let listener = self.listener.lock().take();
        if let Some(listener) = listener {
            listener(checked);
            *self.listener.lock() = Some(listener);
        }
    }
}

impl ToggleControl for MemoryToggle {
    fn is_checked(&self) -> bool {
        *self.checked.lock()
    }

    fn set_checked(&self, checked: bool) {
        *self.checked.lock() = checked;
    }

    fn attach_change_listener(&self, listener: ChangeListener) -> ListenerAttach {
        let mut slot = self.listener.lock();
        if slot.is_some() {
            tracing::debug!("change listener already attached, keeping existing one");
            return ListenerAttach::AlreadyAttached;
        }
        *slot = Some(listener);
        ListenerAttach::Attached
    }
}

/// In-memory page. Elements start absent, mirroring a page whose caption UI
/// has not rendered yet; `mount_*` makes them visible to lookups.
#[derive(Default)]
pub struct MemoryPage {
    toggle: Mutex<Option<Arc<MemoryToggle>>>,
    video: Mutex<Option<Arc<MemoryVideo>>>,
    next_node: Mutex<u64>,
}

impl MemoryPage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn mount_toggle(&self, toggle: Arc<MemoryToggle>) {
        *self.toggle.lock() = Some(toggle);
    }

    pub fn mount_video(&self, video: Arc<MemoryVideo>) {
        *self.video.lock() = Some(video);
    }

    /// Hand out a fresh container handle, the way the host numbers rendered
    /// nodes.
    pub fn next_container(&self) -> NodeRef {
        let mut next = self.next_node.lock();
        *next += 1;
        NodeRef::new(*next)
    }
}

impl HostPage for MemoryPage {
    fn caption_toggle(&self) -> Option<Arc<dyn ToggleControl>> {
        self.toggle
            .lock()
            .clone()
            .map(|t| t as Arc<dyn ToggleControl>)
    }

    fn active_video(&self) -> Option<Arc<dyn VideoSurface>> {
        self.video
            .lock()
            .clone()
            .map(|v| v as Arc<dyn VideoSurface>)
    }
}
