//! Adapter seams to the host client.
//!
//! The host owns the DOM, the view classes, and the item records; this crate
//! defines the narrow interfaces augmentation code is allowed to touch, plus
//! in-memory reference implementations used by tests and embedders.

mod memory;
mod page;
mod toggle;
mod video;

pub use memory::{MemoryPage, MemoryToggle, MemoryVideo};
pub use page::{HostPage, NodeRef};
pub use toggle::{ChangeListener, ListenerAttach, ToggleControl};
pub use video::{CaptionTrack, TrackMode, VideoSurface};
