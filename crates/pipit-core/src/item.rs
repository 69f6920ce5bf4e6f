use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Extensions the host serves video assets under.
const VIDEO_EXTENSIONS: &[&str] = &[".mp4"];

/// One feed entry as the host hands it to augmentation code.
///
/// Only the fields this crate acts on are modeled; the host record carries
/// more. `media_url` may be protocol-relative (`//host/path.mp4`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamItem {
    pub id: u64,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    /// Caption descriptors attached by the subtitle module. An item gains
    /// captions at most once: a non-empty list makes enhancement a no-op.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captions: Vec<CaptionDescriptor>,
}

impl StreamItem {
    pub fn new(id: u64, media_url: impl Into<String>) -> Self {
        Self {
            id,
            user: None,
            media_url: Some(media_url.into()),
            captions: Vec::new(),
        }
    }

    pub fn has_captions(&self) -> bool {
        !self.captions.is_empty()
    }

    /// Whether the media reference looks like a video asset at all.
    pub fn has_video(&self) -> bool {
        self.media_url
            .as_deref()
            .is_some_and(|url| VIDEO_EXTENSIONS.iter().any(|ext| url.ends_with(ext)))
    }
}

/// A discovered caption file, attached to an item on a successful probe.
/// Never mutated after creation; discarded with the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionDescriptor {
    pub source_url: String,
    pub label: String,
    pub language_tag: String,
    pub is_default: bool,
}

/// Item records are owned by the host and shared with augmentation code;
/// the per-item mutex stands in for the host's shared mutable item object.
/// There is no lock shared across items.
pub type SharedItem = Arc<Mutex<StreamItem>>;

/// Wrap an item the way the host shares it.
pub fn shared(item: StreamItem) -> SharedItem {
    Arc::new(Mutex::new(item))
}
