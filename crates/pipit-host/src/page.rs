use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{ToggleControl, VideoSurface};

/// Opaque handle to a host-rendered container node. Augmentation code never
/// dereferences it; it only forwards it in notification payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef(u64);

impl NodeRef {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Lookup surface over the host's current page.
///
/// Rendering is asynchronous and not otherwise observable, so both lookups
/// may legitimately return `None` for a while after an item opens; callers
/// poll with a bounded budget.
pub trait HostPage: Send + Sync {
    fn caption_toggle(&self) -> Option<Arc<dyn ToggleControl>>;
    fn active_video(&self) -> Option<Arc<dyn VideoSurface>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ref_identity() {
        assert_eq!(NodeRef::new(7), NodeRef::new(7));
        assert_ne!(NodeRef::new(7), NodeRef::new(8));
        assert_eq!(NodeRef::new(7).id(), 7);
    }
}
