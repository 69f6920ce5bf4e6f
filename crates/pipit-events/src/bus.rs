use pipit_core::item::{SharedItem, StreamItem};
use pipit_host::NodeRef;
use tokio::sync::broadcast;

use crate::hooks::NavigationMode;

/// Queue depth per subscriber before the slowest one starts lagging.
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// Discriminant of a [`Notification`], for subscribers that filter by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SettingsLoaded,
    CommentsLoaded,
    BeforeLocationChange,
    LocationChange,
    UserSync,
    StreamLoaded,
    ItemOpened,
}

/// One normalized host notification. Payload shape is fixed per kind.
#[derive(Debug, Clone)]
pub enum Notification {
    /// The settings view finished rendering.
    SettingsLoaded,
    /// A comment block finished rendering into `container`.
    CommentsLoaded { container: NodeRef },
    /// Navigation is about to leave the current view.
    BeforeLocationChange { mode: NavigationMode },
    /// Navigation landed; `is_post` marks single-post paths.
    LocationChange { mode: NavigationMode, is_post: bool },
    /// The host synced the signed-in user; payload is the raw sync response.
    UserSync { response: serde_json::Value },
    /// A stream page finished loading.
    StreamLoaded {
        items: Vec<StreamItem>,
        position: u64,
        error: Option<String>,
    },
    /// A feed item was opened and rendered into `container`.
    ItemOpened { item: SharedItem, container: NodeRef },
}

impl Notification {
    pub fn kind(&self) -> EventKind {
        match self {
            Notification::SettingsLoaded => EventKind::SettingsLoaded,
            Notification::CommentsLoaded { .. } => EventKind::CommentsLoaded,
            Notification::BeforeLocationChange { .. } => EventKind::BeforeLocationChange,
            Notification::LocationChange { .. } => EventKind::LocationChange,
            Notification::UserSync { .. } => EventKind::UserSync,
            Notification::StreamLoaded { .. } => EventKind::StreamLoaded,
            Notification::ItemOpened { .. } => EventKind::ItemOpened,
        }
    }
}

/// Broadcast bus for normalized notifications.
///
/// Publishing is fire-and-forget: producers never learn who, if anyone, is
/// listening, and an empty subscriber list is not an error.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Notification>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, notification: Notification) {
        let kind = notification.kind();
        if self.tx.send(notification).is_err() {
            tracing::trace!(?kind, "published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}
