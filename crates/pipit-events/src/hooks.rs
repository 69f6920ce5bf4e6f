//! Lifecycle-method decorators.
//!
//! The host exposes its view methods through a narrow adapter: for each
//! method it hands the original implementation to the registry and mounts
//! the returned wrapper in its place. Every wrapper runs the original with
//! its arguments, leaves the return value untouched, and then publishes the
//! normalized notification. The one exception is navigation, where
//! `BeforeLocationChange` goes out ahead of the original so subscribers can
//! still observe the outgoing view.

use std::sync::LazyLock;

use pipit_core::item::StreamItem;
use pipit_host::NodeRef;
use regex::Regex;
use serde_json::Value;

use crate::bus::{EventBus, Notification};

/// How the host performs a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Regular navigation, pushed onto the history stack.
    Push,
    /// Replaces the current history entry.
    Replace,
    /// Updates the view without touching history.
    Silent,
}

/// Arguments of the host's stream-load method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamQuery {
    /// Fetch items older than this id.
    pub older_than: Option<u64>,
    /// Fetch items newer than this id.
    pub newer_than: Option<u64>,
}

/// Result of the host's stream-load method.
#[derive(Debug, Clone, Default)]
pub struct StreamLoadResult {
    pub items: Vec<StreamItem>,
    pub position: u64,
    /// Load failures surface here; the host reports them in-band rather
    /// than by throwing.
    pub error: Option<String>,
}

static POST_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|/)\d+/?$").expect("valid literal regex"));

/// Whether a navigation path ends in an all-digit segment, i.e. points at a
/// single opened post rather than a listing.
pub fn is_post_path(path: &str) -> bool {
    POST_SEGMENT.is_match(path)
}

/// Builds "call original, then notify" wrappers around host methods.
pub struct HookRegistry {
    bus: EventBus,
}

impl HookRegistry {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    /// Wrap the settings view's render method.
    pub fn wrap_settings_render<R>(&self, original: impl Fn() -> R) -> impl Fn() -> R {
        let bus = self.bus.clone();
        move || {
            let out = original();
            bus.publish(Notification::SettingsLoaded);
            out
        }
    }

    /// Wrap the comment renderer; the payload is the rendered container.
    pub fn wrap_comment_render<R>(
        &self,
        original: impl Fn(NodeRef) -> R,
    ) -> impl Fn(NodeRef) -> R {
        let bus = self.bus.clone();
        move |container| {
            let out = original(container);
            bus.publish(Notification::CommentsLoaded { container });
            out
        }
    }

    /// Wrap the user-sync callback; the payload is the sync response the
    /// host passed in.
    pub fn wrap_user_sync<R>(&self, original: impl Fn(&Value) -> R) -> impl Fn(&Value) -> R {
        let bus = self.bus.clone();
        move |response: &Value| {
            let out = original(response);
            bus.publish(Notification::UserSync {
                response: response.clone(),
            });
            out
        }
    }

    /// Wrap the stream loader; the payload mirrors its result, including an
    /// in-band load error.
    pub fn wrap_stream_load(
        &self,
        original: impl Fn(StreamQuery) -> StreamLoadResult,
    ) -> impl Fn(StreamQuery) -> StreamLoadResult {
        let bus = self.bus.clone();
        move |query| {
            let result = original(query);
            bus.publish(Notification::StreamLoaded {
                items: result.items.clone(),
                position: result.position,
                error: result.error.clone(),
            });
            result
        }
    }

    /// Wrap the global navigation entry point. Publishes
    /// `BeforeLocationChange` ahead of the original and `LocationChange`
    /// after it.
    pub fn wrap_navigate<R>(
        &self,
        original: impl Fn(&str, NavigationMode) -> R,
    ) -> impl Fn(&str, NavigationMode) -> R {
        let bus = self.bus.clone();
        move |path: &str, mode: NavigationMode| {
            bus.publish(Notification::BeforeLocationChange { mode });
            let out = original(path, mode);
            bus.publish(Notification::LocationChange {
                mode,
                is_post: is_post_path(path),
            });
            out
        }
    }
}
