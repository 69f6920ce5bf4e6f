//! Normalized host notifications.
//!
//! The host signals lifecycle milestones by calling methods on its own view
//! objects. This crate wraps those methods ("decorate, then notify") and
//! re-emits each milestone as a typed notification on a broadcast bus, so
//! independent modules can subscribe without touching the host directly.

mod bus;
mod hooks;

pub use bus::{DEFAULT_BUS_CAPACITY, EventBus, EventKind, Notification};
pub use hooks::{HookRegistry, NavigationMode, StreamLoadResult, StreamQuery, is_post_path};
