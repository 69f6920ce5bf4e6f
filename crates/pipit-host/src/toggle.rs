/// Callback invoked when the user flips the caption toggle. The argument is
/// the new checked state.
pub type ChangeListener = Box<dyn Fn(bool) + Send + Sync>;

/// Result of a listener attach attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerAttach {
    Attached,
    /// A listener was already registered; the control keeps the existing one.
    /// This is the marker that makes repeated activation attempts idempotent.
    AlreadyAttached,
}

/// The host's caption toggle control.
pub trait ToggleControl: Send + Sync {
    fn is_checked(&self) -> bool;

    /// Set the checked state programmatically. Does NOT fire the change
    /// listener, matching the host control's behavior for scripted writes.
    fn set_checked(&self, checked: bool);

    /// Register the change listener, at most once per control.
    fn attach_change_listener(&self, listener: ChangeListener) -> ListenerAttach;
}
