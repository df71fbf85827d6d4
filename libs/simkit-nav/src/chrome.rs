//! Platform chrome collaborator (host-app buttons, title, haptics).

use std::sync::Arc;

/// Callback registered for the primary action button.
pub type ActionCallback = Arc<dyn Fn() + Send + Sync>;

/// Host-app chrome surface the engine drives after every completed
/// navigation. Page controllers may additionally drive the primary action
/// during their own lifetime and must clear it on destroy.
///
/// Implementations must not fail: post-navigation effects run
/// unconditionally and the engine never handles chrome errors.
pub trait PlatformChrome: Send + Sync {
    fn set_title(&self, title: &str);
    fn show_back_button(&self);
    fn hide_back_button(&self);
    fn show_primary_action(&self, text: &str, on_click: ActionCallback);
    fn hide_primary_action(&self);
    fn set_bottom_nav(&self, visible: bool);
    fn haptic_selection(&self);
}

/// Chrome that does nothing, for headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullChrome;

impl PlatformChrome for NullChrome {
    fn set_title(&self, _title: &str) {}
    fn show_back_button(&self) {}
    fn hide_back_button(&self) {}
    fn show_primary_action(&self, _text: &str, _on_click: ActionCallback) {}
    fn hide_primary_action(&self) {}
    fn set_bottom_nav(&self, _visible: bool) {}
    fn haptic_selection(&self) {}
}
