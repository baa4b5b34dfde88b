//! Global Application State
//!
//! Reactive state shared by the layout and every page.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use leptos::*;

use hbnb::controller::{Notice, NoticeKind};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Visibility of the header's login link, painted by each page
    pub login_link_visible: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message
    pub success: RwSignal<Option<String>>,
    /// Whether a notice region is mounted; notices are dropped otherwise
    pub notice_region: RwSignal<bool>,
    /// Pending auto-hide per message; replacing one cancels it
    error_timeout: StoredValue<Option<Timeout>>,
    success_timeout: StoredValue<Option<Timeout>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        login_link_visible: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        notice_region: create_rw_signal(false),
        error_timeout: store_value(None),
        success_timeout: store_value(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a controller notice, auto-hiding it when it carries a delay
    pub fn show_notice(&self, notice: &Notice) {
        if !self.notice_region.get_untracked() {
            return;
        }

        let (signal, timeout) = match notice.kind {
            NoticeKind::Error => (self.error, self.error_timeout),
            NoticeKind::Success => (self.success, self.success_timeout),
        };
        signal.set(Some(notice.text.clone()));

        let hide = notice
            .hide_after
            .map(|delay| Timeout::new(millis(delay), move || signal.set(None)));
        timeout.set_value(hide);
    }

    /// Clear both messages; called when the user starts a new action
    pub fn clear_notices(&self) {
        self.error_timeout.set_value(None);
        self.success_timeout.set_value(None);
        self.error.set(None);
        self.success.set(None);
    }
}

fn millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(5000)), 5000);
        assert_eq!(millis(Duration::from_secs(u64::MAX)), u32::MAX);
    }

    #[test]
    fn test_notice_dropped_without_region() {
        let runtime = create_runtime();
        provide_global_state();
        let state = use_context::<GlobalState>().unwrap();

        let notice = Notice {
            kind: NoticeKind::Error,
            text: "Failed to load places.".into(),
            hide_after: None,
        };
        state.show_notice(&notice);
        assert_eq!(state.error.get_untracked(), None);

        state.notice_region.set(true);
        state.show_notice(&notice);
        assert_eq!(state.error.get_untracked().as_deref(), Some("Failed to load places."));

        state.clear_notices();
        assert_eq!(state.error.get_untracked(), None);
        runtime.dispose();
    }
}
