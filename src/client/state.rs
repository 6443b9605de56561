//! Which screen the client shows, plus refresh requests for list views.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// One screen of the client. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    GeneralDepartment,
    Department,
    Branch,
    Country,
    City,
    User,
    #[default]
    Employee,
    Health,
    Overtime,
    OvertimeType,
    Vacation,
    VacationType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "view")]
pub enum ViewEvent {
    /// The active view changed.
    Selected(View),
    /// The view's data changed and should be reloaded.
    RefreshRequested(View),
}

const EVENT_CAPACITY: usize = 64;

/// Shared view selection. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct ViewState {
    current: Arc<RwLock<View>>,
    events: broadcast::Sender<ViewEvent>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            current: Arc::new(RwLock::new(View::default())),
            events,
        }
    }

    #[must_use]
    pub fn current(&self) -> View {
        *self
            .current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_shown(&self, view: View) -> bool {
        self.current() == view
    }

    pub fn select(&self, view: View) {
        *self
            .current
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = view;
        // No subscribers is fine
        let _ = self.events.send(ViewEvent::Selected(view));
    }

    pub fn request_refresh(&self, view: View) {
        let _ = self.events.send(ViewEvent::RefreshRequested(view));
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_is_default_view() {
        let state = ViewState::new();
        assert_eq!(state.current(), View::Employee);
        assert!(state.is_shown(View::Employee));
    }

    #[test]
    fn test_select_replaces_previous_view() {
        let state = ViewState::new();
        state.select(View::Vacation);

        assert!(state.is_shown(View::Vacation));
        assert!(!state.is_shown(View::Employee));
    }

    #[tokio::test]
    async fn test_subscribers_see_events_in_order() {
        let state = ViewState::new();
        let mut events = state.subscribe();

        state.select(View::Branch);
        state.request_refresh(View::Branch);

        assert_eq!(events.recv().await.unwrap(), ViewEvent::Selected(View::Branch));
        assert_eq!(
            events.recv().await.unwrap(),
            ViewEvent::RefreshRequested(View::Branch)
        );
    }

    #[test]
    fn test_clones_share_selection() {
        let state = ViewState::new();
        let other = state.clone();
        other.select(View::City);
        assert_eq!(state.current(), View::City);
    }
}
