//! The calendar widget: one state object driving fetch, navigation, the
//! event form and rendering.

use chrono::NaiveDate;

use crate::calendar::event::CalendarEvent;
use crate::calendar::modal::{EventDraft, EventModal, ModalTarget};
use crate::calendar::render::{CalendarLayout, render};
use crate::calendar::school::{SchoolEventFetcher, SchoolEventSource};
use crate::calendar::store::LocalEventStore;
use crate::calendar::view::{ViewMode, ViewState};
use crate::error::GaonResult;
use crate::storage::SharedStorage;

pub struct CalendarWidget<S> {
    state: ViewState,
    store: LocalEventStore,
    school: SchoolEventFetcher<S>,
    modal: EventModal,
}

impl<S: SchoolEventSource> CalendarWidget<S> {
    /// Build the widget on `today` in month view with the stored events.
    /// School events stay empty until `load` or a month change.
    pub fn new(storage: SharedStorage, source: S, today: NaiveDate) -> Self {
        CalendarWidget {
            state: ViewState::new(today),
            store: LocalEventStore::load(storage),
            school: SchoolEventFetcher::new(source),
            modal: EventModal::new(),
        }
    }

    /// Initial school-event fetch for the current month.
    pub async fn load(&mut self) {
        self.school.refresh(self.state.current_date).await;
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn local_events(&self) -> &[CalendarEvent] {
        self.store.events()
    }

    pub fn school_events(&self) -> &[CalendarEvent] {
        self.school.events()
    }

    /// Local events first, then school events.
    pub fn all_events(&self) -> Vec<CalendarEvent> {
        self.store
            .events()
            .iter()
            .chain(self.school.events())
            .cloned()
            .collect()
    }

    pub fn render(&self, today: NaiveDate) -> CalendarLayout {
        render(&self.state, &self.all_events(), today)
    }

    /// Step the current date by one unit of the active view, refreshing
    /// school events when the displayed month changes.
    pub async fn navigate(&mut self, direction: i32) {
        if self.state.navigate(direction) {
            self.school.refresh(self.state.current_date).await;
        }
    }

    pub fn switch_view(&mut self, view: ViewMode) {
        self.state.switch_view(view);
    }

    pub async fn go_to_today(&mut self, today: NaiveDate) {
        if self.state.go_to_today(today) {
            self.school.refresh(today).await;
        }
    }

    // =========================================================================
    // Event form
    // =========================================================================

    pub fn open_modal(&mut self, target: ModalTarget) -> &mut EventDraft {
        self.modal.open(target)
    }

    /// The toolbar's add button opens the form on today.
    pub fn open_add_event(&mut self, today: NaiveDate) -> &mut EventDraft {
        self.modal.open(ModalTarget::for_date(today))
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    pub fn modal(&self) -> &EventModal {
        &self.modal
    }

    pub fn submit_modal(&mut self) -> GaonResult<Option<CalendarEvent>> {
        self.modal.submit(&mut self.store)
    }
}
