//! The calendar / scheduler widget.

pub mod event;
pub mod modal;
pub mod render;
pub mod school;
pub mod store;
pub mod view;
pub mod widget;

pub use event::{CalendarEvent, EventOrigin};
pub use modal::{EventDraft, EventModal, ModalTarget};
pub use render::{CalendarLayout, LayoutBody, render};
pub use school::{SchoolEventFetcher, SchoolEventSource};
pub use store::LocalEventStore;
pub use view::{ViewMode, ViewState};
pub use widget::CalendarWidget;
