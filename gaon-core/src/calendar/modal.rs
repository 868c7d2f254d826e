//! The add-event form.

use chrono::{NaiveDate, Utc};

use crate::calendar::event::{CalendarEvent, DEFAULT_COLOR, DEFAULT_TIME, EventOrigin, format_date};
use crate::calendar::store::LocalEventStore;
use crate::error::GaonResult;

/// Date and hour a form opens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalTarget {
    pub date: String,
    pub time: String,
}

impl ModalTarget {
    pub fn new(date: NaiveDate, hour: u32) -> Self {
        ModalTarget {
            date: format_date(date),
            time: format!("{:02}", hour),
        }
    }

    /// Whole-day targets (month cells, the toolbar button) default to 09.
    pub fn for_date(date: NaiveDate) -> Self {
        ModalTarget {
            date: format_date(date),
            time: DEFAULT_TIME.to_string(),
        }
    }
}

/// Field values of an open form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub color: String,
}

impl EventDraft {
    /// Title and date must be non-empty; nothing else is checked.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.date.trim().is_empty()
    }

    fn into_event(self, id: String) -> CalendarEvent {
        CalendarEvent {
            id,
            title: self.title,
            date: self.date,
            time: self.time,
            color: self.color,
            origin: EventOrigin::Personal,
        }
    }
}

#[derive(Debug, Default)]
pub struct EventModal {
    draft: Option<EventDraft>,
}

impl EventModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with a fresh draft for `target`, discarding any previous one.
    pub fn open(&mut self, target: ModalTarget) -> &mut EventDraft {
        self.draft.insert(EventDraft {
            title: String::new(),
            date: target.date,
            time: target.time,
            color: DEFAULT_COLOR.to_string(),
        })
    }

    pub fn close(&mut self) {
        self.draft = None;
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&EventDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EventDraft> {
        self.draft.as_mut()
    }

    /// Save the open draft into `store` and close.
    ///
    /// An invalid or missing draft is a no-op: nothing is appended or written
    /// and the form stays as it was. A failed write also leaves the form open
    /// with its contents.
    pub fn submit(&mut self, store: &mut LocalEventStore) -> GaonResult<Option<CalendarEvent>> {
        let draft = match &self.draft {
            Some(draft) if draft.is_valid() => draft.clone(),
            _ => return Ok(None),
        };

        let event = draft.into_event(next_event_id());
        store.append(event.clone())?;
        self.draft = None;

        tracing::debug!(id = %event.id, date = %event.date, "event saved");
        Ok(Some(event))
    }
}

/// Millisecond timestamp ids.
fn next_event_id() -> String {
    Utc::now().timestamp_millis().to_string()
}
