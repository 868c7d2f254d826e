//! User-created events persisted under a single storage key.

use crate::calendar::event::CalendarEvent;
use crate::error::GaonResult;
use crate::storage::{EVENTS_KEY, SharedStorage, load_json, save_json};

/// The locally stored event list. Load and append only.
pub struct LocalEventStore {
    storage: SharedStorage,
    events: Vec<CalendarEvent>,
}

impl LocalEventStore {
    /// Read the stored list; a missing or malformed entry starts empty.
    pub fn load(storage: SharedStorage) -> Self {
        let events = load_json(storage.as_ref(), EVENTS_KEY).unwrap_or_default();
        LocalEventStore { storage, events }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Append and write the whole list back. The in-memory list only changes
    /// once the write succeeds.
    pub fn append(&mut self, event: CalendarEvent) -> GaonResult<()> {
        let mut events = self.events.clone();
        events.push(event);
        save_json(self.storage.as_ref(), EVENTS_KEY, &events)?;
        self.events = events;
        Ok(())
    }
}
