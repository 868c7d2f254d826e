//! School calendar events fetched from the portal backend.

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::event::{CalendarEvent, DEFAULT_TIME, EventOrigin, SCHOOL_COLOR};
use crate::error::GaonResult;

/// Response of `GET /school/event?month=YYYY-MM`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolEventResponse {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<SchoolEventItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolEventItem {
    pub title: String,
    /// YYYYMMDD
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SchoolEventItem {
    /// Convert to the shared event shape. Items whose start date is too short
    /// to split into year/month/day are dropped.
    pub fn to_event(&self) -> Option<CalendarEvent> {
        let d = &self.start_date;
        let (year, month, day) = (d.get(0..4)?, d.get(4..6)?, d.get(6..8)?);

        Some(CalendarEvent {
            id: format!("school_{}{}", d, self.title),
            title: self.title.clone(),
            date: format!("{year}-{month}-{day}"),
            time: DEFAULT_TIME.to_string(),
            color: SCHOOL_COLOR.to_string(),
            origin: EventOrigin::School,
        })
    }
}

/// Anything that can answer the monthly school-event query.
pub trait SchoolEventSource {
    fn fetch_month(&self, month: &str) -> impl Future<Output = GaonResult<SchoolEventResponse>> + Send;
}

/// The `month` query parameter for the month containing `date`.
pub fn month_param(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Holds the school events of the last successfully fetched month.
pub struct SchoolEventFetcher<S> {
    source: S,
    events: Vec<CalendarEvent>,
}

impl<S: SchoolEventSource> SchoolEventFetcher<S> {
    pub fn new(source: S) -> Self {
        SchoolEventFetcher {
            source,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the month containing `date`. Failures are logged and leave the
    /// current set in place; there is no retry.
    pub async fn refresh(&mut self, date: NaiveDate) {
        let month = month_param(date);
        tracing::debug!(%month, "fetching school events");

        match self.source.fetch_month(&month).await {
            Ok(SchoolEventResponse {
                items: Some(items), ..
            }) => {
                self.events = items.iter().filter_map(SchoolEventItem::to_event).collect();
                tracing::debug!(%month, count = self.events.len(), "school events loaded");
            }
            Ok(_) => {
                tracing::debug!(%month, "school event response had no items");
            }
            Err(e) => {
                tracing::warn!(%month, error = %e, "failed to fetch school events");
            }
        }
    }
}
