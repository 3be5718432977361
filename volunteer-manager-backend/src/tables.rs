use chrono::NaiveDate;
use serde::Serialize;
use volunteer_manager_database::models::EventRow;

/// The event as exposed to templates and JSON clients, without the internal id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub slug: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<&EventRow> for EventSummary {
    fn from(row: &EventRow) -> Self {
        Self {
            slug: row.slug.clone(),
            name: row.name.clone(),
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}
