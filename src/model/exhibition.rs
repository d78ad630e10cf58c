use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Id, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    pub id: Id,
    pub title: String,
    pub title_en: String,
    pub venue: String,
    pub location: String,
    pub location_en: String,
    pub start_date: String, // ISO 8601 date
    pub end_date: String,   // ISO 8601 date
    pub description: String,
    pub description_en: String,
    pub image_url: String,
}

impl Exhibition {
    /// An exhibition is current until the end of its last day (UTC).
    /// Unparseable end dates are never current.
    pub fn is_current_at(&self, now: DateTime<Utc>) -> bool {
        parse_calendar_date(&self.end_date)
            .map(|end| end >= now.date_naive())
            .unwrap_or(false)
    }
}

impl Record for Exhibition {
    const KIND: &'static str = "Exhibition";
    const FILE_NAME: &'static str = "exhibitions.json";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Parse either a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}
