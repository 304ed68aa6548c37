//! Listing record structures.

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::date::first_parsable;

/// Field names used by the listing API.
pub mod fields {
    pub const SERVICE_ID: &str = "SVCID";
    pub const SERVICE_NAME: &str = "SVCNM";
    pub const STATUS: &str = "SVCSTATNM";
    pub const AREA: &str = "AREANM";
    pub const TARGET_INFO: &str = "USETGTINFO";
    pub const SERVICE_URL: &str = "SVCURL";
    pub const RESERVATION_BEGIN: &str = "RCPTBGNDT";
    pub const RESERVATION_END: &str = "RCPTENDDT";
    pub const OPEN_BEGIN: &str = "SVCOPNBGNDT";
    pub const OPEN_END: &str = "SVCOPNENDDT";
    pub const PLACE_NAME: &str = "PLACENM";
}

/// Fields kept by [`ProjectedRecord`], in output order.
pub const PROJECTED_FIELDS: [&str; 11] = [
    fields::SERVICE_ID,
    fields::SERVICE_NAME,
    fields::STATUS,
    fields::AREA,
    fields::TARGET_INFO,
    fields::SERVICE_URL,
    fields::RESERVATION_BEGIN,
    fields::RESERVATION_END,
    fields::OPEN_BEGIN,
    fields::OPEN_END,
    fields::PLACE_NAME,
];

/// Columns of the CSV summary, in output order.
pub const CSV_COLUMNS: [&str; 8] = [
    fields::SERVICE_ID,
    fields::SERVICE_NAME,
    fields::STATUS,
    fields::AREA,
    fields::TARGET_INFO,
    fields::SERVICE_URL,
    fields::RESERVATION_BEGIN,
    fields::RESERVATION_END,
];

/// Anything with reservation and opening dates can be ordered by schedule.
pub trait Scheduled {
    /// Reservation window start as sent by the API.
    fn reservation_begin(&self) -> Cow<'_, str>;

    /// Service opening start as sent by the API.
    fn open_begin(&self) -> Cow<'_, str>;

    /// Sort key: reservation start, else opening start, else sentinel-max.
    fn schedule_key(&self) -> NaiveDateTime {
        first_parsable([&*self.reservation_begin(), &*self.open_begin()])
    }
}

/// A record exactly as the listing API returned it.
///
/// The API schema is open; only a handful of fields are read downstream, and
/// missing or null fields read as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Textual value of a field.
    ///
    /// Absent, null, `false`, zero and empty arrays or objects all read as
    /// empty; `true` reads as `True`.
    pub fn text(&self, name: &str) -> Cow<'_, str> {
        match self.0.get(name) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Cow::Borrowed(""),
            Some(Value::Bool(true)) => Cow::Borrowed("True"),
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Cow::Borrowed(""),
            Some(Value::Number(n)) => Cow::Owned(n.to_string()),
            Some(Value::Array(a)) if a.is_empty() => Cow::Borrowed(""),
            Some(Value::Object(o)) if o.is_empty() => Cow::Borrowed(""),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl Scheduled for RawRecord {
    fn reservation_begin(&self) -> Cow<'_, str> {
        self.text(fields::RESERVATION_BEGIN)
    }

    fn open_begin(&self) -> Cow<'_, str> {
        self.text(fields::OPEN_BEGIN)
    }
}

/// Fixed-field view of a listing record used for the filtered outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectedRecord {
    #[serde(rename = "SVCID")]
    pub service_id: String,
    #[serde(rename = "SVCNM")]
    pub service_name: String,
    #[serde(rename = "SVCSTATNM")]
    pub status: String,
    #[serde(rename = "AREANM")]
    pub area: String,
    #[serde(rename = "USETGTINFO")]
    pub target_info: String,
    #[serde(rename = "SVCURL")]
    pub service_url: String,
    #[serde(rename = "RCPTBGNDT")]
    pub reservation_begin: String,
    #[serde(rename = "RCPTENDDT")]
    pub reservation_end: String,
    #[serde(rename = "SVCOPNBGNDT")]
    pub open_begin: String,
    #[serde(rename = "SVCOPNENDDT")]
    pub open_end: String,
    #[serde(rename = "PLACENM")]
    pub place_name: String,
}

impl ProjectedRecord {
    /// Trim a raw record down to the projected fields.
    pub fn from_raw(record: &RawRecord) -> Self {
        let get = |name: &str| record.text(name).into_owned();
        Self {
            service_id: get(fields::SERVICE_ID),
            service_name: get(fields::SERVICE_NAME),
            status: get(fields::STATUS),
            area: get(fields::AREA),
            target_info: get(fields::TARGET_INFO),
            service_url: get(fields::SERVICE_URL),
            reservation_begin: get(fields::RESERVATION_BEGIN),
            reservation_end: get(fields::RESERVATION_END),
            open_begin: get(fields::OPEN_BEGIN),
            open_end: get(fields::OPEN_END),
            place_name: get(fields::PLACE_NAME),
        }
    }

    /// Values for the CSV summary columns, in [`CSV_COLUMNS`] order.
    pub fn csv_row(&self) -> [&str; 8] {
        [
            self.service_id.as_str(),
            self.service_name.as_str(),
            self.status.as_str(),
            self.area.as_str(),
            self.target_info.as_str(),
            self.service_url.as_str(),
            self.reservation_begin.as_str(),
            self.reservation_end.as_str(),
        ]
    }
}

impl From<&RawRecord> for ProjectedRecord {
    fn from(record: &RawRecord) -> Self {
        Self::from_raw(record)
    }
}

impl Scheduled for ProjectedRecord {
    fn reservation_begin(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.reservation_begin)
    }

    fn open_begin(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.open_begin)
    }
}
