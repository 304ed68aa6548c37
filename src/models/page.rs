//! Listing API page envelope.

use serde_json::Value;

use super::RawRecord;

/// Key holding the declared total inside the wrapper object.
const TOTAL_COUNT_KEY: &str = "list_total_count";
/// Key holding the record array inside the wrapper object.
const ROW_KEY: &str = "row";
/// Top-level status object sent instead of the wrapper on API errors.
const RESULT_KEY: &str = "RESULT";

/// One page of the listing response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPage {
    /// Total number of records declared by the API (0 if absent).
    pub total_count: usize,
    /// Records on this page.
    pub rows: Vec<RawRecord>,
}

/// Status code and message from a top-level `RESULT` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult {
    pub code: String,
    pub message: String,
}

impl ListingPage {
    /// Extract a page from a decoded response body.
    ///
    /// A missing wrapper or a missing/empty `row` array is not an error; it
    /// produces a page with no rows and whatever total was declared.
    pub fn from_json(body: &Value, wrapper_key: &str) -> Self {
        let Some(wrapper) = body.get(wrapper_key).and_then(Value::as_object) else {
            return Self::default();
        };

        let total_count = wrapper
            .get(TOTAL_COUNT_KEY)
            .and_then(parse_count)
            .unwrap_or(0);

        let rows = wrapper
            .get(ROW_KEY)
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(Value::as_object)
                    .cloned()
                    .map(RawRecord::from)
                    .collect()
            })
            .unwrap_or_default();

        Self { total_count, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ApiResult {
    /// Read the top-level `RESULT` object, if the API sent one.
    pub fn from_json(body: &Value) -> Option<Self> {
        let result = body.get(RESULT_KEY)?.as_object()?;
        let field = |name: &str| {
            result
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Some(Self {
            code: field("CODE"),
            message: field("MESSAGE"),
        })
    }
}

/// Accept integer or numeric-string totals; anything else is unknown.
fn parse_count(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
