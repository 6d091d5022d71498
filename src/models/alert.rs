use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Where an alert's area text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertArea {
    /// Joined CAP area fields (area description, area, geocode).
    Structured(String),
    /// Lower-cased `title summary`, used when the entry had no area fields.
    FallbackCombinedText(String),
}

impl AlertArea {
    pub fn text(&self) -> &str {
        match self {
            AlertArea::Structured(text) | AlertArea::FallbackCombinedText(text) => text,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, AlertArea::Structured(_))
    }
}

impl Default for AlertArea {
    fn default() -> Self {
        AlertArea::Structured(String::new())
    }
}

// Consumers see a plain string attribute, as the sensor always exposed it.
impl Serialize for AlertArea {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertRecord {
    pub title: String,
    pub link: String,
    pub published: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certainty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    pub area: AlertArea,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
}

/// Filtered alerts of one refresh. `count` is derived from `records` and
/// cannot drift from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshResult {
    records: Vec<AlertRecord>,
    count: usize,
}

impl RefreshResult {
    pub fn new(records: Vec<AlertRecord>) -> Self {
        let count = records.len();
        Self { records, count }
    }

    pub fn records(&self) -> &[AlertRecord] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// The latest published result and when it was published.
#[derive(Debug, Clone, Serialize)]
pub struct AlertSnapshot {
    pub result: RefreshResult,
    pub updated_at: DateTime<Utc>,
}

impl AlertSnapshot {
    pub fn new(result: RefreshResult) -> Self {
        Self {
            result,
            updated_at: Utc::now(),
        }
    }

    pub fn age_seconds(&self) -> i64 {
        (Utc::now() - self.updated_at).num_seconds().max(0)
    }
}
