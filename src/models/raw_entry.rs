use std::collections::BTreeMap;

pub const TITLE: &str = "title";
pub const LINK: &str = "link";
pub const PUBLISHED: &str = "published";
pub const SUMMARY: &str = "summary";

/// Prefix given to fields lifted from CAP-namespaced elements.
pub const CAP_PREFIX: &str = "cap_";

pub const CAP_EVENT: &str = "cap_event";
pub const CAP_HEADLINE: &str = "cap_headline";
pub const CAP_DESCRIPTION: &str = "cap_description";
pub const CAP_INSTRUCTION: &str = "cap_instruction";
pub const CAP_SEVERITY: &str = "cap_severity";
pub const CAP_CERTAINTY: &str = "cap_certainty";
pub const CAP_URGENCY: &str = "cap_urgency";
pub const CAP_EFFECTIVE: &str = "cap_effective";
pub const CAP_EXPIRES: &str = "cap_expires";
pub const CAP_SENDER: &str = "cap_sender";
pub const CAP_AREA_DESC: &str = "cap_areadesc";
pub const CAP_AREA: &str = "cap_area";
pub const CAP_GEOCODE: &str = "cap_geocode";

/// One feed entry as a bag of named string fields.
///
/// Which fields are present depends entirely on the feed; nothing is
/// defaulted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    fields: BTreeMap<String, String>,
}

impl RawEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Copies every field of `other` into this entry, keeping existing keys.
    pub fn merge_missing(&mut self, other: RawEntry) {
        for (key, value) in other.fields {
            self.fields.entry(key).or_insert(value);
        }
    }

    /// Names of the CAP fields carried by this entry.
    pub fn cap_keys(&self) -> Vec<&str> {
        self.fields
            .keys()
            .filter(|key| key.starts_with(CAP_PREFIX))
            .map(String::as_str)
            .collect()
    }
}
