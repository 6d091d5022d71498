//! One-shot inspection of the live feed, used by the `check` command.

use serde::Serialize;

use crate::{
    alerts::{extract, match_area},
    models::{alert::AlertRecord, raw_entry::RawEntry},
};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AlertExplanation {
    pub title: String,
    pub area: String,
    pub structured_area: bool,
    pub matches: Vec<AreaVerdict>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AreaVerdict {
    pub area: String,
    pub matched: bool,
    pub reason: String,
}

/// For every entry, reports how each candidate area would be matched.
pub fn explain(entries: &[RawEntry], areas: &[String]) -> Vec<AlertExplanation> {
    entries
        .iter()
        .map(extract)
        .map(|record| explain_record(&record, areas))
        .collect()
}

fn explain_record(record: &AlertRecord, areas: &[String]) -> AlertExplanation {
    let matches = areas
        .iter()
        .map(|area| match match_area(record, area) {
            Some(reason) => AreaVerdict {
                area: area.clone(),
                matched: true,
                reason: reason.to_string(),
            },
            None => AreaVerdict {
                area: area.clone(),
                matched: false,
                reason: "no_match".to_string(),
            },
        })
        .collect();

    AlertExplanation {
        title: record.title.clone(),
        area: record.area.text().to_string(),
        structured_area: record.area.is_structured(),
        matches,
    }
}
