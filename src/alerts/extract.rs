use crate::models::{
    alert::{AlertArea, AlertRecord},
    raw_entry::*,
};

/// Area-like fields in priority order.
const AREA_FIELDS: [&str; 3] = [CAP_AREA_DESC, CAP_AREA, CAP_GEOCODE];

/// Normalizes one raw feed entry into an alert record.
pub fn extract(entry: &RawEntry) -> AlertRecord {
    let text = |key: &str| entry.get(key).unwrap_or_default().to_string();
    let optional = |key: &str| entry.get(key).map(str::to_string);

    let title = text(TITLE);
    let summary = text(SUMMARY);
    log::debug!("Parsing entry: {title}");

    let cap_keys = entry.cap_keys();
    if !cap_keys.is_empty() {
        log::debug!("Available CAP fields: {cap_keys:?}");
    }

    let area = derive_area(entry, &title, &summary);

    AlertRecord {
        link: text(LINK),
        published: text(PUBLISHED),
        event: optional(CAP_EVENT),
        headline: optional(CAP_HEADLINE),
        description: optional(CAP_DESCRIPTION),
        instruction: optional(CAP_INSTRUCTION),
        severity: optional(CAP_SEVERITY),
        certainty: optional(CAP_CERTAINTY),
        urgency: optional(CAP_URGENCY),
        effective: optional(CAP_EFFECTIVE),
        expires: optional(CAP_EXPIRES),
        sender: optional(CAP_SENDER),
        title,
        summary,
        area,
    }
}

fn derive_area(entry: &RawEntry, title: &str, summary: &str) -> AlertArea {
    let present: Vec<&str> = AREA_FIELDS
        .iter()
        .filter_map(|key| entry.get(key))
        .collect();

    if present.is_empty() {
        // no structured area, so search the entry's own text instead
        return AlertArea::FallbackCombinedText(format!(
            "{} {}",
            title.to_lowercase(),
            summary.to_lowercase()
        ));
    }

    let joined = present
        .into_iter()
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    AlertArea::Structured(joined)
}
