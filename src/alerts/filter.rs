use std::fmt;

use crate::models::alert::{AlertRecord, RefreshResult};

/// Finnish case endings removed from the configured area, tried in order.
pub const STRIPPED_SUFFIXES: [&str; 14] = [
    "n", "ssa", "ssä", "sta", "stä", "an", "än", "la", "lä", "lla", "llä", "lta", "ltä", "lle",
];

/// Finnish case endings appended to the configured area, tried in order.
pub const APPENDED_SUFFIXES: [&str; 8] = ["ssa", "ssä", "sta", "stä", "an", "än", "la", "lä"];

/// Shortest stem left behind after stripping a suffix.
const MIN_STEM_CHARS: usize = 3;

/// Why a record was kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaMatch {
    /// The record has no text at all to test against.
    VacuousContent,
    Direct,
    StrippedVariant(String),
    AppendedVariant(String),
}

impl fmt::Display for AreaMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaMatch::VacuousContent => write!(f, "no_content"),
            AreaMatch::Direct => write!(f, "direct_match"),
            AreaMatch::StrippedVariant(variant) => write!(f, "stripped_variant: {variant}"),
            AreaMatch::AppendedVariant(variant) => write!(f, "appended_variant: {variant}"),
        }
    }
}

/// Keeps the records whose text mentions `configured_area`, in feed order.
/// An empty area keeps everything.
pub fn filter(records: Vec<AlertRecord>, configured_area: &str) -> RefreshResult {
    if configured_area.is_empty() {
        return RefreshResult::new(records);
    }

    let area = configured_area.to_lowercase();
    let variants = area_variants(&area);
    log::debug!("Trying area variants: {variants:?}");

    let matched = records
        .into_iter()
        .filter(|record| match match_with_variants(record, &area, &variants) {
            Some(reason) => {
                log::debug!("Area match ({reason}), including: {}", record.title);
                true
            }
            None => {
                log::debug!("Filtered out warning (no area match): {}", record.title);
                false
            }
        })
        .collect();

    RefreshResult::new(matched)
}

/// Decides whether a single record matches `configured_area`, and how.
///
/// An empty area matches every record directly.
pub fn match_area(record: &AlertRecord, configured_area: &str) -> Option<AreaMatch> {
    let area = configured_area.to_lowercase();
    match_with_variants(record, &area, &area_variants(&area))
}

/// Candidate spellings of an already lower-cased area: suffix-stripped forms
/// first, then suffix-appended forms, without duplicates and without the
/// area itself.
pub fn area_variants(area: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    let mut push = |candidate: String| {
        if candidate != area && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    };

    let area_chars = area.chars().count();
    for suffix in STRIPPED_SUFFIXES {
        if let Some(stem) = area.strip_suffix(suffix) {
            if area_chars >= suffix.chars().count() + MIN_STEM_CHARS {
                push(stem.to_string());
            }
        }
    }
    for suffix in APPENDED_SUFFIXES {
        push(format!("{area}{suffix}"));
    }

    variants
}

fn match_with_variants(
    record: &AlertRecord,
    area: &str,
    variants: &[String],
) -> Option<AreaMatch> {
    if record.area.text().is_empty() && record.title.is_empty() && record.summary.is_empty() {
        return Some(AreaMatch::VacuousContent);
    }

    let search_text = format!(
        "{} {} {}",
        record.area.text().to_lowercase(),
        record.title.to_lowercase(),
        record.summary.to_lowercase()
    );

    if search_text.contains(area) {
        return Some(AreaMatch::Direct);
    }

    variants
        .iter()
        .find(|variant| search_text.contains(variant.as_str()))
        .map(|variant| {
            if area.len() > variant.len() {
                AreaMatch::StrippedVariant(variant.clone())
            } else {
                AreaMatch::AppendedVariant(variant.clone())
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alert::AlertArea;

    fn record(area: &str, title: &str, summary: &str) -> AlertRecord {
        AlertRecord {
            title: title.to_string(),
            summary: summary.to_string(),
            area: AlertArea::Structured(area.to_string()),
            ..Default::default()
        }
    }

    fn sample_warnings() -> Vec<AlertRecord> {
        vec![
            record(
                "Uusimaa",
                "Weather warning for Uusimaa",
                "Strong winds expected in the region",
            ),
            record(
                "Southern Finland",
                "Snow warning",
                "Heavy snowfall expected in Helsinki, Espoo, and surrounding areas",
            ),
            record("", "Ice warning", "Slippery conditions in Turku and nearby municipalities"),
            record("Lappi", "Wind warning", "Strong winds in northern Finland"),
            record("Helsingin seutu", "Temperature warning", "Very cold weather expected"),
        ]
    }

    fn titles(result: &RefreshResult) -> Vec<&str> {
        result.records().iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn empty_area_is_identity() {
        let records = sample_warnings();
        let result = filter(records.clone(), "");
        assert_eq!(result.records(), records.as_slice());
        assert_eq!(result.count(), records.len());
    }

    #[test]
    fn count_matches_filtered_length() {
        for area in ["helsinki", "uusimaa", "turku", "lapland", "lappi", "oulu"] {
            let result = filter(sample_warnings(), area);
            assert_eq!(result.count(), result.records().len(), "area {area}");
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        for area in ["Helsinki", "Lappi", "helsingissä", "Turku"] {
            let once = filter(sample_warnings(), area);
            let twice = filter(once.records().to_vec(), area);
            assert_eq!(once, twice, "area {area}");
        }
    }

    #[test]
    fn vacuous_record_is_always_included() {
        let empty = record("", "", "");
        for area in ["helsinki", "lappi", "x"] {
            let result = filter(vec![empty.clone()], area);
            assert_eq!(result.count(), 1, "area {area}");
        }
        assert_eq!(match_area(&empty, "oulu"), Some(AreaMatch::VacuousContent));
    }

    #[test]
    fn whitespace_only_text_is_not_vacuous() {
        // an entry with no fields at all falls back to a single space
        let fallback = AlertRecord {
            area: AlertArea::FallbackCombinedText(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(match_area(&fallback, "oulu"), None);
        assert_eq!(filter(vec![fallback], "helsinki").count(), 0);

        let spaces = record("  ", "", "");
        assert_eq!(match_area(&spaces, "helsinki"), None);
    }

    #[test]
    fn lapland_does_not_match_lappi() {
        let lappi = record("Lappi", "", "");
        assert_eq!(match_area(&lappi, "Lapland"), None);
        assert_eq!(match_area(&lappi, "Lappi"), Some(AreaMatch::Direct));
    }

    #[test]
    fn province_name_matches_directly() {
        let uusimaa = record("Uusimaa", "", "");
        assert_eq!(match_area(&uusimaa, "Uusimaa"), Some(AreaMatch::Direct));
    }

    #[test]
    fn title_text_matches_directly() {
        let snow = record("", "Heavy snowfall expected in Helsinki", "");
        assert_eq!(match_area(&snow, "Helsinki"), Some(AreaMatch::Direct));
    }

    #[test]
    fn stripped_variant_matches_inflected_area() {
        let seutu = record("Helsingin seutu", "", "");
        assert_eq!(
            match_area(&seutu, "Helsingissä"),
            Some(AreaMatch::StrippedVariant("helsingi".to_string()))
        );

        let inessive = record("", "Tuulivaroitus Helsingissä", "");
        assert_eq!(
            match_area(&inessive, "helsingin"),
            Some(AreaMatch::StrippedVariant("helsingi".to_string()))
        );
    }

    #[test]
    fn inflected_text_already_contains_bare_stem() {
        let elative = record("Porista ja Raumalta", "", "");
        assert_eq!(match_area(&elative, "pori"), Some(AreaMatch::Direct));
        assert!(area_variants("pori").contains(&"porista".to_string()));
    }

    #[test]
    fn short_stems_are_not_stripped() {
        // "ian" minus "an" would leave a single character
        assert!(!area_variants("ian").contains(&"i".to_string()));
        // "sala" minus "la" leaves "sa", still too short
        assert!(!area_variants("sala").contains(&"sa".to_string()));
        // "salla" minus "la" leaves "sal"
        assert!(area_variants("salla").contains(&"sal".to_string()));
    }

    #[test]
    fn stem_length_counts_characters_not_bytes() {
        // "äänä" + "n": four characters remain
        assert!(area_variants("äänän").contains(&"äänä".to_string()));
        // "ää" + "stä" leaves two characters
        assert!(!area_variants("äästä").contains(&"ää".to_string()));
    }

    #[test]
    fn variants_are_ordered_and_deduplicated() {
        assert_eq!(
            area_variants("kuopiossa"),
            vec![
                "kuopio".to_string(),
                "kuopiossassa".to_string(),
                "kuopiossassä".to_string(),
                "kuopiossasta".to_string(),
                "kuopiossastä".to_string(),
                "kuopiossaan".to_string(),
                "kuopiossaän".to_string(),
                "kuopiossala".to_string(),
                "kuopiossalä".to_string(),
            ]
        );

        // "n" and "an" both strip from the same word
        let variants = area_variants("kajaanlan");
        let unique: std::collections::HashSet<_> = variants.iter().collect();
        assert_eq!(unique.len(), variants.len());
    }

    #[test]
    fn preserves_feed_order() {
        let x = record("Helsinki", "X", "");
        let y = record("Oulu", "Y", "");
        let z = record("", "Z", "frost in helsinki");
        let result = filter(vec![x, y, z], "Helsinki");
        assert_eq!(titles(&result), vec!["X", "Z"]);
    }

    #[test]
    fn sample_feed_matches_expected_warnings() {
        let helsinki = filter(sample_warnings(), "Helsinki");
        assert_eq!(titles(&helsinki), vec!["Snow warning"]);

        let turku = filter(sample_warnings(), "Turku");
        assert_eq!(titles(&turku), vec!["Ice warning"]);

        let lapland = filter(sample_warnings(), "Lapland");
        assert_eq!(lapland.count(), 0);

        let lappi = filter(sample_warnings(), "Lappi");
        assert_eq!(titles(&lappi), vec!["Wind warning"]);
    }

    #[test]
    fn configured_area_is_lower_cased() {
        let result = filter(vec![record("uusimaa", "", "")], "UUSIMAA");
        assert_eq!(result.count(), 1);
    }
}
