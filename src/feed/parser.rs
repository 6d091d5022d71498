use feed_rs::model::Entry;

use crate::models::raw_entry::{RawEntry, CAP_PREFIX, LINK, PUBLISHED, SUMMARY, TITLE};

const CAP_NAMESPACE_PREFIX: &str = "urn:oasis:names:tc:emergency:cap";

/// Item elements holding the publication date, in order of preference.
const PUBLISHED_ELEMENTS: [&str; 3] = ["pubDate", "published", "updated"];

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("feed parse error: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),
}

/// Parses an RSS or Atom document into raw entries, in feed order.
///
/// Generic fields come from feed-rs. CAP elements, which feed-rs does not
/// surface, are read in a second pass over the XML and merged by position.
/// That pass also supplies `published` exactly as the feed wrote it.
pub fn parse_feed_bytes(raw: &[u8]) -> Result<Vec<RawEntry>, FeedParseError> {
    let trimmed = raw.trim_ascii_start();
    if trimmed.is_empty() {
        return Err(FeedParseError::EmptyPayload);
    }

    let feed = feed_rs::parser::parse(trimmed)?;
    let mut entries: Vec<RawEntry> = feed.entries.iter().map(entry_from_feed_rs).collect();

    match item_extensions(trimmed) {
        Some(extensions) if extensions.len() == entries.len() => {
            for (entry, extension) in entries.iter_mut().zip(extensions) {
                if let Some(published) = extension.get(PUBLISHED) {
                    entry.insert(PUBLISHED, published);
                }
                entry.merge_missing(extension);
            }
        }
        Some(extensions) => {
            log::warn!(
                "Feed has {} entries but {} item elements, skipping CAP fields",
                entries.len(),
                extensions.len()
            );
        }
        None => {}
    }

    Ok(entries)
}

fn entry_from_feed_rs(entry: &Entry) -> RawEntry {
    let mut raw = RawEntry::new();
    if let Some(title) = &entry.title {
        raw.insert(TITLE, title.content.trim());
    }
    if let Some(link) = entry.links.first() {
        raw.insert(LINK, link.href.trim());
    }
    if let Some(summary) = &entry.summary {
        raw.insert(SUMMARY, summary.content.trim());
    }
    if let Some(published) = entry.published.or(entry.updated) {
        raw.insert(PUBLISHED, published.to_rfc3339());
    }
    raw
}

/// Collects the CAP child elements and the raw publication date of every
/// `item`/`entry` element. Returns `None` when the payload is not XML
/// roxmltree accepts.
fn item_extensions(raw: &[u8]) -> Option<Vec<RawEntry>> {
    let text = match std::str::from_utf8(raw) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Feed is not valid UTF-8, skipping CAP fields: {e}");
            return None;
        }
    };
    let doc = match roxmltree::Document::parse(text) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("Unable to read CAP fields from feed: {e}");
            return None;
        }
    };

    let extensions = doc
        .descendants()
        .filter(|node| node.is_element())
        .filter(|node| matches!(node.tag_name().name(), "item" | "entry"))
        .filter(|node| !is_cap(node))
        .map(|item| {
            let mut extension = RawEntry::new();
            for child in item.children().filter(|c| c.is_element() && is_cap(c)) {
                let key = format!("{CAP_PREFIX}{}", child.tag_name().name().to_lowercase());
                let value = element_text(&child);
                let combined = match extension.get(&key) {
                    Some(existing) if !existing.is_empty() && !value.is_empty() => {
                        format!("{existing} {value}")
                    }
                    Some(existing) if value.is_empty() => existing.to_string(),
                    _ => value,
                };
                extension.insert(key, combined);
            }
            if let Some(published) = raw_published(&item) {
                extension.insert(PUBLISHED, published);
            }
            extension
        })
        .collect();

    Some(extensions)
}

fn raw_published(item: &roxmltree::Node<'_, '_>) -> Option<String> {
    PUBLISHED_ELEMENTS.iter().find_map(|name| {
        item.children()
            .find(|c| c.is_element() && !is_cap(c) && c.tag_name().name() == *name)
            .map(|node| element_text(&node))
    })
}

fn is_cap(node: &roxmltree::Node<'_, '_>) -> bool {
    node.tag_name()
        .namespace()
        .is_some_and(|ns| ns.starts_with(CAP_NAMESPACE_PREFIX))
}

/// Trimmed text of every descendant text node, joined with single spaces.
fn element_text(node: &roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
