//! Fetch → extract → filter → publish, with the host-facing ends behind
//! traits so the core runs without a network or a server.

use async_trait::async_trait;
use std::time::Instant;

use crate::{
    alerts::{extract, filter},
    config::FilterConfig,
    errors::RefreshError,
    models::{alert::RefreshResult, raw_entry::RawEntry},
    observability,
};

/// Where raw feed entries come from.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_raw_entries(&self) -> Result<Vec<RawEntry>, RefreshError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Where each new result goes.
#[async_trait]
pub trait PresentationSink: Send + Sync {
    async fn publish(&self, result: RefreshResult);
}

/// Runs extraction and area filtering over one batch of entries.
pub fn process(entries: &[RawEntry], config: &FilterConfig) -> RefreshResult {
    let records = entries.iter().map(extract).collect::<Vec<_>>();
    let total = records.len();
    let result = filter(records, config.area());

    log::debug!(
        "Total warnings found: {}, after filtering: {}, configured area: '{}'",
        total,
        result.count(),
        config.area()
    );
    result
}

/// One refresh cycle. On error nothing is published, so the sink keeps
/// whatever it had.
pub async fn refresh_once<S, P>(
    source: &S,
    sink: &P,
    config: &FilterConfig,
) -> Result<usize, RefreshError>
where
    S: DataSource + ?Sized,
    P: PresentationSink + ?Sized,
{
    let started = Instant::now();
    let entries = source.fetch_raw_entries().await?;
    let result = process(&entries, config);
    let count = result.count();

    observability::log_refresh(
        &source.describe(),
        entries.len(),
        count,
        started.elapsed().as_millis() as u64,
    );
    sink.publish(result).await;
    Ok(count)
}
