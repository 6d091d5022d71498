use std::{sync::Arc, time::Duration};

use crate::{
    config::FilterConfig,
    errors::RefreshError,
    pipeline::{refresh_once, DataSource, PresentationSink},
};

/// Refreshes forever, sleeping `interval` between cycles. A failed cycle
/// leaves the last published result in place.
pub async fn start(
    source: Arc<dyn DataSource>,
    sink: Arc<dyn PresentationSink>,
    config: FilterConfig,
    interval: Duration,
) {
    log::info!(
        "Polling {} every {}s, area filter: '{}'",
        source.describe(),
        interval.as_secs(),
        config.area()
    );
    loop {
        match refresh_once(source.as_ref(), sink.as_ref(), &config).await {
            Ok(count) => {
                log::info!("Found {count} active warnings");
            }
            Err(RefreshError::Fetch(e)) if e.is_timeout() => {
                log::warn!("Timed out fetching {}, keeping previous warnings", source.describe());
            }
            Err(e) => {
                log::error!("Error fetching FMI weather warnings: {e}");
            }
        }
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        feed::fetcher::FetchError,
        models::raw_entry::{RawEntry, CAP_AREA_DESC, TITLE},
        state::SnapshotStore,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Succeeds on the first call, fails on every later one.
    struct FlakySource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DataSource for FlakySource {
        async fn fetch_raw_entries(&self) -> Result<Vec<RawEntry>, RefreshError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(vec![RawEntry::new()
                    .with(TITLE, "Wind warning")
                    .with(CAP_AREA_DESC, "Uusimaa")])
            } else {
                Err(FetchError::HttpStatus(502).into())
            }
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failed_cycles_keep_last_snapshot() {
        let source = Arc::new(FlakySource {
            calls: AtomicUsize::new(0),
        });
        let store = SnapshotStore::new();
        let task = tokio::spawn(start(
            source.clone(),
            Arc::new(store.clone()),
            FilterConfig::new("Uusimaa"),
            Duration::from_secs(300),
        ));

        // let the first cycles run on paused time
        for _ in 0..3 {
            tokio::time::sleep(Duration::from_secs(301)).await;
        }

        assert!(source.calls.load(Ordering::SeqCst) >= 3);
        assert_eq!(store.active_warnings().await, 1);
        task.abort();
    }
}
