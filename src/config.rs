use std::{env, time::Duration};

use crate::{errors::ConfigError, feed::FMI_RSS_FEED};

/// Seconds between refreshes.
pub const DEFAULT_SCAN_INTERVAL: u64 = 300;
/// Seconds allowed for one feed download.
pub const DEFAULT_FETCH_TIMEOUT: u64 = 30;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

const DEFAULT_INSTANCE: &str = "all_finland";

/// The area filter of one configured instance. Set once, never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    area: String,
    display_area: String,
}

impl FilterConfig {
    pub fn new(area: &str) -> Self {
        let display_area = area.trim().to_string();
        Self {
            area: display_area.to_lowercase(),
            display_area,
        }
    }

    /// Lower-cased area, empty for "no filter".
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Stable identifier, e.g. `fmi_warnings_helsinki` or
    /// `fmi_warnings_all_finland`.
    pub fn instance_id(&self) -> String {
        let area = if self.area.is_empty() {
            DEFAULT_INSTANCE.to_string()
        } else {
            self.area.replace(' ', "_")
        };
        format!("fmi_warnings_{area}")
    }

    pub fn display_name(&self) -> String {
        if self.display_area.is_empty() {
            "FMI Weather Warnings".to_string()
        } else {
            format!("FMI Weather Warnings - {}", self.display_area)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub area: String,
    pub feed_url: String,
    pub scan_interval: Duration,
    pub fetch_timeout: Duration,
    pub bind_address: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let area = match lookup("FMI_AREA") {
            Some(area) => {
                log::info!("Using area filter from FMI_AREA: {area}");
                area
            }
            None => {
                log::info!("No FMI_AREA set, showing warnings for all of Finland");
                String::new()
            }
        };
        let feed_url = match lookup("FMI_FEED_URL") {
            Some(url) => {
                log::info!("Using feed URL from FMI_FEED_URL: {url}");
                url
            }
            None => FMI_RSS_FEED.to_string(),
        };
        let scan_interval =
            Duration::from_secs(parse_or("FMI_SCAN_INTERVAL", &lookup, DEFAULT_SCAN_INTERVAL)?);
        let fetch_timeout =
            Duration::from_secs(parse_or("FMI_FETCH_TIMEOUT", &lookup, DEFAULT_FETCH_TIMEOUT)?);
        let bind_address =
            lookup("FMI_BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let port = parse_or("FMI_PORT", &lookup, DEFAULT_PORT)?;

        if scan_interval.is_zero() {
            return Err(ConfigError::invalid("FMI_SCAN_INTERVAL", "0", "must be positive"));
        }

        Ok(AppConfig {
            area,
            feed_url,
            scan_interval,
            fetch_timeout,
            bind_address,
            port,
        })
    }

    pub fn filter(&self) -> FilterConfig {
        FilterConfig::new(&self.area)
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let value = raw
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::invalid(key, &raw, e))?;
            log::info!("Using {key}: {value}");
            Ok(value)
        }
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.area, "");
        assert_eq!(config.feed_url, FMI_RSS_FEED);
        assert_eq!(config.scan_interval, Duration::from_secs(300));
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FMI_AREA", "Helsinki"),
            ("FMI_SCAN_INTERVAL", "60"),
            ("FMI_PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.area, "Helsinki");
        assert_eq!(config.scan_interval, Duration::from_secs(60));
        assert_eq!(config.port, 9000);
        assert_eq!(config.filter().area(), "helsinki");
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = AppConfig::from_lookup(lookup_from(&[("FMI_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "FMI_PORT"));

        let err = AppConfig::from_lookup(lookup_from(&[("FMI_SCAN_INTERVAL", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "FMI_SCAN_INTERVAL"));
    }

    #[test]
    fn filter_area_is_lower_cased_once() {
        let filter = FilterConfig::new("Etelä-Savo");
        assert_eq!(filter.area(), "etelä-savo");
        assert_eq!(FilterConfig::new("  ").area(), "");
    }

    #[test]
    fn instance_identity() {
        assert_eq!(FilterConfig::new("").instance_id(), "fmi_warnings_all_finland");
        assert_eq!(FilterConfig::new("").display_name(), "FMI Weather Warnings");

        let filter = FilterConfig::new("Kanta Häme");
        assert_eq!(filter.instance_id(), "fmi_warnings_kanta_häme");
        assert_eq!(filter.display_name(), "FMI Weather Warnings - Kanta Häme");
    }
}
