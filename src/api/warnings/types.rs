use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    config::FilterConfig,
    models::alert::{AlertRecord, AlertSnapshot},
};

pub const SENSOR_NAME: &str = "Active warnings";
pub const SENSOR_ICON: &str = "mdi:alert";
pub const MANUFACTURER: &str = "Finnish Meteorological Institute";
pub const MODEL: &str = "Weather Warnings";

/// The warnings snapshot shaped like a host-platform sensor: a numeric state
/// plus an attribute map.
#[derive(Debug, Serialize)]
pub struct SensorView<'a> {
    pub unique_id: String,
    pub name: &'static str,
    pub icon: &'static str,
    pub state: usize,
    pub attributes: SensorAttributes<'a>,
    pub device: DeviceInfo,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SensorAttributes<'a> {
    pub area: &'a str,
    pub warnings: &'a [AlertRecord],
}

#[derive(Debug, Serialize)]
pub struct DeviceInfo {
    pub identifier: String,
    pub name: String,
    pub manufacturer: &'static str,
    pub model: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub active_warnings: usize,
}

impl<'a> SensorView<'a> {
    pub fn new(filter: &'a FilterConfig, snapshot: &'a AlertSnapshot) -> Self {
        let instance_id = filter.instance_id();
        SensorView {
            unique_id: format!("{instance_id}_active_warnings"),
            name: SENSOR_NAME,
            icon: SENSOR_ICON,
            state: snapshot.result.count(),
            attributes: SensorAttributes {
                area: filter.area(),
                warnings: snapshot.result.records(),
            },
            device: DeviceInfo {
                identifier: instance_id,
                name: filter.display_name(),
                manufacturer: MANUFACTURER,
                model: MODEL,
            },
            last_updated: snapshot.updated_at,
        }
    }
}
