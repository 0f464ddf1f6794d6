use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{assigned_measures, data};
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewAssignedMeasure {
    pub station_id: Option<i32>,
    pub measure_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssignedMeasureResponse {
    pub id: i32,
    pub measure_id: i32,
    pub station_id: i32,
}

impl From<assigned_measures::Model> for AssignedMeasureResponse {
    fn from(a: assigned_measures::Model) -> Self {
        Self {
            id: a.id,
            measure_id: a.measure_id,
            station_id: a.station_id,
        }
    }
}

/// One timestamped reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DataPointResponse {
    pub id: i32,
    pub data_value: f64,
    pub data_time_measure: NaiveDateTime,
}

impl From<data::Model> for DataPointResponse {
    fn from(d: data::Model) -> Self {
        Self {
            id: d.id,
            data_value: d.data_value,
            data_time_measure: d.data_time_measure,
        }
    }
}

/// Most recent reading of one assigned measure. Both reading fields are
/// null when the assignment has no data yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LatestReading {
    pub data_time_measure: Option<NaiveDateTime>,
    pub data_value: Option<f64>,
    pub measure_id: i32,
    pub station_id: i32,
}

/// Parse a `YYYYMMDDHHMMSS` path segment.
///
/// # Errors
///
/// Returns `AppError::BadRequest` unless the input is exactly 14 ASCII
/// digits forming a valid calendar date and time.
pub fn parse_compact_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let invalid = || AppError::BadRequest(format!("Invalid date '{s}', expected YYYYMMDDHHMMSS"));

    if s.len() != 14 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // `%S` also admits a leap second (`60`), stored as nanoseconds past 1s
    NaiveDateTime::parse_from_str(s, "%Y%m%d%H%M%S")
        .ok()
        .filter(|t| t.nanosecond() < 1_000_000_000)
        .ok_or_else(invalid)
}
