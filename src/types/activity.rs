use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed lap segment. Optional fields are `None` when the device
/// recorded no value through any known source, never zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapReading {
    pub lap_number: u32,
    pub elapsed_seconds: f64,
    pub distance_meters: f64,
    /// Zero when the lap covered no distance.
    pub pace_seconds_per_km: f64,
    pub avg_heart_rate_bpm: Option<f64>,
    pub max_heart_rate_bpm: Option<f64>,
    pub avg_cadence_spm: Option<f64>,
}

/// One workout session, with its laps in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub start_time: DateTime<Utc>,
    pub total_elapsed_seconds: f64,
    pub total_distance_meters: f64,
    /// Zero when the session covered no distance.
    pub avg_pace_seconds_per_km: f64,
    /// Unweighted mean over the laps that report heart rate.
    pub avg_heart_rate_bpm: Option<f64>,
    /// Unweighted mean over the laps that report cadence.
    pub avg_cadence_spm: Option<f64>,
    pub laps: Vec<LapReading>,
}
