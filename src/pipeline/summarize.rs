use crate::pipeline::extract::ExtractedSession;
use crate::types::activity::{ActivitySummary, LapReading};

/// Rolls one session's laps up into an activity summary.
pub fn summarize(session: ExtractedSession) -> ActivitySummary {
    let total_elapsed_seconds: f64 = session.laps.iter().map(|l| l.elapsed_seconds).sum();
    let total_distance_meters: f64 = session.laps.iter().map(|l| l.distance_meters).sum();

    let avg_pace_seconds_per_km = if total_distance_meters > 0.0 {
        total_elapsed_seconds / (total_distance_meters / 1000.0)
    } else {
        0.0
    };

    ActivitySummary {
        start_time: session.start_time,
        total_elapsed_seconds,
        total_distance_meters,
        avg_pace_seconds_per_km,
        avg_heart_rate_bpm: mean_of_present(&session.laps, |l| l.avg_heart_rate_bpm),
        avg_cadence_spm: mean_of_present(&session.laps, |l| l.avg_cadence_spm),
        laps: session.laps,
    }
}

// Unweighted mean over the laps that report the metric. Stored summaries
// were computed this way; switching to a duration-weighted mean would
// silently redefine existing data.
fn mean_of_present(laps: &[LapReading], metric: impl Fn(&LapReading) -> Option<f64>) -> Option<f64> {
    let values: Vec<f64> = laps.iter().filter_map(metric).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
