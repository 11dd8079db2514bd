use crate::error::ParseError;
use crate::pipeline::xml::Element;
use crate::types::activity::LapReading;
use chrono::{DateTime, NaiveDateTime, Utc};

pub const TCX_NS: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2";
pub const ACTIVITY_EXT_NS: &str = "http://www.garmin.com/xmlschemas/ActivityExtension/v2";

/// One session's raw extraction result, before aggregation.
#[derive(Debug, Clone)]
pub struct ExtractedSession {
    pub start_time: DateTime<Utc>,
    pub laps: Vec<LapReading>,
}

type MetricPath = &'static [(&'static str, &'static str)];

// Priority-ordered source locations per optional metric. The first path
// that yields a parseable value wins; adding another vendor extension is a
// new row here, not new control flow.
const AVG_HR_SOURCES: &[MetricPath] = &[&[(TCX_NS, "AverageHeartRateBpm"), (TCX_NS, "Value")]];
const MAX_HR_SOURCES: &[MetricPath] = &[&[(TCX_NS, "MaximumHeartRateBpm"), (TCX_NS, "Value")]];
const CADENCE_SOURCES: &[MetricPath] = &[
    &[(TCX_NS, "Cadence")],
    &[
        (TCX_NS, "Extensions"),
        (ACTIVITY_EXT_NS, "LX"),
        (ACTIVITY_EXT_NS, "AvgRunCadence"),
    ],
];

/// Pulls every recognizable session out of the document, in document order.
///
/// A session without a usable start timestamp is skipped; a lap missing a
/// required numeric field aborts the whole parse.
pub fn extract(doc: &Element) -> Result<Vec<ExtractedSession>, ParseError> {
    let mut sessions = Vec::new();

    let Some(list) = doc.child(TCX_NS, "Activities") else {
        return Ok(sessions);
    };

    for activity in list.children_named(TCX_NS, "Activity") {
        let Some(start_time) = activity
            .child(TCX_NS, "Id")
            .and_then(|id| parse_start_time(id.text()))
        else {
            continue;
        };

        let mut laps = Vec::new();
        for (index, lap) in activity.children_named(TCX_NS, "Lap").enumerate() {
            laps.push(read_lap(lap, index as u32 + 1)?);
        }

        sessions.push(ExtractedSession { start_time, laps });
    }

    Ok(sessions)
}

fn read_lap(lap: &Element, lap_number: u32) -> Result<LapReading, ParseError> {
    let elapsed_seconds = required_f64(lap, "TotalTimeSeconds")?;
    let distance_meters = required_f64(lap, "DistanceMeters")?;

    let pace_seconds_per_km = if distance_meters > 0.0 {
        elapsed_seconds / (distance_meters / 1000.0)
    } else {
        0.0
    };

    Ok(LapReading {
        lap_number,
        elapsed_seconds,
        distance_meters,
        pace_seconds_per_km,
        avg_heart_rate_bpm: resolve_metric(lap, AVG_HR_SOURCES),
        max_heart_rate_bpm: resolve_metric(lap, MAX_HR_SOURCES),
        avg_cadence_spm: resolve_metric(lap, CADENCE_SOURCES),
    })
}

fn required_f64(lap: &Element, name: &str) -> Result<f64, ParseError> {
    let element = lap.child(TCX_NS, name).ok_or_else(|| {
        ParseError::MalformedDocument(format!("lap is missing required field {name}"))
    })?;
    element.text().parse().map_err(|_| {
        ParseError::MalformedDocument(format!("lap field {name} is not a number"))
    })
}

fn resolve_metric(lap: &Element, sources: &[MetricPath]) -> Option<f64> {
    sources
        .iter()
        .find_map(|path| lap.find(path).and_then(|el| el.text().parse().ok()))
}

fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    // Some exports omit the zone designator; treat those as UTC.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|t| t.and_utc())
}
