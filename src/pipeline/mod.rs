mod extract;
mod summarize;
mod xml;

use crate::error::ParseError;
use crate::types::activity::ActivitySummary;

/// Parses one workout export into activity summaries, in document order.
///
/// A document with no recognizable sessions yields an empty vec, not an
/// error. Malformed markup or an unreadable required lap field aborts the
/// whole call with no partial result.
pub fn parse(bytes: &[u8]) -> Result<Vec<ActivitySummary>, ParseError> {
    let doc = xml::load(bytes)?;
    let sessions = extract::extract(&doc)?;
    Ok(sessions.into_iter().map(summarize::summarize).collect())
}
