//! Parser for score expressions such as `"Duelist:3, Aggro:1"`.
//!
//! Grammar: `Expr := Segment (',' Segment)*` and `Segment := Category ':' Integer`.
//! A segment that fails to parse is reported on its own and never affects
//! its neighbours.

use std::num::ParseIntError;

/// One `Category:Integer` contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSegment<'a> {
    pub category: &'a str,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    #[error("empty segment")]
    Blank,
    #[error("segment '{segment}' has no ':' separator")]
    MissingSeparator { segment: String },
    #[error("segment '{segment}' has more than one ':' separator")]
    ExtraSeparator { segment: String },
    /// A segment such as `:3` is skipped rather than tallied under an empty
    /// category name.
    #[error("segment '{segment}' names no category")]
    EmptyCategory { segment: String },
    #[error("segment '{segment}' has a non-integer value")]
    InvalidPoints {
        segment: String,
        #[source]
        source: ParseIntError,
    },
}

pub fn parse_segment(raw: &str) -> Result<ScoreSegment<'_>, SegmentError> {
    let segment = raw.trim();
    if segment.is_empty() {
        return Err(SegmentError::Blank);
    }

    let (category, points) = segment
        .split_once(':')
        .ok_or_else(|| SegmentError::MissingSeparator {
            segment: segment.to_string(),
        })?;

    if points.contains(':') {
        return Err(SegmentError::ExtraSeparator {
            segment: segment.to_string(),
        });
    }

    let category = category.trim();
    if category.is_empty() {
        return Err(SegmentError::EmptyCategory {
            segment: segment.to_string(),
        });
    }

    let points = points
        .trim()
        .parse::<i64>()
        .map_err(|source| SegmentError::InvalidPoints {
            segment: segment.to_string(),
            source,
        })?;

    Ok(ScoreSegment { category, points })
}

/// Splits an expression into per-segment parse results, in source order.
pub fn segments(expression: &str) -> impl Iterator<Item = Result<ScoreSegment<'_>, SegmentError>> {
    expression.split(',').map(parse_segment)
}
