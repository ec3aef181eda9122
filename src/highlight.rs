//! Annotation filtering and text-span highlighting.
//!
//! Given a document and the active filter, this module selects the
//! matching LM annotations, resolves their overlapping source/target
//! spans into a non-overlapping ordered segment sequence, and renders
//! the segments as class-tagged HTML spans.
//!
//! Overlapping source/target intervals are not merged: the compression
//! step only drops segments that share an exact start offset with the
//! previous one, so visually adjacent or overlapping spans may still
//! render with truncated boundaries. That is accepted behavior.

use serde::Serialize;

use crate::models::{Document, LmAnnotation};
use crate::search::LmFilter;
use crate::utils::html_escape;

/// Highlight role of a text interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    Source,
    Target,
}

/// A half-open `[start, end)` character interval to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub kind: HighlightKind,
    pub start: usize,
    pub end: usize,
}

/// A contiguous run of document text, either plain or tagged with a
/// highlight role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<HighlightKind>,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Sort annotations by score descending. The sort is stable, so ties
/// keep their original order.
pub fn highest<'a>(lms: &[&'a LmAnnotation]) -> Vec<&'a LmAnnotation> {
    let mut sorted = lms.to_vec();
    sorted.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Collect source/target intervals from the given annotations, sorted by
/// start offset ascending (stable).
pub fn collect_intervals(lms: &[&LmAnnotation]) -> Vec<Interval> {
    let mut intervals = Vec::with_capacity(lms.len() * 2);
    for lm in lms {
        intervals.push(Interval {
            kind: HighlightKind::Source,
            start: lm.source.start,
            end: lm.source.end,
        });
        intervals.push(Interval {
            kind: HighlightKind::Target,
            start: lm.target.start,
            end: lm.target.end,
        });
    }
    intervals.sort_by_key(|iv| iv.start);
    intervals
}

/// Sweep left to right over `text`, turning sorted intervals into a
/// segment sequence: gaps become plain segments, intervals become typed
/// segments, trailing text becomes a final plain segment. Adjacent
/// segments sharing a start offset are compressed down to the first.
///
/// Offsets are character offsets; interval bounds beyond the text are
/// clamped. The sweep is idempotent over already-disjoint sorted
/// intervals.
pub fn sweep(text: &str, intervals: &[Interval]) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let slice = |a: usize, b: usize| -> String { chars[a.min(len)..b.min(len)].iter().collect() };

    let mut segments: Vec<Segment> = Vec::new();
    let mut cursor = 0usize;

    for iv in intervals {
        let start = iv.start.min(len);
        let end = iv.end.min(len).max(start);
        if start > cursor {
            segments.push(Segment {
                kind: None,
                start: cursor,
                end: start,
                text: slice(cursor, start),
            });
        }
        segments.push(Segment {
            kind: Some(iv.kind),
            start,
            end,
            text: slice(start, end),
        });
        cursor = end;
    }

    if cursor < len {
        segments.push(Segment {
            kind: None,
            start: cursor,
            end: len,
            text: slice(cursor, len),
        });
    }

    compress(segments)
}

/// Drop segments whose start offset repeats the previous kept segment's
/// start, keeping the first.
fn compress(segments: Vec<Segment>) -> Vec<Segment> {
    let mut last_start: Option<usize> = None;
    segments
        .into_iter()
        .filter(|s| {
            if last_start == Some(s.start) {
                false
            } else {
                last_start = Some(s.start);
                true
            }
        })
        .collect()
}

/// Render segments to HTML: typed segments become class-tagged spans,
/// plain segments pass through, joined with single spaces.
pub fn render_html(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| match s.kind {
            Some(HighlightKind::Source) => {
                format!("<span class=\"source-word\">{}</span>", html_escape(&s.text))
            }
            Some(HighlightKind::Target) => {
                format!("<span class=\"target-word\">{}</span>", html_escape(&s.text))
            }
            // Untyped segments pass through unchanged.
            None => s.text.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the segment sequence for a document under the active filter.
pub fn segments(doc: &Document, filter: &LmFilter) -> Vec<Segment> {
    let matched = highest(&filter.select(&doc.lms));
    let intervals = collect_intervals(&matched);
    sweep(&doc.text, &intervals)
}

/// Full pipeline: filter, sort, sweep, render.
pub fn highlighted_text(doc: &Document, filter: &LmFilter) -> String {
    render_html(&segments(doc, filter))
}
