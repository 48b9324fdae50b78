//! Missing-span computation over fetched coverage.
//!
//! Pure functions so gap-filling can be unit tested without a store or a
//! network. Coverage spans record which date ranges have already been fetched
//! from upstream; a date inside coverage with no observation is a true
//! non-trading gap and must not be refetched.

use chrono::NaiveDate;

use super::prices_model::DateSpan;

/// Computes the sub-spans of [start, end] not covered by `covered`.
///
/// `covered` must be sorted by span start; overlapping input spans are
/// tolerated. The returned spans are disjoint, date-ascending, and together
/// with the coverage exactly tile the requested range.
pub fn missing_spans(start: NaiveDate, end: NaiveDate, covered: &[DateSpan]) -> Vec<DateSpan> {
    let mut gaps = Vec::new();
    let mut cursor = start;

    for span in covered {
        if span.end < cursor {
            continue;
        }
        if span.start > end {
            break;
        }
        if span.start > cursor {
            gaps.push(DateSpan::new(cursor, prev_day(span.start)));
        }
        match next_day(span.end) {
            Some(next) if next > cursor => cursor = next,
            Some(_) => {}
            // Span runs to the end of the calendar; nothing can be missing after it
            None => return gaps,
        }
        if cursor > end {
            return gaps;
        }
    }

    if cursor <= end {
        gaps.push(DateSpan::new(cursor, end));
    }

    gaps
}

/// Merges `new_span` into `existing`, coalescing overlapping and adjacent
/// spans into the minimal sorted set.
pub fn merge_spans(existing: &[DateSpan], new_span: DateSpan) -> Vec<DateSpan> {
    let mut spans: Vec<DateSpan> = existing.to_vec();
    spans.push(new_span);
    spans.sort_by_key(|s| s.start);

    let mut merged: Vec<DateSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if touches(last, &span) => {
                if span.end > last.end {
                    last.end = span.end;
                }
            }
            _ => merged.push(span),
        }
    }

    merged
}

fn touches(a: &DateSpan, b: &DateSpan) -> bool {
    match next_day(a.end) {
        Some(next) => b.start <= next,
        None => true,
    }
}

fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.succ_opt()
}

fn prev_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}
