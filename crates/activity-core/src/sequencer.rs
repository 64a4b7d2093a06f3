//! Lazy generator of time-frame boundaries.
//!
//! Frames are handed out in strictly decreasing recency:
//!
//! 1. A single "Last 7 days" frame, cut off seven days before the clock
//!    reading taken at construction.
//! 2. Once that frame is consumed (or rejected), one calendar-month frame
//!    per request, cut off at midnight UTC on the first of the requesting
//!    annotation's month.
//!
//! Month frames are synthesised from the annotation that needs them, so
//! months without annotations never produce a frame.

use std::collections::VecDeque;

use chrono::{DateTime, Datelike, Days, NaiveTime, TimeDelta, Utc};
use tracing::debug;

use crate::labels::{Labels, LAST_7_DAYS};
use crate::models::Annotation;
use crate::timeframe::TimeFrame;

/// Length of the fixed recent-activity window.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Hands out [`TimeFrame`]s on demand for one bucketing run.
///
/// Callers must request frames with annotations in non-increasing
/// `updated` order. A frame is returned at most once and never revisited.
pub struct TimeFrameSequencer<'a, 'l, L: ?Sized> {
    pending: VecDeque<TimeFrame<'a>>,
    labels: &'l L,
}

impl<'a, 'l, L: Labels + ?Sized> TimeFrameSequencer<'a, 'l, L> {
    pub fn new(now: DateTime<Utc>, labels: &'l L) -> Self {
        let recent = TimeFrame::new(
            labels.translate(LAST_7_DAYS),
            now - TimeDelta::days(RECENT_WINDOW_DAYS),
        );
        Self {
            pending: VecDeque::from([recent]),
            labels,
        }
    }

    /// Return the next frame; it is guaranteed to accept `annotation`.
    pub fn next(&mut self, annotation: &Annotation) -> TimeFrame<'a> {
        while let Some(frame) = self.pending.pop_front() {
            if frame.within_cutoff(annotation) {
                debug!(label = frame.label(), "activating queued time frame");
                return frame;
            }
            debug!(label = frame.label(), "skipping exhausted time frame");
        }

        let updated = annotation.updated;
        let frame = TimeFrame::new(
            self.labels.month_label(updated.year(), updated.month()),
            month_start(updated),
        );
        debug!(label = frame.label(), cutoff = %frame.cutoff(), "synthesised month frame");
        frame
    }

    /// Number of queued frames not yet handed out.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Midnight UTC on the first day of `instant`'s month.
pub fn month_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    let first = date - Days::new(u64::from(date.day0()));
    first.and_time(NaiveTime::MIN).and_utc()
}
