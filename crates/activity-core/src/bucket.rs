//! Single-pass bucketing of annotations by time frame and document.
//!
//! # Algorithm
//!
//! 1. Return no frames for empty input.
//! 2. Ask a fresh [`TimeFrameSequencer`] for the frame of the first
//!    annotation and make it current.
//! 3. For each annotation in input order: if the current frame's cutoff
//!    rejects it, close the current frame and ask the sequencer for the
//!    next one. Append the annotation to the current frame.
//! 4. Close the last frame and return all frames, most recent first.
//!
//! The input must already be sorted by `updated`, most recent first. No
//! sort happens here; unsorted input is bucketed incorrectly but never
//! panics.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::{TimeZone, Utc};
//! use activity_core::bucket::Bucketer;
//! use activity_core::clock::FixedClock;
//! use activity_core::labels::EnglishLabels;
//! use activity_core::models::{Annotation, Document};
//!
//! let now = Utc.with_ymd_and_hms(1970, 2, 21, 19, 30, 0).unwrap();
//! let doc = Arc::new(Document::new("doc-1", "Example"));
//! let annotations = vec![
//!     Annotation::new("a1", doc.clone(), now, "acct:alice@example.com"),
//!     Annotation::new("a2", doc, Utc.with_ymd_and_hms(1968, 3, 3, 0, 0, 0).unwrap(), "acct:bob@example.com"),
//! ];
//!
//! let frames = Bucketer::new(FixedClock(now), EnglishLabels).bucket(&annotations);
//! let labels: Vec<&str> = frames.iter().map(|f| f.label()).collect();
//! assert_eq!(labels, vec!["Last 7 days", "Mar 1968"]);
//! ```

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::labels::{EnglishLabels, Labels};
use crate::models::Annotation;
use crate::sequencer::TimeFrameSequencer;
use crate::timeframe::TimeFrame;

/// Drives the single-pass bucketing loop with an injected clock and labels.
#[derive(Debug, Clone, Default)]
pub struct Bucketer<C = SystemClock, L = EnglishLabels> {
    clock: C,
    labels: L,
}

impl<C: Clock, L: Labels> Bucketer<C, L> {
    pub fn new(clock: C, labels: L) -> Self {
        Self { clock, labels }
    }

    /// Bucket `annotations` (sorted most recent first) by time frame, then
    /// by document.
    ///
    /// The clock is read once per call.
    pub fn bucket<'a>(&self, annotations: &'a [Annotation]) -> Vec<TimeFrame<'a>> {
        let Some(first) = annotations.first() else {
            return Vec::new();
        };

        let mut sequencer = TimeFrameSequencer::new(self.clock.now(), &self.labels);
        let mut frames = Vec::new();
        let mut current = sequencer.next(first);

        for annotation in annotations {
            if !current.within_cutoff(annotation) {
                let next = sequencer.next(annotation);
                frames.push(std::mem::replace(&mut current, next));
            }
            current.append(annotation);
        }
        frames.push(current);

        debug!(
            annotations = annotations.len(),
            frames = frames.len(),
            "bucketed annotations"
        );
        frames
    }
}

/// Bucket with the system clock and English labels.
pub fn bucket(annotations: &[Annotation]) -> Vec<TimeFrame<'_>> {
    Bucketer::<SystemClock, EnglishLabels>::default().bucket(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::document_bucket::DocumentBucket;
    use crate::labels::LAST_7_DAYS;
    use crate::models::{Document, DocumentId};
    use crate::sequencer::RECENT_WINDOW_DAYS;
    use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Utc};
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn utcnow() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1970, 2, 21, 19, 30, 0).unwrap()
    }

    fn five_mins_ago() -> DateTime<Utc> {
        utcnow() - TimeDelta::minutes(5)
    }

    fn yesterday() -> DateTime<Utc> {
        utcnow() - TimeDelta::days(1)
    }

    fn third_march_1968() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1968, 3, 3, 0, 0, 0).unwrap()
    }

    fn fifth_november_1969() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1969, 11, 5, 0, 0, 0).unwrap()
    }

    fn bucketer() -> Bucketer<FixedClock, EnglishLabels> {
        Bucketer::new(FixedClock(utcnow()), EnglishLabels)
    }

    fn document(id: &str) -> Arc<Document> {
        Arc::new(Document::new(id, format!("Title of {id}")))
    }

    fn ann(id: &str, document: &Arc<Document>, updated: DateTime<Utc>) -> Annotation {
        Annotation::new(id, Arc::clone(document), updated, "acct:luke@example.com")
    }

    /// Expected shape of a frame: its label and, per document in order, the
    /// ids of its annotations.
    fn shape(frames: &[TimeFrame<'_>]) -> Vec<(String, Vec<(String, Vec<String>)>)> {
        frames
            .iter()
            .map(|f| {
                let docs: Vec<(String, Vec<String>)> = f
                    .document_buckets()
                    .map(|(id, b)| {
                        let ids: Vec<String> = b.annotations().iter().map(|a| a.id.clone()).collect();
                        (id.to_string(), ids)
                    })
                    .collect();
                (f.label().to_string(), docs)
            })
            .collect()
    }

    fn expect(frames: &[(&str, &[(&str, &[&str])])]) -> Vec<(String, Vec<(String, Vec<String>)>)> {
        frames
            .iter()
            .map(|(label, docs)| {
                let docs: Vec<(String, Vec<String>)> = docs
                    .iter()
                    .map(|(doc, ids)| {
                        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
                        (doc.to_string(), ids)
                    })
                    .collect();
                (label.to_string(), docs)
            })
            .collect()
    }

    #[test]
    fn test_no_annotations() {
        assert!(bucketer().bucket(&[]).is_empty());
        assert!(bucket(&[]).is_empty());
    }

    #[test]
    fn test_one_recent_annotation() {
        let doc = document("d1");
        let anns = vec![ann("a1", &doc, five_mins_ago())];

        let frames = bucketer().bucket(&anns);

        assert_eq!(
            shape(&frames),
            expect(&[("Last 7 days", &[("d1", &["a1"])])])
        );
        let bucket = frames[0].get(&doc.id).unwrap();
        assert_eq!(bucket, &DocumentBucket::with_annotations(&doc, &anns));
    }

    #[test]
    fn test_one_old_annotation() {
        let doc = document("d1");
        let anns = vec![ann("a1", &doc, third_march_1968())];

        let frames = bucketer().bucket(&anns);

        assert_eq!(shape(&frames), expect(&[("Mar 1968", &[("d1", &["a1"])])]));
    }

    #[test]
    fn test_multiple_annotations_of_one_document_in_one_frame() {
        for (updated, label) in [
            (five_mins_ago(), "Last 7 days"),
            (third_march_1968(), "Mar 1968"),
        ] {
            let doc = document("d1");
            let anns: Vec<Annotation> = (0..3).map(|i| ann(&format!("a{i}"), &doc, updated)).collect();

            let frames = bucketer().bucket(&anns);

            assert_eq!(
                shape(&frames),
                expect(&[(label, &[("d1", &["a0", "a1", "a2"])])])
            );
        }
    }

    #[test]
    fn test_annotations_of_multiple_documents_in_one_frame() {
        for (updated, label) in [(yesterday(), "Last 7 days"), (third_march_1968(), "Mar 1968")] {
            let d1 = document("d1");
            let d2 = document("d2");
            let d3 = document("d3");
            let anns = vec![ann("a1", &d1, updated), ann("a2", &d2, updated), ann("a3", &d3, updated)];

            let frames = bucketer().bucket(&anns);

            assert_eq!(
                shape(&frames),
                expect(&[(
                    label,
                    &[("d1", &["a1"]), ("d2", &["a2"]), ("d3", &["a3"])]
                )])
            );
        }
    }

    #[test]
    fn test_same_document_in_different_frames() {
        let doc = document("d1");
        let anns = vec![
            ann("now", &doc, utcnow()),
            ann("nov", &doc, fifth_november_1969()),
            ann("mar", &doc, third_march_1968()),
        ];

        let frames = bucketer().bucket(&anns);

        assert_eq!(
            shape(&frames),
            expect(&[
                ("Last 7 days", &[("d1", &["now"])]),
                ("Nov 1969", &[("d1", &["nov"])]),
                ("Mar 1968", &[("d1", &["mar"])]),
            ])
        );
    }

    #[test]
    fn test_recent_and_older_annotations_together() {
        let docs: Vec<Arc<Document>> = (1..=6).map(|i| document(&format!("d{i}"))).collect();
        let anns = vec![
            ann("a1", &docs[0], utcnow()),
            ann("a2", &docs[1], utcnow()),
            ann("a3", &docs[2], utcnow()),
            ann("a4", &docs[3], third_march_1968()),
            ann("a5", &docs[4], third_march_1968()),
            ann("a6", &docs[5], third_march_1968()),
        ];

        let frames = bucketer().bucket(&anns);

        assert_eq!(
            shape(&frames),
            expect(&[
                (
                    "Last 7 days",
                    &[("d1", &["a1"]), ("d2", &["a2"]), ("d3", &["a3"])]
                ),
                (
                    "Mar 1968",
                    &[("d4", &["a4"]), ("d5", &["a5"]), ("d6", &["a6"])]
                ),
            ])
        );
    }

    #[test]
    fn test_different_days_in_same_month_coalesce() {
        let doc = document("d1");
        let one_month_ago = utcnow() - TimeDelta::days(30);
        let anns = vec![
            ann("a1", &doc, one_month_ago),
            ann("a2", &doc, one_month_ago - TimeDelta::days(1)),
            ann("a3", &doc, one_month_ago - TimeDelta::days(2)),
        ];

        let frames = bucketer().bucket(&anns);

        assert_eq!(
            shape(&frames),
            expect(&[("Jan 1970", &[("d1", &["a1", "a2", "a3"])])])
        );
    }

    #[test]
    fn test_skipped_months_produce_no_empty_frames() {
        let doc = document("d1");
        let anns = vec![
            ann("dec", &doc, Utc.with_ymd_and_hms(1969, 12, 24, 9, 0, 0).unwrap()),
            ann("jun", &doc, Utc.with_ymd_and_hms(1969, 6, 1, 0, 0, 0).unwrap()),
            ann("jan", &doc, Utc.with_ymd_and_hms(1968, 1, 31, 23, 0, 0).unwrap()),
        ];

        let frames = bucketer().bucket(&anns);

        let labels: Vec<&str> = frames.iter().map(TimeFrame::label).collect();
        assert_eq!(labels, vec!["Dec 1969", "Jun 1969", "Jan 1968"]);
        assert!(frames.iter().all(|f| f.annotations_count() == 1));
    }

    #[test]
    fn test_recent_window_boundary_is_inclusive() {
        let doc = document("d1");
        let anns = vec![
            ann("edge", &doc, utcnow() - TimeDelta::days(7)),
            ann("outside", &doc, utcnow() - TimeDelta::days(7) - TimeDelta::seconds(1)),
        ];

        let frames = bucketer().bucket(&anns);

        assert_eq!(
            shape(&frames),
            expect(&[
                ("Last 7 days", &[("d1", &["edge"])]),
                ("Feb 1970", &[("d1", &["outside"])]),
            ])
        );
    }

    #[test]
    fn test_unsorted_input_does_not_panic() {
        let doc = document("d1");
        let anns = vec![
            ann("old", &doc, third_march_1968()),
            ann("new", &doc, utcnow()),
            ann("mid", &doc, fifth_november_1969()),
        ];

        let frames = bucketer().bucket(&anns);

        let total: usize = frames.iter().map(TimeFrame::annotations_count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_clock_is_read_once_per_run() {
        let calls = std::cell::Cell::new(0);
        let clock = || {
            calls.set(calls.get() + 1);
            utcnow()
        };
        let doc = document("d1");
        let anns = vec![
            ann("a1", &doc, utcnow()),
            ann("a2", &doc, third_march_1968()),
        ];

        let _ = Bucketer::new(clock, EnglishLabels).bucket(&anns);
        assert_eq!(calls.get(), 1);
    }

    fn arb_updated() -> impl Strategy<Value = DateTime<Utc>> {
        // 1960-01-01 up to the fixed "now".
        (-315_619_200i64..=utcnow().timestamp())
            .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap_or_else(utcnow))
    }

    fn arb_annotations() -> impl Strategy<Value = Vec<Annotation>> {
        let docs: Vec<Arc<Document>> = (0..4).map(|i| document(&format!("d{i}"))).collect();
        prop::collection::vec(
            (
                0usize..4,
                arb_updated(),
                prop::collection::vec("[a-c]{1,2}", 0..3),
                "u[0-3]",
            ),
            0..40,
        )
        .prop_map(move |rows| {
            let mut anns: Vec<Annotation> = rows
                .into_iter()
                .enumerate()
                .map(|(i, (doc, updated, tags, user))| {
                    Annotation::new(format!("a{i}"), Arc::clone(&docs[doc]), updated, user)
                        .with_tags(tags)
                })
                .collect();
            anns.sort_by(|a, b| b.updated.cmp(&a.updated));
            anns
        })
    }

    proptest! {
        #[test]
        fn property_bucket_aggregates_match_their_annotations(anns in arb_annotations()) {
            let frames = bucketer().bucket(&anns);
            for frame in &frames {
                for (doc_id, b) in frame.document_buckets() {
                    let tags: BTreeSet<String> =
                        b.annotations().iter().flat_map(|a| a.tags.iter().cloned()).collect();
                    let users: BTreeSet<String> =
                        b.annotations().iter().map(|a| a.userid.clone()).collect();
                    prop_assert_eq!(b.tags(), &tags);
                    prop_assert_eq!(b.users(), &users);
                    prop_assert_eq!(b.annotations_count(), b.annotations().len());
                    prop_assert!(b.annotations().iter().all(|a| a.document_id() == doc_id));
                }
            }
        }

        #[test]
        fn property_bucket_is_deterministic(anns in arb_annotations()) {
            let first = bucketer().bucket(&anns);
            let second = bucketer().bucket(&anns);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn property_every_annotation_lands_in_its_own_frame(anns in arb_annotations()) {
            let frames = bucketer().bucket(&anns);
            let recent_cutoff = utcnow() - TimeDelta::days(RECENT_WINDOW_DAYS);

            let placed: Vec<&str> = frames
                .iter()
                .flat_map(|f| f.document_buckets().flat_map(|(_, b)| b.annotations().iter().map(|a| a.id.as_str())))
                .collect();
            prop_assert_eq!(placed.len(), anns.len());

            for pair in frames.windows(2) {
                prop_assert!(pair[0].cutoff() > pair[1].cutoff());
            }
            for frame in &frames {
                prop_assert!(!frame.is_empty());
                for (_, b) in frame.document_buckets() {
                    for a in b.annotations() {
                        prop_assert!(frame.within_cutoff(a));
                        let expected = if a.updated >= recent_cutoff {
                            LAST_7_DAYS.to_string()
                        } else {
                            EnglishLabels.month_label(a.updated.year(), a.updated.month())
                        };
                        prop_assert_eq!(frame.label(), expected.as_str());
                    }
                }
            }
        }

        #[test]
        fn property_document_ids_unique_within_frame(anns in arb_annotations()) {
            let frames = bucketer().bucket(&anns);
            for frame in &frames {
                let ids: Vec<&DocumentId> = frame.document_buckets().map(|(id, _)| id).collect();
                let unique: BTreeSet<&DocumentId> = ids.iter().copied().collect();
                prop_assert_eq!(ids.len(), unique.len());
            }
        }
    }
}
