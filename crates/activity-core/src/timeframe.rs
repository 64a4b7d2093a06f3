//! Recency windows that group annotations by document.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::document_bucket::DocumentBucket;
use crate::models::{Annotation, DocumentId};

/// One labelled recency window ("Last 7 days", "Mar 1968", …).
///
/// Document buckets iterate in the order their documents were first seen.
#[derive(Debug, Clone)]
pub struct TimeFrame<'a> {
    label: String,
    cutoff: DateTime<Utc>,
    document_buckets: IndexMap<DocumentId, DocumentBucket<'a>>,
}

impl<'a> TimeFrame<'a> {
    pub fn new(label: impl Into<String>, cutoff: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            cutoff,
            document_buckets: IndexMap::new(),
        }
    }

    /// Append an annotation to its document's bucket in this frame.
    ///
    /// This does not check [`within_cutoff`](Self::within_cutoff); routing
    /// annotations to the right frame is the caller's job.
    pub fn append(&mut self, annotation: &'a Annotation) {
        self.document_buckets
            .entry(annotation.document_id().clone())
            .or_insert_with(|| DocumentBucket::new(&annotation.document))
            .append(annotation);
    }

    /// Whether `annotation` is at or after this frame's cutoff instant.
    ///
    /// A `true` result does not mean the annotation belongs here: a more
    /// recent frame may also accept it.
    pub fn within_cutoff(&self, annotation: &Annotation) -> bool {
        annotation.updated >= self.cutoff
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff
    }

    /// Buckets in first-seen document order.
    pub fn document_buckets(&self) -> impl Iterator<Item = (&DocumentId, &DocumentBucket<'a>)> {
        self.document_buckets.iter()
    }

    pub fn get(&self, document_id: &DocumentId) -> Option<&DocumentBucket<'a>> {
        self.document_buckets.get(document_id)
    }

    /// Number of document buckets.
    pub fn len(&self) -> usize {
        self.document_buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_buckets.is_empty()
    }

    /// Total annotations across all buckets.
    pub fn annotations_count(&self) -> usize {
        self.document_buckets
            .values()
            .map(DocumentBucket::annotations_count)
            .sum()
    }
}

/// Frames compare their buckets in iteration order, since `IndexMap`'s own
/// equality ignores it.
impl PartialEq for TimeFrame<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.cutoff == other.cutoff
            && self.document_buckets.iter().eq(other.document_buckets.iter())
    }
}

impl Eq for TimeFrame<'_> {}

impl Display for TimeFrame<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TimeFrame \"{}\" with {} document buckets",
            self.label,
            self.document_buckets.len()
        )
    }
}
