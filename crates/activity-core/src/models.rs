//! Core data models consumed by the bucketing pipeline.
//!
//! These types mirror what the storage layer hands over: documents with
//! their candidate locators, and annotations that reference a document.
//! The core never mutates them.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identity token for a [`Document`].
///
/// Document buckets are keyed by this value, so two annotations refer to
/// the same document exactly when their documents carry the same id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate locator for a document (`http://…`, `urn:x-pdf:…`, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUri {
    pub uri: String,
}

impl DocumentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// The scheme exactly as written in the record, without the trailing `:`.
    ///
    /// No case folding is applied. Returns `None` when the string has no
    /// scheme separator.
    pub fn scheme(&self) -> Option<&str> {
        let (scheme, _) = self.uri.split_once(':')?;
        if scheme.is_empty() {
            None
        } else {
            Some(scheme)
        }
    }
}

/// An annotated document as resolved by the metadata collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    /// Display title. May be empty.
    pub title: String,
    /// Candidate locators in the order the collaborator ranked them.
    pub uris: Vec<DocumentUri>,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(id),
            title: title.into(),
            uris: Vec::new(),
        }
    }

    /// Builder-style helper appending one candidate locator.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uris.push(DocumentUri::new(uri));
        self
    }
}

/// A single annotation.
///
/// `document` is shared between every annotation of the same document so
/// that the loader resolves document metadata once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub id: String,
    pub document: Arc<Document>,
    /// Last modification instant (UTC).
    pub updated: DateTime<Utc>,
    pub tags: Vec<String>,
    pub userid: String,
    pub text: Option<String>,
}

impl Annotation {
    pub fn new(
        id: impl Into<String>,
        document: Arc<Document>,
        updated: DateTime<Utc>,
        userid: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            document,
            updated,
            tags: Vec::new(),
            userid: userid.into(),
            text: None,
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document.id
    }
}
