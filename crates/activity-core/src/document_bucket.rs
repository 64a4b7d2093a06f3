//! Per-document accumulator within one time frame.
//!
//! A [`DocumentBucket`] collects the annotations of a single document that
//! fall into one [`TimeFrame`](crate::timeframe::TimeFrame), together with
//! running aggregates used by activity views:
//!
//! - `tags`: union of every appended annotation's tags.
//! - `users`: union of every appended annotation's `userid`.
//! - `title`, `uri`, `domain`: resolved once from the document when the
//!   bucket is created.
//!
//! # URI resolution
//!
//! The document's candidate locators are scanned in order and the first one
//! whose scheme is exactly `http` or `https` wins. Other schemes
//! (`urn:x-pdf:…`, `doi:…`, `file:…`) are skipped rather than ranked, so a
//! PDF fingerprint listed first never shadows a later web address.
//!
//! The domain is the network location of that URI as written: the text
//! between `//` and the first `/`, `?` or `#`, without any `user@` prefix.
//! Host case, IDN spelling and ports are kept as they appear in `uri`.
//!
//! ```rust
//! use std::sync::Arc;
//! use activity_core::document_bucket::DocumentBucket;
//! use activity_core::models::Document;
//!
//! let doc = Document::new("doc-1", "Example")
//!     .with_uri("urn:x-pdf:fingerprint")
//!     .with_uri("http://example.com");
//! let bucket = DocumentBucket::new(&doc);
//! assert_eq!(bucket.uri(), Some("http://example.com"));
//! assert_eq!(bucket.domain(), Some("example.com"));
//! ```

use std::collections::BTreeSet;

use crate::models::{Annotation, Document, DocumentId};

const WEB_SCHEMES: [&str; 2] = ["http", "https"];

/// Annotations of one document inside one time frame.
///
/// Fields are private so that `tags`, `users` and `annotations` can only
/// change together through [`append`](Self::append).
#[derive(Debug, Clone)]
pub struct DocumentBucket<'a> {
    document_id: DocumentId,
    annotations: Vec<&'a Annotation>,
    tags: BTreeSet<String>,
    users: BTreeSet<String>,
    title: String,
    uri: Option<String>,
    domain: Option<String>,
}

impl<'a> DocumentBucket<'a> {
    /// Create an empty bucket for `document`, resolving its title and web URI.
    pub fn new(document: &Document) -> Self {
        let (uri, domain) = match find_web_uri(document) {
            Some((uri, domain)) => (Some(uri), domain),
            None => (None, None),
        };

        Self {
            document_id: document.id.clone(),
            annotations: Vec::new(),
            tags: BTreeSet::new(),
            users: BTreeSet::new(),
            title: document.title.clone(),
            uri,
            domain,
        }
    }

    /// Create a bucket and append `annotations` in order.
    pub fn with_annotations<I>(document: &Document, annotations: I) -> Self
    where
        I: IntoIterator<Item = &'a Annotation>,
    {
        let mut bucket = Self::new(document);
        bucket.extend(annotations);
        bucket
    }

    /// Append one annotation and fold its tags and user into the aggregates.
    pub fn append(&mut self, annotation: &'a Annotation) {
        self.annotations.push(annotation);
        self.tags.extend(annotation.tags.iter().cloned());
        self.users.insert(annotation.userid.clone());
    }

    /// Append every annotation in order.
    pub fn extend<I>(&mut self, annotations: I)
    where
        I: IntoIterator<Item = &'a Annotation>,
    {
        for annotation in annotations {
            self.append(annotation);
        }
    }

    pub fn annotations_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn annotations(&self) -> &[&'a Annotation] {
        &self.annotations
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn users(&self) -> &BTreeSet<String> {
        &self.users
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }
}

/// Equality over the rendered content of the bucket.
///
/// The owning document id is deliberately not compared.
impl PartialEq for DocumentBucket<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.annotations == other.annotations
            && self.tags == other.tags
            && self.users == other.users
            && self.uri == other.uri
            && self.domain == other.domain
            && self.title == other.title
    }
}

impl Eq for DocumentBucket<'_> {}

/// Return the first `http`/`https` locator of `document` and its domain.
///
/// The URI string is returned as supplied. The domain is `None` when the
/// URI has no network location.
fn find_web_uri(document: &Document) -> Option<(String, Option<String>)> {
    let candidate = document
        .uris
        .iter()
        .find(|u| u.scheme().is_some_and(|s| WEB_SCHEMES.contains(&s)))?;

    Some((candidate.uri.clone(), authority(&candidate.uri).map(str::to_string)))
}

/// Host and port of `uri` exactly as written.
fn authority(uri: &str) -> Option<&str> {
    let (_, rest) = uri.split_once(':')?;
    let rest = rest.strip_prefix("//")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let location = &rest[..end];
    let host = match location.rsplit_once('@') {
        Some((_, host)) => host,
        None => location,
    };
    (!host.is_empty()).then_some(host)
}
