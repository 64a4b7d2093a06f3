//! Serialized shapes exchanged with the storage collaborator.
//!
//! An activity file carries documents and the annotations that reference
//! them by id:
//!
//! ```json
//! {
//!   "documents": [
//!     { "id": "doc-1", "title": "Example", "uris": [{ "uri": "https://example.com" }] }
//!   ],
//!   "annotations": [
//!     { "id": "a1", "document_id": "doc-1", "updated": "1970-02-21T19:25:00Z",
//!       "tags": ["foo"], "userid": "acct:alice@example.com" }
//!   ]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use activity_core::models::DocumentUri;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFile {
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uris: Vec<DocumentUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub id: String,
    pub document_id: String,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub userid: String,
    #[serde(default)]
    pub text: Option<String>,
}
