//! Loading annotations for bucketing.
//!
//! Reads an [`ActivityFile`], resolves every annotation's `document_id` to a
//! shared [`Document`], and orders annotations most recent first, which is
//! the order the bucketer requires.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use activity_core::models::{Annotation, Document, DocumentId};

use crate::models::ActivityFile;

/// Read and resolve an activity file from disk.
pub fn load_activity(path: &Path) -> Result<Vec<Annotation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read activity file: {}", path.display()))?;
    let file: ActivityFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse activity file: {}", path.display()))?;

    let annotations = resolve(file)?;
    info!(
        path = %path.display(),
        annotations = annotations.len(),
        "loaded activity"
    );
    Ok(annotations)
}

/// Link annotations to their documents and sort them by `updated`, newest
/// first. Ties keep their file order.
pub fn resolve(file: ActivityFile) -> Result<Vec<Annotation>> {
    let mut documents: HashMap<String, Arc<Document>> = HashMap::new();
    for record in file.documents {
        if documents.contains_key(&record.id) {
            bail!("Duplicate document id: '{}'", record.id);
        }
        let document = Document {
            id: DocumentId::new(record.id.clone()),
            title: record.title.unwrap_or_default(),
            uris: record.uris,
        };
        documents.insert(record.id, Arc::new(document));
    }

    let mut annotations = Vec::with_capacity(file.annotations.len());
    for record in file.annotations {
        let Some(document) = documents.get(&record.document_id) else {
            bail!(
                "Annotation '{}' references unknown document '{}'",
                record.id,
                record.document_id
            );
        };
        annotations.push(Annotation {
            id: record.id,
            document: Arc::clone(document),
            updated: record.updated,
            tags: record.tags,
            userid: record.userid,
            text: record.text,
        });
    }

    annotations.sort_by(|a, b| b.updated.cmp(&a.updated));
    Ok(annotations)
}
