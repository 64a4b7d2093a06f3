//! Serializable view of a bucketed timeline.
//!
//! Mirrors the nested structure produced by the core: frames in recency
//! order, each with its document buckets in first-seen order.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

use activity_core::{DocumentBucket, TimeFrame};

#[derive(Debug, Serialize)]
pub struct ExportTimeline {
    pub timeframes: Vec<ExportTimeFrame>,
}

#[derive(Debug, Serialize)]
pub struct ExportTimeFrame {
    pub label: String,
    /// Cutoff instant (RFC 3339).
    pub cutoff: String,
    pub annotations_count: usize,
    pub documents: Vec<ExportDocumentBucket>,
}

#[derive(Debug, Serialize)]
pub struct ExportDocumentBucket {
    pub document_id: String,
    pub title: String,
    pub uri: Option<String>,
    pub domain: Option<String>,
    pub annotations_count: usize,
    pub tags: Vec<String>,
    pub users: Vec<String>,
    pub annotations: Vec<ExportAnnotation>,
}

#[derive(Debug, Serialize)]
pub struct ExportAnnotation {
    pub id: String,
    pub updated: String,
    pub userid: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ExportTimeline {
    pub fn from_frames(frames: &[TimeFrame<'_>]) -> Self {
        Self {
            timeframes: frames.iter().map(ExportTimeFrame::from_frame).collect(),
        }
    }
}

impl ExportTimeFrame {
    fn from_frame(frame: &TimeFrame<'_>) -> Self {
        Self {
            label: frame.label().to_string(),
            cutoff: frame.cutoff().to_rfc3339(),
            annotations_count: frame.annotations_count(),
            documents: frame
                .document_buckets()
                .map(|(_, bucket)| ExportDocumentBucket::from_bucket(bucket))
                .collect(),
        }
    }
}

impl ExportDocumentBucket {
    fn from_bucket(bucket: &DocumentBucket<'_>) -> Self {
        Self {
            document_id: bucket.document_id().to_string(),
            title: bucket.title().to_string(),
            uri: bucket.uri().map(str::to_string),
            domain: bucket.domain().map(str::to_string),
            annotations_count: bucket.annotations_count(),
            tags: bucket.tags().iter().cloned().collect(),
            users: bucket.users().iter().cloned().collect(),
            annotations: bucket
                .annotations()
                .iter()
                .map(|a| ExportAnnotation {
                    id: a.id.clone(),
                    updated: a.updated.to_rfc3339(),
                    userid: a.userid.clone(),
                    tags: a.tags.clone(),
                    text: a.text.clone(),
                })
                .collect(),
        }
    }
}

/// Write the timeline as pretty JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub fn write_json(frames: &[TimeFrame<'_>], output: Option<&Path>) -> Result<()> {
    let data = ExportTimeline::from_frames(frames);
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)?;
            info!(
                timeframes = data.timeframes.len(),
                path = %path.display(),
                "exported timeline"
            );
        }
        None => write_to(&mut std::io::stdout().lock(), &json)?,
    }

    Ok(())
}

/// Write `json` and a trailing newline to `out`.
pub fn write_to<W: Write>(out: &mut W, json: &str) -> Result<()> {
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}
