//! # Activity Core
//!
//! Pure logic for annotation activity timelines: data models, per-document
//! buckets, recency time frames, and the single-pass bucketer that groups a
//! most-recent-first annotation stream into frames and documents.
//!
//! This crate performs no I/O. Storage, document metadata, and translation
//! live with the application, which passes in an already-sorted slice of
//! annotations plus a [`clock::Clock`] and [`labels::Labels`].

pub mod bucket;
pub mod clock;
pub mod document_bucket;
pub mod labels;
pub mod models;
pub mod sequencer;
pub mod timeframe;

pub use bucket::{bucket, Bucketer};
pub use document_bucket::DocumentBucket;
pub use timeframe::TimeFrame;
