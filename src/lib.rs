//! # Annotation Activity
//!
//! Activity timelines for annotations: "most recent first, grouped by when
//! and by what they are attached to".
//!
//! The bucketing itself lives in the `activity-core` crate. This crate is
//! the application around it: configuration, loading annotations from the
//! storage export, label translation, and rendering.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────────┐
//! │ Activity     │──▶│ activity-core  │──▶│ Text / JSON      │
//! │ file (JSON)  │   │ Bucketer       │   │ rendering        │
//! └──────────────┘   └────────────────┘   └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! activity timeline ./activity.json
//! activity timeline ./activity.json --format json --now 1970-02-21T19:30:00Z
//! activity --config ./config/activity.toml export ./activity.json --output out/timeline.json
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Activity file records |
//! | [`ingest`] | Loading and ordering annotations |
//! | [`labels`] | Config-driven label translations |
//! | [`timeline`] | `timeline` / `export` commands and text rendering |
//! | [`export`] | JSON view of a bucketed timeline |

pub mod config;
pub mod export;
pub mod ingest;
pub mod labels;
pub mod models;
pub mod timeline;
