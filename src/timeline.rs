//! The `timeline` and `export` commands.
//!
//! Both commands load an activity file, bucket it with the configured clock
//! and labels, and then either print a readable timeline or emit the JSON
//! view from [`crate::export`].

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use activity_core::clock::{Clock, FixedClock, SystemClock};
use activity_core::models::Annotation;
use activity_core::{Bucketer, DocumentBucket, TimeFrame};

use crate::config::{self, Config};
use crate::export;
use crate::ingest;
use crate::labels::CatalogLabels;

/// Clock chosen from `--now`, then `[clock].now`, then the system clock.
enum RunClock {
    Fixed(FixedClock),
    System(SystemClock),
}

impl Clock for RunClock {
    fn now(&self) -> DateTime<Utc> {
        match self {
            Self::Fixed(clock) => clock.now(),
            Self::System(clock) => clock.now(),
        }
    }
}

fn run_clock(config: &Config, now_override: Option<&str>) -> Result<RunClock> {
    let fixed = match now_override {
        Some(value) => Some(config::parse_instant(value)?),
        None => config.clock.fixed_now()?,
    };
    Ok(match fixed {
        Some(now) => RunClock::Fixed(FixedClock(now)),
        None => RunClock::System(SystemClock),
    })
}

fn bucketer(config: &Config, now_override: Option<&str>) -> Result<Bucketer<RunClock, CatalogLabels>> {
    Ok(Bucketer::new(
        run_clock(config, now_override)?,
        CatalogLabels::from_config(&config.labels),
    ))
}

fn log_summary(annotations: &[Annotation], frames: &[TimeFrame<'_>]) {
    info!(
        annotations = annotations.len(),
        timeframes = frames.len(),
        "bucketed activity"
    );
}

/// Print the bucketed timeline in `format` (or the configured format).
pub fn run_timeline(
    config: &Config,
    input: &Path,
    format: Option<&str>,
    now: Option<&str>,
) -> Result<()> {
    let format = format.unwrap_or(&config.output.format);
    config::validate_format(format)?;

    let annotations = ingest::load_activity(input)?;
    let frames = bucketer(config, now)?.bucket(&annotations);
    log_summary(&annotations, &frames);

    if format == "json" {
        export::write_json(&frames, None)
    } else {
        write_text(&mut std::io::stdout().lock(), &frames)
    }
}

/// Write the plain-text timeline to `out`.
pub fn write_text<W: std::io::Write>(out: &mut W, frames: &[TimeFrame<'_>]) -> Result<()> {
    out.write_all(render_text(frames).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write the JSON view to `output`, or stdout when unset.
pub fn run_export(
    config: &Config,
    input: &Path,
    output: Option<&Path>,
    now: Option<&str>,
) -> Result<()> {
    let annotations = ingest::load_activity(input)?;
    let frames = bucketer(config, now)?.bucket(&annotations);
    log_summary(&annotations, &frames);
    export::write_json(&frames, output)
}

/// Render frames as an indented plain-text timeline.
pub fn render_text(frames: &[TimeFrame<'_>]) -> String {
    if frames.is_empty() {
        return "No annotations.\n".to_string();
    }

    let mut out = String::new();
    for (i, frame) in frames.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", frame.label());
        for (_, bucket) in frame.document_buckets() {
            render_bucket(&mut out, bucket);
        }
    }
    out
}

fn render_bucket(out: &mut String, bucket: &DocumentBucket<'_>) {
    let title = if bucket.title().is_empty() {
        "(untitled)"
    } else {
        bucket.title()
    };
    let count = bucket.annotations_count();
    let noun = if count == 1 { "annotation" } else { "annotations" };

    match bucket.domain() {
        Some(domain) => {
            let _ = writeln!(out, "  {} ({}): {} {}", title, domain, count, noun);
        }
        None => {
            let _ = writeln!(out, "  {}: {} {}", title, count, noun);
        }
    }
    if let Some(uri) = bucket.uri() {
        let _ = writeln!(out, "    uri: {}", uri);
    }
    let users: Vec<&str> = bucket.users().iter().map(String::as_str).collect();
    let _ = writeln!(out, "    users: {}", users.join(", "));
    if !bucket.tags().is_empty() {
        let tags: Vec<&str> = bucket.tags().iter().map(String::as_str).collect();
        let _ = writeln!(out, "    tags: {}", tags.join(", "));
    }
}
