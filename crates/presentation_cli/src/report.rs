//! Human-readable and JSON views of a controls document

use std::collections::HashSet;
use std::fmt::Write as _;

use anyhow::Context;
use domain::{Endpoint, EndpointFilter, InjectionSite};
use infrastructure::{ControlsDocument, InjectionKind, InjectionSpec};
use serde::Serialize;

/// One line of the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectionRow {
    pub site: String,
    pub kind: &'static str,
    pub details: String,
    pub skip: u32,
    pub fire: u32,
    pub target: String,
    /// Whether this injection is live on the summarized endpoint
    pub armed: bool,
}

fn details(kind: &InjectionKind) -> String {
    match kind {
        InjectionKind::Exception { class, message } => match message {
            Some(message) => format!("{class}: {message}"),
            None => class.to_string(),
        },
        InjectionKind::Pause { millis: Some(millis) } => format!("{millis}ms"),
        InjectionKind::Pause { millis: None } => "until released".to_string(),
        InjectionKind::Latch { count } => format!("count {count}"),
    }
}

fn target(spec: &InjectionSpec) -> String {
    match (&spec.address, spec.port) {
        (Some(address), Some(port)) => format!("{address}:{port}"),
        (Some(address), None) => address.clone(),
        _ => "any".to_string(),
    }
}

/// Describe every injection in document order
///
/// An injection is armed when its endpoint filter matches `endpoint` and no
/// later matching injection configures the same site.
pub fn summarize(
    document: &ControlsDocument,
    endpoint: &Endpoint,
) -> anyhow::Result<Vec<InjectionRow>> {
    let mut seen: HashSet<InjectionSite> = HashSet::new();
    let mut rows = Vec::with_capacity(document.len());

    for (index, spec) in document.injections.iter().enumerate().rev() {
        let site = spec
            .site()
            .with_context(|| format!("injection #{index} has an invalid site"))?;
        let filter = EndpointFilter::new(spec.address.clone(), spec.port)
            .with_context(|| format!("injection #{index} has an invalid endpoint filter"))?;
        let armed = filter.matches(endpoint) && seen.insert(site.clone());

        rows.push(InjectionRow {
            site: site.to_string(),
            kind: spec.kind.name(),
            details: details(&spec.kind),
            skip: spec.skip,
            fire: spec.fire,
            target: target(spec),
            armed,
        });
    }

    rows.reverse();
    Ok(rows)
}

/// Render rows as an aligned table
pub fn render_table(rows: &[InjectionRow]) -> String {
    let site_width = rows
        .iter()
        .map(|row| row.site.len())
        .max()
        .unwrap_or(0)
        .max("SITE".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<site_width$}  {:<9}  {:>4}  {:>4}  {:<6}  {:<20}  DETAILS",
        "SITE", "KIND", "SKIP", "FIRE", "ARMED", "TARGET"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<site_width$}  {:<9}  {:>4}  {:>4}  {:<6}  {:<20}  {}",
            row.site,
            row.kind,
            row.skip,
            row.fire,
            if row.armed { "yes" } else { "no" },
            row.target,
            row.details
        );
    }
    out
}
