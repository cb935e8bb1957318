//! The pipeline driver.
//!
//! One sequential pass: scan the registry, build each discovered
//! descriptor, extract its edges, then render and write the artifact in a
//! single shot. Descriptor builds run strictly one at a time; their side
//! effects are unknown, and sequencing keeps one misbehaving descriptor
//! from interfering with the others mid-build.

use std::{fmt, path::Path};

use anyhow::Result;

use crate::{
    context::BuildContext,
    graph::{DependencyEdge, extract_edges},
    manifest::BuildOutcome,
    registry::{Registry, ScanEvent, ScanOptions},
    render::{render, write_artifact},
};

/// Which stage a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A code unit's descriptors could not be enumerated.
    Discovery,
    /// A descriptor's build failed.
    Construction,
}

/// One recovered failure, keyed by the unit or module it came from.
/// Failures are collected in scan order and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub subject: String,
    pub reason: String,
    pub kind: FailureKind,
}

impl FailureRecord {
    pub fn discovery(unit: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subject: unit.into(),
            reason: reason.into(),
            kind: FailureKind::Discovery,
        }
    }

    pub fn construction(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subject: module.into(),
            reason: reason.into(),
            kind: FailureKind::Construction,
        }
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::Discovery => {
                write!(f, "failed to scan unit '{}': {}", self.subject, self.reason)
            }
            FailureKind::Construction => {
                write!(f, "failed to build module '{}': {}", self.subject, self.reason)
            }
        }
    }
}

/// What one pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Rendered artifact text, exactly as written to the output file.
    pub artifact: String,
    /// The extracted edges, in discovery order.
    pub edges: Vec<DependencyEdge>,
    /// Recovered failures, in scan order. Never fatal.
    pub failures: Vec<FailureRecord>,
    /// Units visited (registered minus skip-prefixed).
    pub units_scanned: usize,
    /// Descriptors that built successfully.
    pub descriptors_built: usize,
    /// Descriptors that opted out of graph extraction.
    pub descriptors_skipped: usize,
}

/// Run the whole pipeline: scan → build → extract → render → write.
///
/// The artifact is written exactly once, after every descriptor has been
/// processed, so it is always syntactically complete even when some
/// descriptors failed. Failure records never fail the run; the only
/// fatal outcome is the final write failing.
pub fn run(
    registry: &Registry,
    context: &BuildContext,
    options: &ScanOptions,
    output: &Path,
) -> Result<RunReport> {
    let mut edges = Vec::new();
    let mut failures = Vec::new();
    let mut descriptors_built = 0;
    let mut descriptors_skipped = 0;

    for event in registry.scan(options) {
        match event {
            ScanEvent::UnitError { unit, reason } => {
                failures.push(FailureRecord::discovery(unit, reason));
            }
            ScanEvent::Descriptor(provider) => match provider.build(context) {
                BuildOutcome::Built(manifest) => {
                    descriptors_built += 1;
                    edges.extend(extract_edges(&manifest));
                }
                BuildOutcome::NotApplicable => descriptors_skipped += 1,
                BuildOutcome::Failed(reason) => {
                    failures.push(FailureRecord::construction(provider.name(), reason));
                }
            },
        }
    }

    let artifact = render(&edges);
    write_artifact(output, &artifact)?;

    let units_scanned = registry.units().filter(|unit| !options.skips(unit.name())).count();

    Ok(RunReport {
        artifact,
        edges,
        failures,
        units_scanned,
        descriptors_built,
        descriptors_skipped,
    })
}
