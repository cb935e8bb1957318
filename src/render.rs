//! Rendering the accumulated edges into the text artifact.
//!
//! The artifact is deliberately bare: one arrow line per edge, in the
//! exact order extracted, with no header or footer, so the file can be
//! pasted straight into a Mermaid flowchart body.

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::graph::DependencyEdge;

/// Render edges as newline-terminated arrow lines, in input order.
/// Deterministic: the same edge sequence always produces the same text.
pub fn render(edges: &[DependencyEdge]) -> String {
    let mut artifact = String::new();
    for edge in edges {
        artifact.push_str(&edge.to_string());
        artifact.push('\n');
    }
    artifact
}

/// Write the rendered artifact to `path` in one shot.
///
/// This is the pipeline's only fatal failure point: an unwritable path
/// aborts the run, everything else is recovered per descriptor.
pub fn write_artifact(path: &Path, artifact: &str) -> Result<()> {
    fs::write(path, artifact)
        .with_context(|| format!("Failed to write module graph to {}", path.display()))
}
