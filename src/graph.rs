//! Dependency edges and their extraction from built manifests.

use std::fmt;

use crate::manifest::ModuleManifest;

/// The kind of directed edge between two modules in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Public dependency: the target's interface is visible to consumers
    /// of the source module.
    Strong,
    /// Private dependency: linked but not re-exposed.
    Weak,
}

impl EdgeKind {
    /// Arrow notation understood by Mermaid-style flow diagram tools.
    pub fn arrow(self) -> &'static str {
        match self {
            EdgeKind::Strong => "-->",
            EdgeKind::Weak => "-.->",
        }
    }
}

/// One declared dependency: `source` depends on `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

impl DependencyEdge {
    pub fn strong(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::Strong,
        }
    }

    pub fn weak(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::Weak,
        }
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.source, self.kind.arrow(), self.target)
    }
}

/// Read the dependency lists off a built manifest: one strong edge per
/// public dependency, then one weak edge per private dependency, both in
/// declaration order. Empty lists yield an empty vector.
pub fn extract_edges(manifest: &ModuleManifest) -> Vec<DependencyEdge> {
    let mut edges = Vec::with_capacity(
        manifest.public_dependencies.len() + manifest.private_dependencies.len(),
    );
    for target in &manifest.public_dependencies {
        edges.push(DependencyEdge::strong(&manifest.name, target));
    }
    for target in &manifest.private_dependencies {
        edges.push(DependencyEdge::weak(&manifest.name, target));
    }
    edges
}
