//! Descriptor registry and scanning.
//!
//! Instead of inspecting ambient process state, the pipeline receives an
//! explicit [`Registry`] of unit sources. Each source names one code unit
//! and enumerates the module descriptors that unit declares. Tests inject
//! in-memory units; the CLI registers one [`DefinitionsUnit`](crate::definitions::DefinitionsUnit)
//! per definitions file.

use std::sync::Arc;

use anyhow::Result;

use crate::{
    context::BuildContext,
    manifest::{BuildOutcome, ModuleManifest},
};

/// One build-module descriptor.
///
/// Whether a descriptor takes part in graph extraction is its own
/// decision: `build` returns [`BuildOutcome::NotApplicable`] rather than
/// the registry probing for a particular shape.
pub trait DescriptorProvider {
    /// The module name, unique within one run.
    fn name(&self) -> &str;

    /// Realize the descriptor against the active build context.
    fn build(&self, context: &BuildContext) -> BuildOutcome;
}

/// A named code unit that can enumerate its descriptor providers.
///
/// Enumeration is fallible: a unit whose definitions cannot be loaded
/// surfaces as a [`ScanEvent::UnitError`] and the scan continues with the
/// remaining units.
pub trait UnitSource {
    fn name(&self) -> &str;

    fn providers(&self) -> Result<Vec<Arc<dyn DescriptorProvider>>>;
}

/// Controls which units and descriptors a scan visits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Unit-name prefixes excluded from discovery entirely. Skipped units
    /// are never asked for their providers.
    pub skip_prefixes: Vec<String>,
    /// Name of the descriptor running the scan, excluded from the output
    /// to prevent self-reference in the graph.
    pub exclude: Option<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            skip_prefixes: vec!["System".to_string()],
            exclude: None,
        }
    }
}

impl ScanOptions {
    /// Whether a unit with the given name is excluded from discovery.
    pub fn skips(&self, unit: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|prefix| unit.starts_with(prefix.as_str()))
    }
}

/// One step of a scan.
pub enum ScanEvent {
    /// A concrete descriptor discovered in a scanned unit.
    Descriptor(Arc<dyn DescriptorProvider>),
    /// A unit whose descriptors could not be enumerated.
    UnitError { unit: String, reason: String },
}

/// An explicit registry of code units, scanned in registration order.
#[derive(Default)]
pub struct Registry {
    units: Vec<Box<dyn UnitSource>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, unit: Box<dyn UnitSource>) {
        self.units.push(unit);
    }

    pub fn units(&self) -> impl Iterator<Item = &dyn UnitSource> {
        self.units.iter().map(|unit| unit.as_ref())
    }

    /// Lazily walk every non-skipped unit and yield its descriptors in
    /// declaration order, excluding the self-descriptor. A unit that fails
    /// to enumerate yields a single [`ScanEvent::UnitError`] instead of
    /// aborting the scan.
    pub fn scan<'a>(&'a self, options: &'a ScanOptions) -> impl Iterator<Item = ScanEvent> + 'a {
        self.units
            .iter()
            .filter(|unit| !options.skips(unit.name()))
            .flat_map(|unit| match unit.providers() {
                Ok(providers) => providers
                    .into_iter()
                    .filter(|provider| options.exclude.as_deref() != Some(provider.name()))
                    .map(ScanEvent::Descriptor)
                    .collect::<Vec<_>>(),
                Err(err) => vec![ScanEvent::UnitError {
                    unit: unit.name().to_string(),
                    reason: format!("{err:#}"),
                }],
            })
    }
}

/// In-memory unit source, for embedding descriptors directly and for
/// tests that need a fixed registry.
pub struct StaticUnit {
    name: String,
    providers: Vec<Arc<dyn DescriptorProvider>>,
}

impl StaticUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            providers: Vec::new(),
        }
    }

    pub fn with(mut self, provider: Arc<dyn DescriptorProvider>) -> Self {
        self.providers.push(provider);
        self
    }
}

impl UnitSource for StaticUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn providers(&self) -> Result<Vec<Arc<dyn DescriptorProvider>>> {
        Ok(self.providers.clone())
    }
}

/// Descriptor provider backed by a fixed manifest. Always builds.
pub struct StaticDescriptor {
    manifest: ModuleManifest,
}

impl StaticDescriptor {
    pub fn new(manifest: ModuleManifest) -> Self {
        Self { manifest }
    }
}

impl DescriptorProvider for StaticDescriptor {
    fn name(&self) -> &str {
        &self.manifest.name
    }

    fn build(&self, _context: &BuildContext) -> BuildOutcome {
        BuildOutcome::Built(self.manifest.clone())
    }
}
