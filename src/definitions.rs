//! Definitions-file unit sources.
//!
//! The CLI builds its registry from a definitions directory: each
//! `<Unit>.modules.json` file is one code unit declaring the module
//! descriptors it contains. The unit name is the file name minus the
//! suffix, so skip prefixes apply before the file is ever parsed.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::{
    context::BuildContext,
    manifest::{BuildOutcome, ModuleManifest},
    registry::{DescriptorProvider, UnitSource},
};

/// File-name suffix identifying a unit definitions file.
pub const DEFINITIONS_SUFFIX: &str = ".modules.json";

/// What a descriptor entry describes. Only modules take part in graph
/// extraction; other kinds register but build as not applicable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DescriptorKind {
    #[default]
    Module,
    Program,
    Target,
}

/// One descriptor entry in a unit definitions file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDefinition {
    pub name: String,

    #[serde(default)]
    pub kind: DescriptorKind,

    #[serde(default)]
    pub public_dependencies: Vec<String>,

    #[serde(default)]
    pub private_dependencies: Vec<String>,

    /// When present, the descriptor only builds on the listed platforms
    /// and fails on every other one.
    #[serde(default)]
    pub supported_platforms: Option<Vec<String>>,
}

/// The parsed contents of one `<Unit>.modules.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDefinitions {
    #[serde(default)]
    pub modules: Vec<ModuleDefinition>,
}

impl UnitDefinitions {
    /// Reject names that would corrupt the rendered artifact. Module and
    /// dependency names must be non-empty and free of line breaks.
    pub fn validate(&self) -> Result<()> {
        for module in &self.modules {
            validate_name("module name", &module.name)?;
            for dep in module
                .public_dependencies
                .iter()
                .chain(&module.private_dependencies)
            {
                validate_name("dependency name", dep)
                    .with_context(|| format!("in module '{}'", module.name))?;
            }
        }
        Ok(())
    }
}

fn validate_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("{} must not be empty", what);
    }
    if name.contains(['\n', '\r']) {
        bail!("{} \"{}\" must not contain line breaks", what, name.escape_default());
    }
    Ok(())
}

/// Unit source backed by a definitions file. The file is read lazily, at
/// scan time, so a broken file surfaces as a per-unit discovery failure
/// rather than an error while assembling the registry.
pub struct DefinitionsUnit {
    name: String,
    path: PathBuf,
}

impl DefinitionsUnit {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl UnitSource for DefinitionsUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn providers(&self) -> Result<Vec<Arc<dyn DescriptorProvider>>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read definitions file: {}", self.path.display()))?;
        let definitions: UnitDefinitions = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse definitions file: {}", self.path.display()))?;
        definitions
            .validate()
            .with_context(|| format!("Invalid definitions file: {}", self.path.display()))?;

        Ok(definitions
            .modules
            .into_iter()
            .map(|definition| Arc::new(DefinedDescriptor { definition }) as Arc<dyn DescriptorProvider>)
            .collect())
    }
}

/// Descriptor provider realized from a definitions-file entry.
struct DefinedDescriptor {
    definition: ModuleDefinition,
}

impl DescriptorProvider for DefinedDescriptor {
    fn name(&self) -> &str {
        &self.definition.name
    }

    fn build(&self, context: &BuildContext) -> BuildOutcome {
        match self.definition.kind {
            DescriptorKind::Module => {}
            DescriptorKind::Program | DescriptorKind::Target => return BuildOutcome::NotApplicable,
        }

        if let Some(platforms) = &self.definition.supported_platforms
            && !platforms.iter().any(|platform| platform == &context.platform)
        {
            return BuildOutcome::Failed(format!(
                "platform '{}' is not supported (supported: {})",
                context.platform,
                platforms.join(", ")
            ));
        }

        BuildOutcome::Built(
            ModuleManifest::new(&self.definition.name)
                .with_public(self.definition.public_dependencies.iter().cloned())
                .with_private(self.definition.private_dependencies.iter().cloned()),
        )
    }
}

/// Collect every `*.modules.json` directly under `root` as a unit source,
/// in lexicographic unit-name order so discovery order does not depend on
/// directory iteration order.
pub fn load_units(root: &Path) -> Result<Vec<DefinitionsUnit>> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("Failed to read definitions directory: {}", root.display()))?;

    let mut units = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read definitions directory: {}", root.display()))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some(unit_name) = file_name.strip_suffix(DEFINITIONS_SUFFIX) else {
            continue;
        };
        units.push(DefinitionsUnit::new(unit_name, entry.path()));
    }
    units.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(units)
}
