use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The ambient build configuration passed to every descriptor build.
///
/// The graph pipeline treats this as an opaque, read-only value: it is
/// handed unchanged to each [`DescriptorProvider`](crate::registry::DescriptorProvider)
/// and never inspected by the core itself. Individual descriptors are free
/// to gate on any of its fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildContext {
    /// Name of the target being built (e.g. "Game", "Editor").
    #[serde(default = "default_target")]
    pub target: String,

    /// Platform the build is aimed at (e.g. "Win64", "Linux").
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Build configuration (e.g. "Development", "Shipping").
    #[serde(default = "default_configuration")]
    pub configuration: String,

    /// Free-form key/value definitions (compile defines, feature switches).
    #[serde(default)]
    pub definitions: BTreeMap<String, String>,
}

fn default_target() -> String {
    "Game".to_string()
}

fn default_platform() -> String {
    "Win64".to_string()
}

fn default_configuration() -> String {
    "Development".to_string()
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            target: default_target(),
            platform: default_platform(),
            configuration: default_configuration(),
            definitions: BTreeMap::new(),
        }
    }
}
