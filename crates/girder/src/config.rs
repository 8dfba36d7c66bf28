//! Application configuration loaded from a TOML file.

use serde::Deserialize;

use girder_core::ElementRule;

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Schema configuration section
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// Schema configuration section
///
/// Lets a project register rules for its own custom tasks so they are
/// checked like built-in ones instead of falling back to the permissive
/// unknown-task rule:
///
/// ```toml
/// [[schema.tasks]]
/// name = "NuGetPush"
/// attributes = [
///     { name = "PackagePath", required = true },
///     { name = "Source" },
/// ]
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SchemaConfig {
    /// Additional task rules merged into the built-in catalog.
    #[serde(default)]
    pub tasks: Vec<ElementRule>,
}
