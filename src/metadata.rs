use std::collections::HashMap;

use anyhow::Context;

use cargo_metadata::Package;

use serde::Deserialize;

use serde_json::Value;

/// Contents of the `[package.metadata.bundle-launcher]` section in a `Cargo.toml`.
///
/// # Example
///
/// ```toml
/// [package.metadata.bundle-launcher]
/// entrypoint = "bitmask"
/// launcher-name = "bitmask-launcher"
/// ```
#[derive(PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BundleMetadata {
    entrypoint: Option<String>,
    launcher_name: Option<String>,
}

impl BundleMetadata {
    /// Parses the bundle metadata from a [`Package`] and use default values if not set
    pub fn from_package_with_default(package: &Package) -> anyhow::Result<Self> {
        Ok(Self::from_value(&package.metadata)?.unwrap_or_default())
    }

    /// Interprets a [`Value`] as a [`BundleMetadata`].
    pub fn from_value(value: &Value) -> anyhow::Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }

        let mut metadata: HashMap<String, Value> = serde_json::from_value(value.clone())?;
        let Some(metadata) = metadata.remove("bundle-launcher") else {
            return Ok(None);
        };

        let metadata = serde_json::from_value(metadata)
            .context("Invalid `[package.metadata.bundle-launcher]` section")?;

        Ok(Some(metadata))
    }

    /// Name of the application in the `lib` directory of the bundle
    pub fn entrypoint(&self) -> Option<&str> {
        self.entrypoint.as_deref()
    }

    /// Name of the launcher at the root of the bundle
    pub fn launcher_name(&self) -> Option<&str> {
        self.launcher_name.as_deref()
    }
}

/// Checks that `name` can be used as a file name inside the bundle.
pub fn validate_file_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty() || name == "." || name == ".." {
        anyhow::bail!("`{name}` is not a valid file name");
    }
    if name.contains(['/', '\\', '\0']) {
        anyhow::bail!("`{name}` must be a file name, not a path");
    }

    Ok(())
}
