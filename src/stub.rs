use std::path::{Path, PathBuf};

use anyhow::Context;

use escargot::CargoBuild;

use crate::cargo::{select_executable, CommandMessagesExt};

/// Builds launcher stubs, one per entrypoint name
pub struct LauncherBuilder {
    target_dir: PathBuf,
    manifest_path: PathBuf,
}

impl LauncherBuilder {
    /// Generates the sources of the crate to build the launcher
    pub fn generate_crate_sources(
        target_dir: PathBuf,
        launcher_version: &str,
    ) -> anyhow::Result<Self> {
        let root_directory = target_dir.join("package-launcher");
        let src_directory = root_directory.join("src");
        let manifest_path = root_directory.join("Cargo.toml");
        let main_path = src_directory.join("main.rs");
        let local_launcher_dependency =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("bundle-launcher");

        let dependency = if local_launcher_dependency.exists() {
            let local_launcher_dependency = local_launcher_dependency
                .to_string_lossy()
                .replace('\\', "/");
            format!(
                r#"bundle-launcher = {{ version = "{launcher_version}", path = "{local_launcher_dependency}" }}"#,
            )
        } else {
            format!(r#"bundle-launcher = "{launcher_version}""#)
        };

        let manifest = format!(
            r#"
        [package]
        name = "package-launcher"
        version = "0.1.0"
        edition = "2021"

        [dependencies]
        {dependency}

        [profile.release]
        lto = true
        strip = "symbols"
        opt-level = "z"
        codegen-units = 1
        panic = "abort"

        [workspace]
        "#
        );
        let main = b"
        fn main() {
            bundle_launcher::main()
        }
        ";

        std::fs::create_dir_all(&src_directory).with_context(|| {
            format!("Failed to create directory `{}`", src_directory.display())
        })?;
        std::fs::write(&manifest_path, manifest)
            .with_context(|| format!("Failed to write to `{}`", manifest_path.display()))?;
        std::fs::write(&main_path, main)
            .with_context(|| format!("Failed to write to `{}`", main_path.display()))?;

        Ok(Self {
            target_dir,
            manifest_path,
        })
    }

    /// Builds a launcher that executes `entrypoint` and returns the path of the executable
    pub fn build(&self, target: Option<&str>, entrypoint: &str) -> anyhow::Result<PathBuf> {
        // Launchers for different entrypoints must not share a target directory
        let target_dir = self.target_dir.join("launchers").join(entrypoint);
        let cargo = CargoBuild::new()
            .release()
            .target_dir(target_dir)
            .manifest_path(&self.manifest_path)
            .env("BUNDLE_LAUNCHER_ENTRYPOINT", entrypoint);

        let cargo = match target {
            Some(target) => cargo.target(target),
            None => cargo,
        };

        let executables = cargo
            .exec()
            .context("Failed to execute cargo to build the launcher")?
            .executables()?;

        let executable = select_executable(executables, None)
            .context("Failed to build the launcher")?;

        Ok(executable.path)
    }
}
