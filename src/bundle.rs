use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use cargo_metadata::{Metadata, Package};

use clap::ColorChoice;

use console::style;

use escargot::CargoBuild;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cargo::{select_executable, CommandMessagesExt};
use crate::cli::Args;
use crate::metadata::{validate_file_name, BundleMetadata};
use crate::stub::LauncherBuilder;

/// Name of the directory, next to the launcher, where the application is copied
const LIB_DIR: &str = "lib";

/// Where each part of a bundle goes
#[derive(Debug, PartialEq, Eq)]
pub struct Layout {
    /// Root directory of the bundle
    pub root: PathBuf,

    /// Path of the launcher stub
    pub launcher: PathBuf,

    /// Path of the application, inside the `lib` directory
    pub entrypoint: PathBuf,
}

impl Layout {
    pub fn new(root: PathBuf, launcher_name: &str, entrypoint: &str) -> Self {
        let launcher = root.join(format!("{launcher_name}{}", std::env::consts::EXE_SUFFIX));
        let entrypoint = root.join(LIB_DIR).join(entrypoint);

        Self {
            root,
            launcher,
            entrypoint,
        }
    }
}

/// Assembles relocatable bundles: an application in a `lib` directory and a launcher next to it
pub struct Bundler {
    metadata: Metadata,
    target: Option<String>,
    launcher: LauncherBuilder,
    workspace: clap_cargo::Workspace,
    out_dir: PathBuf,
    features: clap_cargo::Features,
    bin: Option<String>,
    entrypoint: Option<String>,
    launcher_name: Option<String>,
    progress_style: ProgressStyle,
    profile: String,
    cargo_args: Vec<String>,
}

impl Bundler {
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        if let Some(entrypoint) = args.entrypoint.as_deref() {
            validate_file_name(entrypoint).context("Invalid entrypoint")?;
        }
        if let Some(launcher_name) = args.launcher_name.as_deref() {
            validate_file_name(launcher_name).context("Invalid launcher name")?;
        }

        let metadata = args
            .manifest
            .metadata()
            .exec()
            .context("Failed to execute `cargo metadata`")?;

        let target_dir = metadata
            .target_directory
            .join(clap::crate_name!())
            .into_std_path_buf();

        let launcher =
            LauncherBuilder::generate_crate_sources(target_dir.clone(), &args.launcher_version)
                .context("Failed to generate the source files of the launcher")?;

        let out_dir = args.out_dir.unwrap_or_else(|| target_dir.join("bundles"));

        let progress_style =
            ProgressStyle::with_template("{prefix:>12.cyan.bold} {wide_msg} {spinner}")?;

        if args.color == ColorChoice::Never {
            console::set_colors_enabled(false);
        } else if args.color == ColorChoice::Always {
            console::set_colors_enabled(true);
        }

        Ok(Self {
            metadata,
            target: args.target,
            launcher,
            workspace: args.workspace,
            out_dir,
            features: args.features,
            bin: args.bin,
            entrypoint: args.entrypoint,
            launcher_name: args.launcher_name,
            progress_style,
            profile: args.profile,
            cargo_args: args.args,
        })
    }

    /// Shows a spinner until [`ProgressBar::finish_and_clear()`] is called
    fn spinner(&self, prefix: &'static str, message: String) -> ProgressBar {
        let progress = ProgressBar::new_spinner()
            .with_style(self.progress_style.clone())
            .with_prefix(prefix)
            .with_message(message);
        progress.enable_steady_tick(Duration::from_millis(200));

        progress
    }

    /// Builds the application of a package and returns the path of its executable
    fn build_application(&self, package: &Package) -> anyhow::Result<PathBuf> {
        let manifest_path = package.manifest_path.as_std_path();
        let features_list = self.features.features.join(" ");

        let cargo = CargoBuild::new()
            .arg(format!("--profile={}", self.profile))
            .manifest_path(manifest_path)
            .args(&self.cargo_args);

        let cargo = match self.target.as_deref() {
            Some(target) => cargo.target(target),
            None => cargo,
        };

        let cargo = match self.bin.as_deref() {
            Some(bin) => cargo.bin(bin),
            None => cargo,
        };

        let cargo = if self.features.all_features {
            cargo.all_features()
        } else if self.features.no_default_features {
            cargo.no_default_features()
        } else {
            cargo.features(&features_list)
        };

        let progress = self.spinner("Compiling", format!("{} v{}", package.name, package.version));
        let executables = cargo.exec().and_then(CommandMessagesExt::executables);
        progress.finish_and_clear();

        let executable = select_executable(executables?, self.bin.as_deref())?;

        Ok(executable.path)
    }

    /// Decides where each part of the bundle of `package` goes
    fn layout(&self, package: &Package, application: &Path) -> anyhow::Result<Layout> {
        let metadata = BundleMetadata::from_package_with_default(package)
            .context("Failed to parse package's metadata")?;

        let entrypoint = match (self.entrypoint.as_deref(), metadata.entrypoint()) {
            (Some(entrypoint), _) | (None, Some(entrypoint)) => entrypoint.to_owned(),
            (None, None) => application
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    anyhow::anyhow!("No file name in `{}`", application.display())
                })?,
        };
        validate_file_name(&entrypoint).context("Invalid entrypoint")?;

        let launcher_name = self
            .launcher_name
            .as_deref()
            .or(metadata.launcher_name())
            .unwrap_or(&package.name);
        validate_file_name(launcher_name).context("Invalid launcher name")?;

        Ok(Layout::new(
            self.out_dir.join(package.name.as_str()),
            launcher_name,
            &entrypoint,
        ))
    }

    fn bundle_package(&self, package: &Package) -> anyhow::Result<Layout> {
        let application = self.build_application(package)?;
        let layout = self.layout(package, &application)?;

        let lib_dir = layout.root.join(LIB_DIR);
        std::fs::create_dir_all(&lib_dir)
            .with_context(|| format!("Failed to create directory `{}`", lib_dir.display()))?;
        std::fs::copy(&application, &layout.entrypoint).with_context(|| {
            format!(
                "Failed to copy `{}` to `{}`",
                application.display(),
                layout.entrypoint.display()
            )
        })?;

        let entrypoint = layout
            .entrypoint
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let progress = self.spinner("Compiling", format!("launcher for `{entrypoint}`"));
        let launcher = self.launcher.build(self.target.as_deref(), &entrypoint);
        progress.finish_and_clear();
        let launcher = launcher?;

        std::fs::copy(&launcher, &layout.launcher).with_context(|| {
            format!(
                "Failed to copy `{}` to `{}`",
                launcher.display(),
                layout.launcher.display()
            )
        })?;

        Ok(layout)
    }

    pub fn build(&self) -> anyhow::Result<()> {
        let (selected_packages, _) = self.workspace.partition_packages(&self.metadata);

        let selected_packages: Vec<&Package> = selected_packages
            .into_iter()
            .filter(|package| package.targets.iter().any(|target| target.is_bin()))
            .collect();
        if selected_packages.is_empty() {
            anyhow::bail!(
                "No binary package detected. Only binaries can be bundled using cargo bundle-launcher."
            );
        }

        for selected_package in selected_packages {
            println!(
                "{:>12} {} v{} ({})",
                style("Bundling").bold().green(),
                selected_package.name,
                selected_package.version,
                self.metadata.workspace_root
            );

            let layout = self.bundle_package(selected_package)?;

            println!(
                "{:>12} {}",
                style("Entrypoint").bold().green(),
                layout.entrypoint.display()
            );
            println!(
                "{:>12} ({})",
                style("Finished").bold().green(),
                layout.launcher.display()
            );
        }

        Ok(())
    }
}
