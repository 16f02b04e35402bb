use std::path::PathBuf;

use clap::ColorChoice;

#[derive(clap::Parser)]
#[command(name = "cargo", bin_name = "cargo")]
pub enum Cargo {
    #[command(name = "bundle-launcher", version, author, about, long_about)]
    BundleLauncher(Args),
}

#[derive(clap::Args)]
pub struct Args {
    /// Build for the target triple
    #[clap(long, value_name = "TRIPLE")]
    pub target: Option<String>,

    /// Build only the specified binary of the package
    #[clap(long, value_name = "NAME")]
    pub bin: Option<String>,

    /// Name given to the application inside the `lib` directory of the bundle
    /// [default: `entrypoint` from the package metadata, or the name of the binary]
    #[clap(long, value_name = "NAME")]
    pub entrypoint: Option<String>,

    /// Name of the launcher at the root of the bundle
    /// [default: `launcher-name` from the package metadata, or the name of the package]
    #[clap(long, value_name = "NAME")]
    pub launcher_name: Option<String>,

    /// Specify the version of the launcher to use
    #[clap(long, value_name = "VERSION", default_value = "0.1")]
    pub launcher_version: String,

    /// Build artifacts with the specified profile
    #[clap(long, value_name = "PROFILE-NAME", default_value = "release")]
    pub profile: String,

    /// Color preferences for program output
    #[clap(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Directory where the bundles are assembled (one subdirectory per package)
    #[clap(long, value_name = "PATH")]
    pub out_dir: Option<PathBuf>,

    #[command(flatten)]
    pub manifest: clap_cargo::Manifest,

    #[command(flatten)]
    pub workspace: clap_cargo::Workspace,

    #[command(flatten)]
    pub features: clap_cargo::Features,

    /// Arguments given to cargo build
    #[clap(raw = true)]
    pub args: Vec<String>,
}
