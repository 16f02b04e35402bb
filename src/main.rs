//! Cargo subcommand to assemble relocatable bundles.
//!
//! A bundle is made of the application, copied to `lib/<entrypoint>`, and of a launcher
//! stub next to the `lib` directory. The launcher changes into `lib` and executes the
//! entrypoint, so that the application finds its libraries and resources relative to
//! its working directory.
use clap::Parser;

mod bundle;
mod cargo;
mod cli;
mod metadata;
mod stub;

use crate::bundle::Bundler;
use crate::cli::Cargo;

fn main() -> anyhow::Result<()> {
    let Cargo::BundleLauncher(args) = Cargo::parse();

    let bundler = Bundler::from_args(args)?;
    bundler.build()?;

    Ok(())
}
