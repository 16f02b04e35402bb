//! Launcher stub for relocatable bundles.
//!
//! A bundle ships the launcher at a stable location and the real program,
//! with its shared libraries, in a `lib` directory next to it:
//!
//! ```text
//! bundle/
//! ├── launcher
//! └── lib/
//!     ├── app
//!     └── libfoo.so
//! ```
//!
//! The launcher makes `lib` the working directory and executes `./app`, forwarding
//! its arguments with argument zero replaced by the program name.
//! The entrypoint name is fixed at build time with the `BUNDLE_LAUNCHER_ENTRYPOINT`
//! environment variable (`app` by default).

mod config;
mod error;
mod launcher;
mod path;
mod sys;

pub use config::{LauncherConfig, LIB_DIR, MAX_PATH_LEN};
pub use error::{LaunchError, NOT_EXECUTABLE, NOT_FOUND};
pub use launcher::{ExecTarget, Launcher, System};
pub use path::{BoundedPath, CapacityExceeded};
pub use sys::Host;

include!(concat!(env!("OUT_DIR"), "/entrypoint.rs"));

/// Runs the launcher with the configuration compiled into this crate.
///
/// Never returns: either the entrypoint replaces the process or the launcher
/// exits with an error message.
pub fn main() -> ! {
    let result = run();

    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    Launcher::new(LauncherConfig::compiled()).launch(&Host, std::env::args_os())?;

    Ok(())
}
