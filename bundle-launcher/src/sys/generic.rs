use std::convert::Infallible;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::Host;
use crate::launcher::{ExecTarget, System};

impl System for Host {
    fn current_exe(&self) -> io::Result<PathBuf> {
        super::current_exe()
    }

    fn set_current_dir(&self, dir: &Path) -> io::Result<()> {
        std::env::set_current_dir(dir)
    }

    fn log(&self, line: &str) {
        super::log(line)
    }

    // The process image cannot be replaced here, so the entrypoint runs as a child
    // and its exit code becomes ours. Argument zero cannot be chosen.
    fn exec(&self, target: &ExecTarget, args: &[OsString]) -> io::Result<Infallible> {
        let status = Command::new(target.as_os_str())
            .args(args.iter().skip(1))
            .status()?;

        proc_exit::Code::from_status(status).process_exit()
    }
}
