use std::convert::Infallible;
use std::ffi::{CString, OsString};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use nix::unistd::{execv, execvp};

use super::Host;
use crate::launcher::{ExecTarget, System};

fn to_cstring(arg: &std::ffi::OsStr) -> io::Result<CString> {
    CString::new(arg.as_bytes()).map_err(Into::into)
}

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

    fn exec(&self, target: &ExecTarget, args: &[OsString]) -> io::Result<Infallible> {
        let program = to_cstring(target.as_os_str())?;
        let args = args
            .iter()
            .map(|arg| to_cstring(arg))
            .collect::<io::Result<Vec<CString>>>()?;

        // The environment is inherited from `environ`
        let result = match target {
            ExecTarget::Bundled(_) => execv(&program, &args),
            ExecTarget::Search(_) => execvp(&program, &args),
        };

        result.map_err(io::Error::from)
    }
}
