use std::convert::Infallible;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::LauncherConfig;
use crate::error::LaunchError;
use crate::path::BoundedPath;

/// How the entrypoint is located when it is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecTarget {
    /// Path relative to the working directory (`./app`)
    Bundled(PathBuf),

    /// Bare name looked up through the executable search path (`PATH`)
    Search(OsString),
}

impl ExecTarget {
    /// Returns the program as given to the OS.
    pub fn as_os_str(&self) -> &OsStr {
        match self {
            Self::Bundled(path) => path.as_os_str(),
            Self::Search(name) => name,
        }
    }
}

/// Process-wide OS facilities used by the [`Launcher`].
pub trait System {
    /// Returns the path of the running executable.
    fn current_exe(&self) -> io::Result<PathBuf>;

    /// Changes the working directory of the process.
    fn set_current_dir(&self, dir: &Path) -> io::Result<()>;

    /// Writes one diagnostic line to the standard error.
    fn log(&self, line: &str);

    /// Replaces the process with `target`, giving it `args` (argument zero included).
    ///
    /// Only returns if the entrypoint could not be started.
    fn exec(&self, target: &ExecTarget, args: &[OsString]) -> io::Result<Infallible>;
}

/// Changes into the bundle's `lib` directory and executes the entrypoint.
#[derive(Debug, Clone)]
pub struct Launcher {
    config: LauncherConfig,
}

impl Launcher {
    /// Creates a launcher from its fixed names.
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration of this launcher.
    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Computes the `lib` directory next to the running executable.
    pub fn lib_dir(&self, system: &(impl System + ?Sized)) -> Result<BoundedPath, LaunchError> {
        let current_exe = system.current_exe().map_err(LaunchError::CurrentExe)?;
        if current_exe.as_os_str().is_empty() {
            return Err(LaunchError::EmptyCurrentExe);
        }

        let current_exe = BoundedPath::new(current_exe, self.config.max_path_len())
            .map_err(LaunchError::CurrentExeTooLong)?;

        current_exe
            .parent()
            .join(self.config.lib_dir())
            .map_err(LaunchError::LibDirTooLong)
    }

    /// Replaces argument zero by the program name, keeping the other arguments in order.
    pub fn forwarded_args(&self, args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
        std::iter::once(OsString::from(self.config.program_name()))
            .chain(args.into_iter().skip(1))
            .collect()
    }

    /// Runs the launcher.
    ///
    /// A failure to change the working directory is only logged: the entrypoint
    /// is then looked up through `PATH` instead of the `lib` directory.
    pub fn launch(
        &self,
        system: &(impl System + ?Sized),
        args: impl IntoIterator<Item = OsString>,
    ) -> Result<Infallible, LaunchError> {
        let lib_dir = self.lib_dir(system)?;

        let entrypoint = self.config.entrypoint();
        let target = match system.set_current_dir(lib_dir.as_path()) {
            Ok(()) => ExecTarget::Bundled(Path::new(".").join(entrypoint)),
            Err(e) => {
                system.log(&format!("error: {e}"));
                ExecTarget::Search(entrypoint.into())
            }
        };

        let args = self.forwarded_args(args);

        match system.exec(&target, &args) {
            Ok(never) => match never {},
            Err(source) => Err(LaunchError::Exec {
                program: target.as_os_str().to_owned(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::ffi::OsString;
    use std::io;
    use std::path::{Path, PathBuf};

    use crate::config::LauncherConfig;
    use crate::error::LaunchError;

    use super::{ExecTarget, Launcher, System};

    /// Records every call instead of touching the process
    #[derive(Default)]
    struct Recorder {
        current_exe: Option<PathBuf>,
        existing_dirs: Vec<PathBuf>,
        exec_error: Option<io::ErrorKind>,
        chdirs: RefCell<Vec<PathBuf>>,
        logs: RefCell<Vec<String>>,
        execs: RefCell<Vec<(ExecTarget, Vec<OsString>)>>,
    }

    impl Recorder {
        fn new(current_exe: &str) -> Self {
            Self {
                current_exe: Some(current_exe.into()),
                ..Default::default()
            }
        }

        fn with_dir(mut self, dir: &str) -> Self {
            self.existing_dirs.push(dir.into());
            self
        }
    }

    impl System for Recorder {
        fn current_exe(&self) -> io::Result<PathBuf> {
            self.current_exe
                .clone()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn set_current_dir(&self, dir: &Path) -> io::Result<()> {
            self.chdirs.borrow_mut().push(dir.to_path_buf());
            if self.existing_dirs.iter().any(|existing| existing == dir) {
                Ok(())
            } else {
                Err(io::Error::from(io::ErrorKind::NotFound))
            }
        }

        fn log(&self, line: &str) {
            self.logs.borrow_mut().push(line.to_owned());
        }

        fn exec(&self, target: &ExecTarget, args: &[OsString]) -> io::Result<Infallible> {
            self.execs
                .borrow_mut()
                .push((target.clone(), args.to_vec()));

            Err(io::Error::from(
                self.exec_error.unwrap_or(io::ErrorKind::Other),
            ))
        }
    }

    fn args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn forwarded_args_rewrite_argument_zero() {
        let launcher = Launcher::new(LauncherConfig::new("bitmask"));
        assert_eq!(
            launcher.forwarded_args(args(&["/opt/bundle/bin/launcher", "--flag", "value", ""])),
            args(&["bitmask", "--flag", "value", ""])
        );
    }

    #[test]
    fn forwarded_args_without_argument_zero() {
        let launcher = Launcher::new(LauncherConfig::new("app").with_program_name("Bitmask"));
        assert_eq!(launcher.forwarded_args(Vec::new()), args(&["Bitmask"]));
    }

    #[test]
    fn lib_dir_next_to_executable() {
        let launcher = Launcher::new(LauncherConfig::new("app"));
        let lib_dir = launcher.lib_dir(&Recorder::new("/a/b/c/binary")).unwrap();
        assert_eq!(lib_dir.as_path(), Path::new("/a/b/c/lib"));
    }

    #[test]
    fn launch_from_bundle() {
        let system = Recorder::new("/opt/bundle/bin/launcher").with_dir("/opt/bundle/bin/lib");
        let launcher = Launcher::new(LauncherConfig::new("bitmask"));

        let error = launcher
            .launch(&system, args(&["ignored", "--flag", "value"]))
            .unwrap_err();
        assert!(matches!(error, LaunchError::Exec { .. }));

        assert_eq!(
            system.chdirs.borrow().as_slice(),
            &[PathBuf::from("/opt/bundle/bin/lib")]
        );
        assert!(system.logs.borrow().is_empty());
        assert_eq!(
            system.execs.borrow().as_slice(),
            &[(
                ExecTarget::Bundled(PathBuf::from("./bitmask")),
                args(&["bitmask", "--flag", "value"])
            )]
        );
    }

    #[test]
    fn failed_chdir_still_executes() {
        let system = Recorder::new("/does/not/exist/launcher");
        let launcher = Launcher::new(LauncherConfig::new("app"));

        launcher.launch(&system, args(&["launcher", "x"])).unwrap_err();

        let logs = system.logs.borrow();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("error: "));
        assert_eq!(
            system.execs.borrow().as_slice(),
            &[(ExecTarget::Search("app".into()), args(&["app", "x"]))]
        );
    }

    #[test]
    fn exec_failure_is_reported() {
        let system = Recorder {
            exec_error: Some(io::ErrorKind::NotFound),
            ..Recorder::new("/opt/bundle/bin/launcher").with_dir("/opt/bundle/bin/lib")
        };
        let launcher = Launcher::new(LauncherConfig::new("bitmask"));

        let error = launcher.launch(&system, args(&["launcher"])).unwrap_err();
        assert_eq!(error.code(), crate::error::NOT_FOUND);
        assert_eq!(
            error.to_string(),
            format!(
                "failed to execute `./bitmask`: {}",
                io::Error::from(io::ErrorKind::NotFound)
            )
        );
    }

    #[test]
    fn unresolved_current_exe_stops_before_chdir() {
        let system = Recorder::default();
        let launcher = Launcher::new(LauncherConfig::new("app"));

        let error = launcher.launch(&system, args(&["launcher"])).unwrap_err();
        assert!(matches!(error, LaunchError::CurrentExe(_)));
        assert!(system.chdirs.borrow().is_empty());
        assert!(system.execs.borrow().is_empty());
    }

    #[test]
    fn empty_current_exe_stops_before_chdir() {
        let system = Recorder::new("");
        let launcher = Launcher::new(LauncherConfig::new("app"));

        let error = launcher.launch(&system, args(&["launcher"])).unwrap_err();
        assert!(matches!(error, LaunchError::EmptyCurrentExe));
        assert!(system.chdirs.borrow().is_empty());
        assert!(system.execs.borrow().is_empty());
    }

    #[test]
    fn long_current_exe_is_rejected() {
        let current_exe = format!("/{}/launcher", "a".repeat(4096));
        let system = Recorder::new(&current_exe);
        let launcher = Launcher::new(LauncherConfig::new("app"));

        let error = launcher.launch(&system, args(&["launcher"])).unwrap_err();
        assert!(matches!(error, LaunchError::CurrentExeTooLong(_)));
        assert!(system.chdirs.borrow().is_empty());
        assert!(system.execs.borrow().is_empty());
    }

    #[test]
    fn lib_dir_over_capacity_is_rejected() {
        // `/opt/bundle/x` fits in 13 bytes but `/opt/bundle/lib` does not
        let system = Recorder::new("/opt/bundle/x");
        let launcher = Launcher::new(LauncherConfig::new("app").with_max_path_len(13));

        let error = launcher.launch(&system, args(&["launcher"])).unwrap_err();
        assert!(matches!(error, LaunchError::LibDirTooLong(_)));
        assert!(system.chdirs.borrow().is_empty());
    }
}
