use std::ffi::OsString;
use std::fmt;
use std::io;

use crate::path::CapacityExceeded;

/// Exit code used when the entrypoint cannot be found
pub const NOT_FOUND: proc_exit::Code = proc_exit::Code::new(127);

/// Exit code used when the entrypoint exists but cannot be executed
pub const NOT_EXECUTABLE: proc_exit::Code = proc_exit::Code::new(126);

/// Errors that stop the launcher before the entrypoint takes over the process.
#[derive(Debug)]
pub enum LaunchError {
    /// The OS could not tell the path of the running executable
    CurrentExe(io::Error),

    /// The OS returned an empty path for the running executable
    EmptyCurrentExe,

    /// The path of the running executable does not fit in the path capacity
    CurrentExeTooLong(CapacityExceeded),

    /// The `lib` directory path does not fit in the path capacity
    LibDirTooLong(CapacityExceeded),

    /// Replacing the process image with the entrypoint failed
    Exec {
        /// The program given to the OS
        program: OsString,

        /// Why the OS refused to execute it
        source: io::Error,
    },
}

impl LaunchError {
    /// Returns the process exit code matching this error.
    pub fn code(&self) -> proc_exit::Code {
        match self {
            Self::Exec { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => NOT_FOUND,
                io::ErrorKind::PermissionDenied => NOT_EXECUTABLE,
                _ => proc_exit::Code::FAILURE,
            },
            _ => proc_exit::Code::FAILURE,
        }
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentExe(e) => write!(f, "failed to resolve the path of the launcher: {e}"),
            Self::EmptyCurrentExe => f.write_str("the path of the launcher is empty"),
            Self::CurrentExeTooLong(e) => write!(f, "the path of the launcher is too long: {e}"),
            Self::LibDirTooLong(e) => write!(f, "the path of the lib directory is too long: {e}"),
            Self::Exec { program, source } => {
                write!(f, "failed to execute `{}`: {source}", program.to_string_lossy())
            }
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CurrentExe(e) | Self::Exec { source: e, .. } => Some(e),
            Self::CurrentExeTooLong(e) | Self::LibDirTooLong(e) => Some(e),
            Self::EmptyCurrentExe => None,
        }
    }
}

impl From<LaunchError> for proc_exit::Exit {
    fn from(error: LaunchError) -> Self {
        error.code().with_message(format!("error: {error}"))
    }
}
