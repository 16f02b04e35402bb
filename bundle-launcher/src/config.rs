/// Name of the directory, next to the launcher, that holds the entrypoint and its libraries
pub const LIB_DIR: &str = "lib";

/// Maximum length in bytes of the paths derived by the launcher
pub const MAX_PATH_LEN: usize = 1024;

/// Fixed names the launcher works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    entrypoint: &'static str,
    program_name: &'static str,
    lib_dir: &'static str,
    max_path_len: usize,
}

impl LauncherConfig {
    /// Creates a configuration that executes `entrypoint` and uses it as argument zero.
    pub const fn new(entrypoint: &'static str) -> Self {
        Self {
            entrypoint,
            program_name: entrypoint,
            lib_dir: LIB_DIR,
            max_path_len: MAX_PATH_LEN,
        }
    }

    /// Uses `program_name` as argument zero instead of the entrypoint name.
    pub const fn with_program_name(mut self, program_name: &'static str) -> Self {
        self.program_name = program_name;
        self
    }

    /// Overrides [`MAX_PATH_LEN`].
    pub const fn with_max_path_len(mut self, max_path_len: usize) -> Self {
        self.max_path_len = max_path_len;
        self
    }

    /// Configuration compiled into this crate (see `BUNDLE_LAUNCHER_ENTRYPOINT`).
    pub const fn compiled() -> Self {
        Self::new(crate::ENTRYPOINT).with_program_name(crate::PROGRAM_NAME)
    }

    /// Name of the program to execute
    pub fn entrypoint(&self) -> &'static str {
        self.entrypoint
    }

    /// Value of argument zero given to the entrypoint
    pub fn program_name(&self) -> &'static str {
        self.program_name
    }

    /// Name of the directory containing the entrypoint
    pub fn lib_dir(&self) -> &'static str {
        self.lib_dir
    }

    /// Maximum length in bytes of a derived path
    pub fn max_path_len(&self) -> usize {
        self.max_path_len
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self::compiled()
    }
}
