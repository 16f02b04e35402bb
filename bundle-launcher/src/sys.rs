use std::io::Write;
use std::path::PathBuf;

/// [`System`](crate::System) backed by the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct Host;

#[cfg(target_os = "linux")]
fn current_exe() -> std::io::Result<PathBuf> {
    std::fs::read_link("/proc/self/exe")
}

#[cfg(not(target_os = "linux"))]
fn current_exe() -> std::io::Result<PathBuf> {
    std::env::current_exe()
}

fn log(line: &str) {
    let _ = writeln!(std::io::stderr().lock(), "{line}");
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod unix;
    } else {
        mod generic;
    }
}
