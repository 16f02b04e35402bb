use std::path::PathBuf;

use escargot::error::CargoError;
use escargot::CommandMessages;

/// An executable built by Cargo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    /// Name of the binary target
    pub name: String,

    pub path: PathBuf,
}

pub trait CommandMessagesExt {
    /// Collects the executables from the stream of messages from Cargo while printing rustc messages.
    fn executables(self) -> Result<Vec<Executable>, CargoError>;
}

impl CommandMessagesExt for CommandMessages {
    fn executables(self) -> Result<Vec<Executable>, CargoError> {
        self.into_iter()
            .filter_map(|message| {
                let message = match message {
                    Ok(message) => message,
                    Err(e) => return Some(Err(e)),
                };
                match message.decode() {
                    Ok(escargot::format::Message::CompilerArtifact(artifact)) => {
                        let path = artifact.executable.as_deref()?.to_owned();

                        Some(Ok(Executable {
                            name: artifact.target.name.into_owned(),
                            path,
                        }))
                    }
                    Ok(escargot::format::Message::CompilerMessage(e)) => {
                        if let Some(rendered) = e.message.rendered {
                            eprint!("{rendered}");
                        }

                        None
                    }
                    // Build scripts and finished messages
                    Ok(_) => None,
                    Err(e) => Some(Err(e)),
                }
            })
            .collect()
    }
}

/// Picks the executable to bundle among the ones produced by a build.
///
/// With `bin` set, the executable with this name is returned, otherwise the build
/// must have produced exactly one executable.
pub fn select_executable(
    executables: Vec<Executable>,
    bin: Option<&str>,
) -> anyhow::Result<Executable> {
    if let Some(bin) = bin {
        return executables
            .into_iter()
            .find(|executable| executable.name == bin)
            .ok_or_else(|| anyhow::anyhow!("No binary named `{bin}` was built"));
    }

    let mut executables = executables.into_iter();
    match (executables.next(), executables.next()) {
        (Some(executable), None) => Ok(executable),
        (None, _) => anyhow::bail!("Failed to find a binary"),
        (Some(_), Some(_)) => {
            anyhow::bail!("The package has several binaries, use `--bin` to choose one")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{select_executable, Executable};

    fn executable(name: &str) -> Executable {
        Executable {
            name: name.into(),
            path: format!("/target/release/{name}").into(),
        }
    }

    #[test]
    fn select_single() {
        assert_eq!(
            select_executable(vec![executable("app")], None).unwrap(),
            executable("app")
        );
    }

    #[test]
    fn select_none() {
        select_executable(Vec::new(), None).unwrap_err();
        select_executable(Vec::new(), Some("app")).unwrap_err();
    }

    #[test]
    fn select_ambiguous() {
        let executables = vec![executable("app"), executable("helper")];
        select_executable(executables.clone(), None).unwrap_err();
        assert_eq!(
            select_executable(executables, Some("helper")).unwrap(),
            executable("helper")
        );
    }

    #[test]
    fn select_unknown_bin() {
        select_executable(vec![executable("app")], Some("bitmask")).unwrap_err();
    }
}
