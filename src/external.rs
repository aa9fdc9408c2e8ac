use crate::command::{ExitCode, Invocation, Launcher};
use crate::env::Environment;
use crate::error::ProcessError;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Launcher that starts real child processes.
///
/// Children inherit stdin, stdout and stderr, so compiler diagnostics and
/// interactive programs behave as if started directly from the terminal.
/// The call blocks until the child exits.
pub struct ProcessLauncher {
    env: Environment,
}

impl ProcessLauncher {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    fn resolve(&self, program: &OsStr) -> Option<PathBuf> {
        let search_paths = self.env.get_var("PATH").unwrap_or_default();
        find_command_path(
            search_paths,
            &self.env.current_dir,
            Path::new(program),
        )
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new(Environment::new())
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, invocation: &Invocation) -> Result<(), ProcessError> {
        let program = invocation.program().to_string_lossy().into_owned();
        let executable = self
            .resolve(invocation.program())
            .ok_or_else(|| ProcessError::NotFound {
                program: program.clone(),
            })?;
        log::debug!("launching {invocation} as {}", executable.display());

        let exit_status = Command::new(&executable)
            .args(invocation.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(&self.env.vars)
            .current_dir(&self.env.current_dir)
            .status()
            .map_err(|source| ProcessError::Spawn {
                program: program.clone(),
                source,
            })?;

        let code = match exit_status.code() {
            Some(x) => x,
            None => terminated_by_signal(exit_status),
        };
        log::debug!("{program} exited with {code}");
        if code == 0 {
            Ok(())
        } else {
            Err(ProcessError::Exited { program, code })
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve a program path the way a typical shell would.
///
/// Behavior:
/// - Absolute path: returns it if it is a file.
/// - Relative with multiple components (e.g., `./hello` or `bin/sh`): resolved
///   against `current_dir`, returned if it is a file.
/// - Single path component: searched in each directory of `search_paths` (PATH).
///   On non-Unix platforms `current_dir` is tried first.
/// - Empty path: returns `None`.
///
/// Relative results are always joined onto `current_dir`, so the returned path
/// stays valid once the child is started in that directory.
pub fn find_command_path(search_paths: &OsStr, current_dir: &Path, path: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        return find_by_path(path.to_owned());
    }

    let mut components = path.components();
    match (components.next(), components.next()) {
        (None, _) => None,
        (Some(Component::Normal(name)), None) => {
            if cfg!(not(unix)) {
                if let Some(local) = find_by_path(current_dir.join(name)) {
                    return Some(local);
                }
            }
            find_in_path(search_paths, current_dir, name)
        }
        _ => find_by_path(current_dir.join(path)),
    }
}

fn find_in_path(search_paths: &OsStr, current_dir: &Path, cmd: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .filter(|dir| !dir.as_os_str().is_empty())
        .find_map(|dir| find_by_path(current_dir.join(dir).join(cmd)))
}

fn find_by_path(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() { Some(path) } else { None }
}
