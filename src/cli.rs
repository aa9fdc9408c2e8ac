use crate::dispatcher::{Dispatcher, Mode};
use crate::error::DispatchError;
use crate::source_file::SourceFile;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::io::Write;

#[derive(FromArgs, Debug, PartialEq)]
/// Compile and/or run your code files.
/// Without a mode the file is run, compiling it first if needed.
pub struct Args {
    #[argh(switch, short = 'c')]
    /// compile the file instead of running it.
    pub compile: bool,

    #[argh(switch, short = 'r')]
    /// run the file (default).
    pub run: bool,

    #[argh(positional)]
    /// source file, script or binary to handle.
    pub file: String,

    #[argh(positional)]
    /// compile|c or run|r; an empty value means run.
    pub mode: Option<String>,
}

impl Args {
    /// The single mode selected by switches and the mode token.
    ///
    /// Returns `None` for an unknown token or when selections disagree.
    pub fn mode(&self) -> Option<Mode> {
        let mut selected = Vec::new();
        if self.compile {
            selected.push(Mode::Compile);
        }
        if self.run {
            selected.push(Mode::Run);
        }
        if let Some(token) = &self.mode {
            selected.push(parse_mode(token)?);
        }
        match selected.split_first() {
            None => Some(Mode::default()),
            Some((first, rest)) if rest.iter().all(|m| m == first) => Some(*first),
            Some(_) => None,
        }
    }
}

/// Parse a mode token as accepted after the filename.
pub fn parse_mode(token: &str) -> Option<Mode> {
    match token {
        "compile" | "c" | "-c" | "--compile" => Some(Mode::Compile),
        "" | "run" | "r" | "-r" | "--run" => Some(Mode::Run),
        _ => None,
    }
}

/// Two-line usage message printed on any argument error.
pub fn usage(command_name: &str) -> String {
    format!(
        "Usage: {command_name} <filename> [compile|c|-c|--compile | run|r|-r|--run]\n\
         Compile and/or run your code files; the mode defaults to run.\n"
    )
}

/// Entry point shared by the binary and tests.
///
/// Parses `args`, dispatches through `dispatcher` and returns the status the
/// process should exit with: 0 on success, the child's exit code when it
/// failed with one in `1..=255`, and 1 for every other failure.
pub fn run(
    command_name: &str,
    args: &[&str],
    dispatcher: &Dispatcher,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> u8 {
    let parsed = match Args::from_args(&[command_name], args) {
        Ok(parsed) => parsed,
        Err(EarlyExit { output, status }) => {
            return match status {
                Ok(()) => {
                    let _ = write!(stdout, "{output}");
                    0
                }
                Err(()) => {
                    log::debug!("invalid arguments: {}", output.trim_end());
                    let _ = write!(stderr, "{}", usage(command_name));
                    1
                }
            };
        }
    };
    let Some(mode) = parsed.mode() else {
        let _ = write!(stderr, "{}", usage(command_name));
        return 1;
    };

    match execute(dispatcher, &parsed.file, mode) {
        Ok(()) => 0,
        Err(err) => {
            let _ = writeln!(stderr, "{err:#}");
            exit_status(&err)
        }
    }
}

fn execute(dispatcher: &Dispatcher, path: &str, mode: Mode) -> Result<()> {
    let file = SourceFile::new(path);
    log::debug!("{mode} request for\n{file}");
    dispatcher
        .dispatch(&file, mode)
        .with_context(|| format!("{mode} {path}"))
}

fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<DispatchError>()
        .and_then(DispatchError::child_exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|&code| code != 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Invocation, Launcher};
    use crate::error::ProcessError;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Launcher that counts calls and exits with a fixed code.
    struct FixedLauncher {
        code: i32,
        calls: Rc<Cell<usize>>,
    }

    impl Launcher for FixedLauncher {
        fn launch(&self, invocation: &Invocation) -> Result<(), ProcessError> {
            self.calls.set(self.calls.get() + 1);
            if self.code == 0 {
                Ok(())
            } else {
                Err(ProcessError::Exited {
                    program: invocation.program().to_string_lossy().into_owned(),
                    code: self.code,
                })
            }
        }
    }

    struct Outcome {
        status: u8,
        calls: usize,
        stdout: String,
        stderr: String,
    }

    fn run_with(code: i32, args: &[&str]) -> Outcome {
        let calls = Rc::new(Cell::new(0));
        let dispatcher = Dispatcher::new(Box::new(FixedLauncher {
            code,
            calls: calls.clone(),
        }));
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = run("coderun", args, &dispatcher, &mut stdout, &mut stderr);
        Outcome {
            status,
            calls: calls.get(),
            stdout: String::from_utf8(stdout).unwrap(),
            stderr: String::from_utf8(stderr).unwrap(),
        }
    }

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["coderun"], args).unwrap()
    }

    #[test]
    fn test_mode_defaults_to_run() {
        assert_eq!(parse(&["script.py"]).mode(), Some(Mode::Run));
        assert_eq!(parse(&["script.py", ""]).mode(), Some(Mode::Run));
    }

    #[test]
    fn test_mode_tokens() {
        for token in ["compile", "c"] {
            assert_eq!(parse(&["hello.c", token]).mode(), Some(Mode::Compile));
        }
        for token in ["run", "r"] {
            assert_eq!(parse(&["hello.c", token]).mode(), Some(Mode::Run));
        }
        assert_eq!(parse(&["hello.c", "build"]).mode(), None);
    }

    #[test]
    fn test_mode_switches() {
        assert_eq!(parse(&["hello.c", "-c"]).mode(), Some(Mode::Compile));
        assert_eq!(parse(&["hello.c", "--compile"]).mode(), Some(Mode::Compile));
        assert_eq!(parse(&["hello.c", "-r"]).mode(), Some(Mode::Run));
        assert_eq!(parse(&["hello.c", "--run"]).mode(), Some(Mode::Run));
        assert_eq!(parse(&["-c", "hello.c", "compile"]).mode(), Some(Mode::Compile));
        assert_eq!(parse(&["hello.c", "-c", "-r"]).mode(), None);
        assert_eq!(parse(&["hello.c", "-r", "compile"]).mode(), None);
    }

    #[test]
    fn test_parse_mode_accepts_dashed_tokens() {
        assert_eq!(parse_mode("-c"), Some(Mode::Compile));
        assert_eq!(parse_mode("--run"), Some(Mode::Run));
        assert_eq!(parse_mode("--build"), None);
    }

    #[test]
    fn test_unknown_mode_prints_usage() {
        let outcome = run_with(0, &["hello.c", "build"]);
        assert_eq!(outcome.status, 1);
        assert_eq!(outcome.calls, 0);
        assert_eq!(outcome.stderr, usage("coderun"));
        assert_eq!(outcome.stderr.lines().count(), 2);
    }

    #[test]
    fn test_missing_file_prints_usage() {
        let outcome = run_with(0, &[]);
        assert_eq!(outcome.status, 1);
        assert_eq!(outcome.stderr, usage("coderun"));
    }

    #[test]
    fn test_unknown_switch_prints_usage() {
        let outcome = run_with(0, &["hello.c", "--fast"]);
        assert_eq!(outcome.status, 1);
        assert_eq!(outcome.calls, 0);
        assert_eq!(outcome.stderr, usage("coderun"));
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let outcome = run_with(0, &["--help"]);
        assert_eq!(outcome.status, 0);
        assert!(outcome.stdout.contains("Compile and/or run your code files."));
        assert!(outcome.stderr.is_empty());
    }

    #[test]
    fn test_success_exits_zero() {
        let outcome = run_with(0, &["script.py"]);
        assert_eq!(outcome.status, 0);
        assert_eq!(outcome.calls, 1);
        assert!(outcome.stderr.is_empty());
    }

    #[test]
    fn test_unsupported_file_exits_one_without_launching() {
        let outcome = run_with(0, &["a.rs"]);
        assert_eq!(outcome.status, 1);
        assert_eq!(outcome.calls, 0);
        assert!(outcome.stderr.starts_with("run a.rs: not a valid file type \"rs\""));
        assert!(outcome.stderr.contains("[Supported] binary, C, Go, Python, Lua, Ruby"));
    }

    #[test]
    fn test_child_exit_code_is_forwarded() {
        let outcome = run_with(3, &["script.py"]);
        assert_eq!(outcome.status, 3);
        assert_eq!(outcome.stderr, "run script.py: python: exit status 3\n");
    }

    #[test]
    fn test_out_of_range_exit_code_becomes_one() {
        assert_eq!(run_with(-1, &["script.py"]).status, 1);
        assert_eq!(run_with(300, &["script.py"]).status, 1);
    }

    #[test]
    fn test_compile_mode_reaches_compiler() {
        let outcome = run_with(0, &["hello.c", "compile"]);
        assert_eq!(outcome.status, 0);
        assert_eq!(outcome.calls, 1);
    }
}
