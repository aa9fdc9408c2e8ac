use crate::command::{Invocation, Launcher};
use crate::error::DispatchError;
use crate::external::ProcessLauncher;
use crate::source_file::{Language, SourceFile};
use std::fmt;
use std::path::Path;

/// What the user asked to do with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Compile,
    #[default]
    Run,
}

impl Mode {
    /// Human readable list of the file types this mode accepts.
    pub fn supported(self) -> &'static str {
        match self {
            Self::Compile => Language::COMPILABLE,
            Self::Run => Language::SUPPORTED,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compile => "compile",
            Self::Run => "run",
        })
    }
}

/// Maps a [`SourceFile`] to the external compiler or interpreter that handles it.
///
/// Every call starts at most one program at a time through the configured
/// [`Launcher`] and blocks until it exits.
///
/// Example
/// ```no_run
/// use coderun::{Dispatcher, SourceFile};
/// let dispatcher = Dispatcher::default();
/// dispatcher.run(&SourceFile::new("script.py")).unwrap();
/// ```
pub struct Dispatcher {
    launcher: Box<dyn Launcher>,
}

impl Dispatcher {
    pub fn new(launcher: Box<dyn Launcher>) -> Self {
        Self { launcher }
    }

    /// Compile or run `file` depending on `mode`.
    pub fn dispatch(&self, file: &SourceFile, mode: Mode) -> Result<(), DispatchError> {
        match mode {
            Mode::Compile => self.compile(file),
            Mode::Run => self.run(file),
        }
    }

    /// Build `file` with its language's compiler.
    ///
    /// C sources produce a binary named after the file's base name in the
    /// working directory, overwriting any previous one.
    pub fn compile(&self, file: &SourceFile) -> Result<(), DispatchError> {
        let invocation = compile_invocation(file)?;
        self.launcher.launch(&invocation)?;
        Ok(())
    }

    /// Execute `file`, compiling it first when its language needs that.
    ///
    /// A failed C compile is only logged: the previous binary, if any, is
    /// still executed.
    pub fn run(&self, file: &SourceFile) -> Result<(), DispatchError> {
        if file.language() == Some(Language::C) {
            if let Err(err) = self.compile(file) {
                log::warn!("compiling {} failed, running existing binary: {err}", file.path());
            }
        }
        let invocation = run_invocation(file)?;
        self.launcher.launch(&invocation)?;
        Ok(())
    }
}

impl Default for Dispatcher {
    /// Dispatcher that launches real processes from the current environment.
    fn default() -> Self {
        Self::new(Box::new(ProcessLauncher::default()))
    }
}

/// The compiler call for `file`, without starting it.
pub fn compile_invocation(file: &SourceFile) -> Result<Invocation, DispatchError> {
    match file.language() {
        Some(Language::C) => Ok(Invocation::new(
            "gcc",
            ["-o", file.base_name(), file.path()],
        )),
        Some(Language::Go) => Ok(Invocation::new("go", ["build", file.path()])),
        _ => Err(unsupported(file, Mode::Compile)),
    }
}

/// The program call that executes `file`, without starting it.
///
/// For C this is the already compiled binary; see [`Dispatcher::run`].
pub fn run_invocation(file: &SourceFile) -> Result<Invocation, DispatchError> {
    let Some(language) = file.language() else {
        return Err(unsupported(file, Mode::Run));
    };
    Ok(match language {
        Language::Binary | Language::C => {
            Invocation::new(local_binary(file.base_name()), Vec::<String>::new())
        }
        Language::Go => Invocation::new("go", ["run", file.path()]),
        Language::Python => Invocation::new("python", [file.path()]),
        Language::Lua => Invocation::new("lua", [file.path()]),
        Language::Ruby => Invocation::new("ruby", [file.path()]),
    })
}

// `./name` so a bare name is never looked up in PATH. An absolute base name
// is returned unchanged, since joining onto `.` replaces the path.
fn local_binary(base_name: &str) -> std::path::PathBuf {
    Path::new(".").join(base_name)
}

fn unsupported(file: &SourceFile, mode: Mode) -> DispatchError {
    DispatchError::UnsupportedFileType {
        kind: file.kind().to_owned(),
        mode,
    }
}
