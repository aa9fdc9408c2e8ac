//! Compile or run a source file by its extension.
//!
//! A [`SourceFile`] is split into base name and kind, the kind selects a
//! [`Language`], and the [`Dispatcher`] turns that into a single external
//! compiler or interpreter call (`gcc`, `go`, `python`, `lua`, `ruby`, or the
//! compiled binary itself). Programs are started through a [`command::Launcher`];
//! the default one inherits the terminal's standard streams and waits for exit.

pub mod cli;
pub mod command;
mod dispatcher;
pub mod env;
mod error;
mod external;
mod source_file;

pub use dispatcher::{Dispatcher, Mode, compile_invocation, run_invocation};
pub use error::{DispatchError, ProcessError};
pub use external::{ProcessLauncher, find_command_path};
pub use source_file::{Language, SourceFile};
