use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Snapshot of the process environment that launched programs inherit.
///
/// Holds the variables used for `PATH` lookup and passed to children, and
/// the directory children are started in. Keys and values are kept as OS
/// strings, so variables that are not valid Unicode are carried over as-is.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Variables launched programs see, and nothing else.
    pub vars: HashMap<OsString, OsString>,
    /// Working directory for launched programs.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current process state.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_vars(stdenv::vars_os(), current_dir)
    }

    /// Build an environment from an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I, current_dir: PathBuf) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            current_dir,
        }
    }

    /// Get the value of a captured environment variable.
    pub fn get_var(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::env::Environment;
    use std::env as stdenv;
    use std::ffi::OsStr;

    #[test]
    fn test_env_get_var_only_sees_captured_vars() {
        let env = Environment::from_vars([("PATH", "/nowhere")], stdenv::current_dir().unwrap());

        assert_eq!(env.get_var("PATH"), Some(OsStr::new("/nowhere")));
        assert_eq!(env.get_var("HOME"), None);
    }

    #[test]
    fn test_env_reads_from_process_env() {
        let env = Environment::new();
        assert!(env.get_var("PATH").is_some());
    }

    #[test]
    #[cfg(unix)]
    fn test_env_keeps_non_unicode_values() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"\xff\xfe".to_vec());
        let env = Environment::from_vars(
            [(OsString::from("CODERUN_RAW"), raw.clone())],
            stdenv::current_dir().unwrap(),
        );
        assert_eq!(env.get_var("CODERUN_RAW"), Some(raw.as_os_str()));
    }
}
