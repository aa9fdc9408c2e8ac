use std::fmt;

/// A file the user asked to compile or run, split into the parts the
/// dispatcher keys on.
///
/// Construction is pure string manipulation: the file is not required to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: String,
    extension: String,
    base_name: String,
}

impl SourceFile {
    /// Split `path` on the last `.` of its final component.
    ///
    /// Dots inside directory names are ignored, and a trailing dot does not
    /// start an extension, so `base_name` always equals `path` when `kind` is empty.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name_start = path.rfind(std::path::is_separator).map_or(0, |i| i + 1);
        let extension = match path[name_start..].rfind('.') {
            Some(dot) if name_start + dot + 1 < path.len() => path[name_start + dot..].to_owned(),
            _ => String::new(),
        };
        let base_name = path[..path.len() - extension.len()].to_owned();
        Self {
            path,
            extension,
            base_name,
        }
    }

    /// The filename exactly as given.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Extension including its leading dot, or an empty string.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `path` without the extension; the name given to compiled binaries.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Dispatch key: the extension without its leading dot.
    pub fn kind(&self) -> &str {
        self.extension.strip_prefix('.').unwrap_or("")
    }

    /// The language this file is dispatched as, if its kind is supported.
    pub fn language(&self) -> Option<Language> {
        Language::from_kind(self.kind())
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Filename]: {}", self.path)?;
        writeln!(f, "[Name]: {}", self.base_name)?;
        writeln!(f, "[Extension]: {}", self.extension)?;
        write!(f, "[Type]: {}", self.kind())
    }
}

/// Every kind of file the dispatcher knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// No extension: an already built executable.
    Binary,
    C,
    Go,
    Python,
    Lua,
    Ruby,
}

impl Language {
    /// Kinds that can be run, as listed in "unsupported file type" messages.
    pub const SUPPORTED: &'static str = "binary, C, Go, Python, Lua, Ruby";
    /// Kinds that can be compiled.
    pub const COMPILABLE: &'static str = "C, Go";

    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "" => Some(Self::Binary),
            "c" => Some(Self::C),
            "go" => Some(Self::Go),
            "py" => Some(Self::Python),
            "lua" => Some(Self::Lua),
            "ruby" => Some(Self::Ruby),
            _ => None,
        }
    }
}
