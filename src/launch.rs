//! What a shortcut actually runs.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// An active, non-base conda environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondaEnv {
    pub name: String,
    pub conda_exe: PathBuf,
}

impl CondaEnv {
    pub fn from_env() -> Option<Self> {
        Self::from_vars(
            std::env::var("CONDA_DEFAULT_ENV").ok(),
            std::env::var_os("CONDA_EXE"),
        )
    }

    fn from_vars(name: Option<String>, conda_exe: Option<OsString>) -> Option<Self> {
        let name = name.filter(|n| !n.is_empty() && n != "base")?;
        let conda_exe = conda_exe.filter(|e| !e.is_empty())?;
        Some(Self {
            name,
            conda_exe: PathBuf::from(conda_exe),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl LaunchTarget {
    /// Launch `exe` directly, or through `conda run` so it starts inside its environment.
    pub fn for_executable(exe: &Path, conda: Option<&CondaEnv>) -> Self {
        match conda {
            Some(env) => Self {
                program: env.conda_exe.clone(),
                args: vec![
                    "run".to_string(),
                    "-n".to_string(),
                    env.name.clone(),
                    exe.display().to_string(),
                ],
            },
            None => Self {
                program: exe.to_path_buf(),
                args: Vec::new(),
            },
        }
    }

    /// `Exec=` value for a desktop entry.
    pub fn desktop_exec(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .map(|arg| quote_exec_arg(&arg))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Argument string for a Windows shortcut, `None` when there are no arguments.
    pub fn windows_arguments(&self) -> Option<String> {
        if self.args.is_empty() {
            return None;
        }
        Some(
            self.args
                .iter()
                .map(|arg| quote_windows_arg(arg))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        if let Some(args) = self.windows_arguments() {
            write!(f, " {}", args)?;
        }
        Ok(())
    }
}

// Reserved characters from the XDG Desktop Entry "Exec key" section.
const EXEC_RESERVED: &[char] = &[
    ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(', ')',
    '`',
];

fn quote_exec_arg(arg: &str) -> String {
    let arg = arg.replace('%', "%%");
    if !arg.is_empty() && !arg.contains(EXEC_RESERVED) {
        return arg;
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn quote_windows_arg(arg: &str) -> String {
    if arg.is_empty() || arg.contains([' ', '\t']) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}
