//! Finding the companion application's installed entry point.

use rs_apply::Apply;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

// What `cmd.exe` assumes when `PATHEXT` is unset.
#[cfg_attr(not(windows), allow(dead_code))]
const DEFAULT_PATHEXT: &str = ".COM;.EXE;.BAT;.CMD";

/// Look for `name` in each of `search_dirs`, then along `path_var`.
///
/// Returns the first candidate that is a file and, on Unix, executable. On
/// Windows every `PATHEXT` suffix is tried, the way the shell resolves commands.
pub fn find_executable(
    name: &str,
    search_dirs: &[PathBuf],
    path_var: Option<&OsStr>,
) -> Option<PathBuf> {
    let file_names = candidate_names(name);
    let in_dir = |dir: &Path| {
        file_names
            .iter()
            .map(|file_name| dir.join(file_name))
            .find(|candidate| is_executable(candidate))
    };

    if let Some(found) = search_dirs.iter().find_map(|dir| in_dir(dir.as_path())) {
        let found = normalize_extension(found);
        println!("Found executable in local directory: {}", found.display());
        return Some(found);
    }

    path_var
        .into_iter()
        .flat_map(|paths| std::env::split_paths(paths))
        .filter(|dir| !dir.as_os_str().is_empty())
        .inspect(|dir| debug!("Checking {}", dir.display()))
        .find_map(|dir| in_dir(dir.as_path()))
        .map(normalize_extension)
        .inspect(|found| println!("Found executable in system PATH: {}", found.display()))
}

fn candidate_names(name: &str) -> Vec<String> {
    #[cfg(windows)]
    {
        let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| DEFAULT_PATHEXT.to_string());
        with_path_extensions(name, &pathext)
    }

    #[cfg(not(windows))]
    {
        vec![name.to_string()]
    }
}

/// `name` as given when it already has an extension, else `name` plus each `PATHEXT` entry.
#[cfg_attr(not(windows), allow(dead_code))]
fn with_path_extensions(name: &str, pathext: &str) -> Vec<String> {
    if Path::new(name).extension().is_some() {
        return vec![name.to_string()];
    }
    pathext
        .split(';')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!("{}{}", name, ext))
        .collect()
}

/// Windows reports `MOLEDITPY.EXE` style names from some installers.
fn normalize_extension(path: PathBuf) -> PathBuf {
    if path.extension() == Some(OsStr::new("EXE")) {
        path.with_extension("exe")
    } else {
        path
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.permissions().mode())
        .is_some_and(|mode| mode & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Where `name` was looked for, for the not-installed message.
pub fn describe_miss(name: &str, search_dirs: &[PathBuf]) -> String {
    search_dirs
        .iter()
        .map(|dir| dir.display().to_string())
        .collect::<Vec<_>>()
        .apply(|dirs| {
            if dirs.is_empty() {
                format!("'{}' is not on PATH", name)
            } else {
                format!("'{}' is not in {} or on PATH", name, dirs.join(", "))
            }
        })
}
