use crate::associations::Associations;
use crate::error::{InstallerError, Result};
use crate::launch::LaunchTarget;
use std::fs;
use std::path::{Path, PathBuf};

#[path = "platforms/windows.rs"]
#[cfg(windows)]
mod windows;

#[path = "platforms/macos.rs"]
#[cfg(target_os = "macos")]
mod macos;

#[path = "platforms/linux.rs"]
#[cfg(target_os = "linux")]
mod linux;

/// A menu shortcut as the installer describes it
#[derive(Debug, Clone)]
pub struct Shortcut<'a> {
    /// Display name, also the file name stem
    pub name: &'a str,
    pub comment: String,
    pub target: &'a LaunchTarget,
    pub icon: Option<&'a Path>,
}

/// Location of the shortcut `name` inside `menu_dir`.
pub fn shortcut_path(menu_dir: &Path, name: &str) -> PathBuf {
    #[cfg(windows)]
    let file_name = format!("{}.lnk", name);

    #[cfg(target_os = "macos")]
    let file_name = format!("{}.app", name);

    #[cfg(not(any(windows, target_os = "macos")))]
    let file_name = format!("{}.desktop", name);

    menu_dir.join(file_name)
}

/// Create or replace the shortcut, returning where it was written.
pub fn create_shortcut(menu_dir: &Path, shortcut: &Shortcut) -> Result<PathBuf> {
    let path = shortcut_path(menu_dir, shortcut.name);

    #[cfg(windows)]
    {
        windows::create_shortcut(&path, shortcut).map(|()| path)
    }

    #[cfg(target_os = "macos")]
    {
        macos::create_shortcut(&path, shortcut).map(|()| path)
    }

    #[cfg(target_os = "linux")]
    {
        linux::create_shortcut(&path, shortcut).map(|()| path)
    }

    #[cfg(not(any(windows, target_os = "macos", target_os = "linux")))]
    {
        let _ = (path, shortcut);
        Err(InstallerError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}

/// Delete the shortcut; `Ok(None)` when there was nothing to delete.
pub fn remove_shortcut(menu_dir: &Path, name: &str) -> Result<Option<PathBuf>> {
    let path = shortcut_path(menu_dir, name);

    let Ok(meta) = fs::symlink_metadata(&path) else {
        return Ok(None);
    };

    // macOS shortcuts are bundle directories
    let removed = if meta.is_dir() {
        fs::remove_dir_all(&path)
    } else {
        fs::remove_file(&path)
    };

    match removed {
        Ok(()) => Ok(Some(path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(InstallerError::io("remove shortcut", path, e)),
    }
}

/// Register the file associations. `Ok(false)` where the OS has no association store we manage.
pub fn register_associations(
    associations: &Associations,
    exe: &Path,
    icon: Option<&Path>,
) -> Result<bool> {
    #[cfg(windows)]
    {
        windows::register_associations(associations, exe, icon)?;
        Ok(true)
    }

    #[cfg(not(windows))]
    {
        let _ = (associations, exe, icon);
        Ok(false)
    }
}

/// Remove the file associations, skipping keys that do not exist.
pub fn unregister_associations(associations: &Associations) -> Result<bool> {
    #[cfg(windows)]
    {
        windows::unregister_associations(associations)?;
        Ok(true)
    }

    #[cfg(not(windows))]
    {
        let _ = associations;
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remove_missing_shortcut_is_none() {
        let menu = TempDir::new().unwrap();
        assert!(remove_shortcut(menu.path(), "MoleditPy").unwrap().is_none());
        assert!(remove_shortcut(&menu.path().join("absent"), "MoleditPy")
            .unwrap()
            .is_none());
    }

    #[test]
    fn remove_deletes_files_and_bundles() {
        let menu = TempDir::new().unwrap();
        let path = shortcut_path(menu.path(), "MoleditPy");
        fs::write(&path, "x").unwrap();
        assert_eq!(remove_shortcut(menu.path(), "MoleditPy").unwrap(), Some(path.clone()));
        assert!(!path.exists());

        fs::create_dir_all(path.join("Contents")).unwrap();
        assert_eq!(remove_shortcut(menu.path(), "MoleditPy").unwrap(), Some(path.clone()));
        assert!(!path.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_shortcut_is_desktop_file() {
        let path = shortcut_path(Path::new("/home/u/.local/share/applications"), "MoleditPy");
        assert_eq!(
            path,
            PathBuf::from("/home/u/.local/share/applications/MoleditPy.desktop")
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn associations_are_windows_only() {
        let assoc = Associations {
            prog_id: "MoleditPy.File".to_string(),
            description: "MoleditPy File".to_string(),
            extensions: vec![".pmeprj".to_string()],
        };
        assert!(!register_associations(&assoc, Path::new("/bin/moleditpy"), None).unwrap());
        assert!(!unregister_associations(&assoc).unwrap());
    }
}
