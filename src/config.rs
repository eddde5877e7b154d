//! Installer configuration: what gets installed and where.

use crate::error::{InstallerError, Result};
use crate::launch::CondaEnv;
use std::path::PathBuf;

pub const APP_NAME: &str = "MoleditPy";
pub const COMMAND_NAME: &str = "moleditpy";
pub const PROG_ID: &str = "MoleditPy.File";
pub const EXTENSIONS: [&str; 2] = [".pmeprj", ".pmeraw"];

#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Shortcut name and association description prefix.
    pub app_name: String,
    /// Entry point installed by the companion package.
    pub command_name: String,
    pub prog_id: String,
    pub extensions: Vec<String>,
    /// Directory the shell reads menu entries from.
    pub menu_dir: PathBuf,
    /// Searched before `path_var`, in order.
    pub search_dirs: Vec<PathBuf>,
    /// Snapshot of `PATH`.
    pub path_var: Option<std::ffi::OsString>,
    pub icon_dirs: Vec<PathBuf>,
    pub conda: Option<CondaEnv>,
}

impl InstallerConfig {
    /// Build the configuration for the current user and process environment.
    pub fn from_env() -> Result<Self> {
        // The package manager drops our entry point next to the application's.
        let install_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.canonicalize().ok())
            .and_then(|exe| exe.parent().map(PathBuf::from));

        let icon_dirs = install_dir
            .iter()
            .map(|dir| dir.join("data"))
            .chain(dirs::data_dir().map(|dir| dir.join("moleditpy-installer").join("data")))
            .collect();

        Ok(Self {
            app_name: APP_NAME.to_string(),
            command_name: COMMAND_NAME.to_string(),
            prog_id: PROG_ID.to_string(),
            extensions: EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            menu_dir: menu_dir()?,
            search_dirs: install_dir.into_iter().collect(),
            path_var: std::env::var_os("PATH"),
            icon_dirs,
            conda: CondaEnv::from_env(),
        })
    }
}

/// Where the application-menu shortcut lives.
///
/// - **Linux**: `$XDG_DATA_HOME/applications` (usually `~/.local/share/applications`)
/// - **Windows**: `%APPDATA%\Microsoft\Windows\Start Menu\Programs`
/// - **macOS**: `~/Desktop`, holding a generated `.app` bundle
pub fn menu_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let data_dir = dirs::data_dir().ok_or_else(|| InstallerError::Config {
            message: "Could not determine data directory".to_string(),
        })?;
        Ok(data_dir.join("applications"))
    }

    #[cfg(target_os = "windows")]
    {
        let data_dir = dirs::data_dir().ok_or_else(|| InstallerError::Config {
            message: "Could not determine app data directory".to_string(),
        })?;
        Ok(data_dir
            .join("Microsoft")
            .join("Windows")
            .join("Start Menu")
            .join("Programs"))
    }

    #[cfg(target_os = "macos")]
    {
        let home = dirs::home_dir().ok_or_else(|| InstallerError::Config {
            message: "Could not determine home directory".to_string(),
        })?;
        Ok(home.join("Desktop"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        Err(InstallerError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }
}
