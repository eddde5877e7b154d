//! Icon lookup for the shortcut and the association's `DefaultIcon`.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Icon file shipped for the current OS.
pub fn icon_file_name() -> Option<&'static str> {
    if cfg!(windows) {
        Some("icon.ico")
    } else if cfg!(target_os = "macos") {
        Some("icon.icns")
    } else if cfg!(target_os = "linux") {
        Some("icon.png")
    } else {
        None
    }
}

/// First existing, non-empty icon in `icon_dirs`, then in the user's icon theme.
pub fn resolve_icon(icon_dirs: &[PathBuf], command_name: &str) -> Option<PathBuf> {
    let Some(file_name) = icon_file_name() else {
        warn!(
            "Unsupported operating system for icon selection: {}",
            std::env::consts::OS
        );
        return None;
    };

    icon_dirs
        .iter()
        .map(|dir| dir.join(file_name))
        .inspect(|path| debug!("Checking icon {}", path.display()))
        .find(|path| is_usable(path))
        .or_else(|| theme_icon(command_name))
}

fn is_usable(path: &Path) -> bool {
    path.metadata()
        .is_ok_and(|m| m.is_file() && m.len() > 0)
}

#[cfg(target_os = "linux")]
fn theme_icon(icon_name: &str) -> Option<PathBuf> {
    let user_dirs = dirs::data_dir()
        .map(|dir| dir.join("icons"))
        .into_iter()
        .chain(dirs::home_dir().map(|home| home.join(".icons")));

    user_dirs
        .chain(["/usr/share/icons", "/usr/share/pixmaps"].map(PathBuf::from))
        .flat_map(|base_dir| {
            ["png", "svg"].into_iter().flat_map(move |ext| {
                [
                    base_dir
                        .join("hicolor/256x256/apps")
                        .join(format!("{}.{}", icon_name, ext)),
                    base_dir
                        .join("hicolor/48x48/apps")
                        .join(format!("{}.{}", icon_name, ext)),
                    base_dir.join(format!("{}.{}", icon_name, ext)),
                ]
            })
        })
        .find(|path| is_usable(path))
}

#[cfg(not(target_os = "linux"))]
fn theme_icon(_icon_name: &str) -> Option<PathBuf> {
    None
}
