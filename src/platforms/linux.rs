use crate::desktop_entry::DesktopEntry;
use crate::error::Result;
use crate::shell::Shortcut;
use freedesktop_desktop_entry::DesktopEntry as InstalledEntry;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn create_shortcut(path: &Path, shortcut: &Shortcut) -> Result<()> {
    if let Some(previous) = installed_exec(path) {
        info!("Replacing menu entry {} (was: {})", path.display(), previous);
    }

    DesktopEntry::builder()
        .name(shortcut.name)
        .comment(shortcut.comment.as_str())
        .exec(shortcut.target.desktop_exec())
        .icon(shortcut.icon.map(|icon| icon.display().to_string()))
        .terminal(false)
        .keywords(vec!["molecule".to_string(), "editor".to_string()])
        .build()
        .write_to_file(path)
}

/// `Exec` of an entry already at `path`, if it decodes as an application entry.
fn installed_exec(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let entry = InstalledEntry::decode(path, &content).ok()?;
    entry
        .name(None)
        .and(entry.exec())
        .map(|exec| exec.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::LaunchTarget;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn written_entry_decodes_with_freedesktop_parser() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("MoleditPy.desktop");
        let target = LaunchTarget::for_executable(Path::new("/opt/mol dit/bin/moleditpy"), None);
        let icon = PathBuf::from("/opt/moleditpy/icon.png");

        create_shortcut(
            &path,
            &Shortcut {
                name: "MoleditPy",
                comment: "Launch MoleditPy".to_string(),
                target: &target,
                icon: Some(&icon),
            },
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let entry = InstalledEntry::decode(&path, &content).unwrap();
        assert_eq!(entry.name(None).unwrap(), "MoleditPy");
        assert_eq!(entry.exec(), Some("\"/opt/mol dit/bin/moleditpy\""));
        assert_eq!(entry.icon(), Some("/opt/moleditpy/icon.png"));
        assert_eq!(installed_exec(&path).as_deref(), Some("\"/opt/mol dit/bin/moleditpy\""));
    }

    #[test]
    fn garbage_file_has_no_installed_exec() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("MoleditPy.desktop");
        fs::write(&path, "not a desktop entry").unwrap();
        assert!(installed_exec(&path).is_none());
        assert!(installed_exec(&dir.path().join("missing.desktop")).is_none());
    }
}
