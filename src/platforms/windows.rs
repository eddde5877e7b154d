use crate::associations::Associations;
use crate::error::{InstallerError, Result};
use crate::shell::Shortcut;
use mslnk::ShellLink;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};
use winreg::{RegKey, enums::*};

pub fn create_shortcut(path: &Path, shortcut: &Shortcut) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| InstallerError::io("create start menu directory", parent, e))?;
    }

    let shortcut_error = |message: String| InstallerError::Shortcut {
        path: path.to_path_buf(),
        message,
    };

    let mut link = ShellLink::new(&shortcut.target.program)
        .map_err(|e| shortcut_error(e.to_string()))?;
    link.set_arguments(shortcut.target.windows_arguments());
    link.set_icon_location(shortcut.icon.map(|icon| icon.display().to_string()));
    link.set_name(Some(shortcut.comment.clone()));

    // Overwrites any existing link
    link.create_lnk(path)
        .map_err(|e| shortcut_error(e.to_string()))?;

    debug!("Wrote shell link to {:?}", path);
    Ok(())
}

pub fn register_associations(
    associations: &Associations,
    exe: &Path,
    icon: Option<&Path>,
) -> Result<()> {
    let hkcu = RegKey::predef(HKEY_CURRENT_USER);

    for write in associations.writes(exe, icon) {
        let registry_error = |source| InstallerError::Registry {
            key: write.key.clone(),
            source,
        };
        let (key, _) = hkcu.create_subkey(&write.key).map_err(registry_error)?;
        key.set_value("", &write.value).map_err(registry_error)?;
        debug!("Set {} = {}", write.key, write.value);
    }

    for ext in &associations.extensions {
        println!("  Associated {} with {}", ext, associations.prog_id);
    }

    notify_association_change();
    Ok(())
}

pub fn unregister_associations(associations: &Associations) -> Result<()> {
    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let prog_id_key = associations.prog_id_key();

    for key in associations.removal_keys() {
        if key != prog_id_key && !points_at(&hkcu, &key, &associations.prog_id) {
            // Another application has claimed the extension since we installed.
            debug!("Leaving {} untouched", key);
            continue;
        }

        match hkcu.delete_subkey_all(&key) {
            Ok(()) => println!("  Removed registry key: {}", key),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", key, e),
        }
    }

    notify_association_change();
    info!("File associations unregistered");
    Ok(())
}

fn points_at(root: &RegKey, key: &str, prog_id: &str) -> bool {
    root.open_subkey(key)
        .and_then(|k| k.get_value::<String, _>(""))
        .is_ok_and(|value| value.eq_ignore_ascii_case(prog_id))
}

/// Explorer caches associations until told otherwise.
fn notify_association_change() {
    use ::windows::Win32::UI::Shell::{SHCNE_ASSOCCHANGED, SHCNF_IDLIST, SHChangeNotify};

    // SAFETY: SHCNE_ASSOCCHANGED takes no item pointers.
    unsafe { SHChangeNotify(SHCNE_ASSOCCHANGED, SHCNF_IDLIST, None, None) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_associations(tag: &str) -> Associations {
        Associations {
            prog_id: format!("MoleditPyInstallerTest.{}", tag),
            description: "MoleditPy File".to_string(),
            extensions: vec![format!(".pmetest{}", tag)],
        }
    }

    #[test]
    fn register_then_unregister_round_trips() {
        let assoc = scratch_associations("roundtrip");
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let exe = Path::new(r"C:\Program Files\MoleditPy\moleditpy.exe");

        register_associations(&assoc, exe, None).unwrap();
        register_associations(&assoc, exe, None).unwrap();

        let ext_key = assoc.extension_key(&assoc.extensions[0]);
        assert!(points_at(&hkcu, &ext_key, &assoc.prog_id));
        let command: String = hkcu
            .open_subkey(format!("{}\\shell\\open\\command", assoc.prog_id_key()))
            .unwrap()
            .get_value("")
            .unwrap();
        assert_eq!(command, r#""C:\Program Files\MoleditPy\moleditpy.exe" "%1""#);

        unregister_associations(&assoc).unwrap();
        unregister_associations(&assoc).unwrap();
        assert!(hkcu.open_subkey(&ext_key).is_err());
        assert!(hkcu.open_subkey(assoc.prog_id_key()).is_err());
    }

    #[test]
    fn foreign_extension_owner_is_kept() {
        let assoc = scratch_associations("foreign");
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let ext_key = assoc.extension_key(&assoc.extensions[0]);

        let (key, _) = hkcu.create_subkey(&ext_key).unwrap();
        key.set_value("", &"Other.App").unwrap();

        unregister_associations(&assoc).unwrap();
        assert!(hkcu.open_subkey(&ext_key).is_ok());

        hkcu.delete_subkey_all(&ext_key).unwrap();
    }
}
