use crate::error::{InstallerError, Result};
use crate::shell::Shortcut;
use icns::IconFamily;
use plist::{Dictionary, Value};
use rs_apply::Apply;
use std::fs::{self, File};
use std::io::BufReader;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::{debug, warn};

const BUNDLE_ICON: &str = "icon.icns";

/// Write `<name>.app` with a launcher script in place of an executable.
pub fn create_shortcut(path: &Path, shortcut: &Shortcut) -> Result<()> {
    // Start from scratch so stale resources from an older bundle go away.
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| InstallerError::io("remove old bundle", path, e))?;
    }

    let contents = path.join("Contents");
    let macos_dir = contents.join("MacOS");
    let resources_dir = contents.join("Resources");
    for dir in [&macos_dir, &resources_dir] {
        fs::create_dir_all(dir).map_err(|e| InstallerError::io("create directory", dir, e))?;
    }

    let icon_installed = shortcut
        .icon
        .filter(|icon| validate_icns_path(icon))
        .map(|icon| {
            let dest = resources_dir.join(BUNDLE_ICON);
            fs::copy(icon, &dest).map_err(|e| InstallerError::io("copy icon", &dest, e))
        })
        .transpose()?
        .is_some();
    if shortcut.icon.is_some() && !icon_installed {
        warn!("Icon is not a readable .icns file, using the default bundle icon");
    }

    let launcher = macos_dir.join(shortcut.name);
    fs::write(&launcher, launcher_script(shortcut))
        .map_err(|e| InstallerError::io("write launcher script", &launcher, e))?;
    fs::set_permissions(&launcher, fs::Permissions::from_mode(0o755))
        .map_err(|e| InstallerError::io("set permissions", &launcher, e))?;

    let plist_path = contents.join("Info.plist");
    info_plist(shortcut, icon_installed)
        .apply(Value::Dictionary)
        .to_file_xml(&plist_path)
        .map_err(|e| InstallerError::Shortcut {
            path: plist_path.clone(),
            message: e.to_string(),
        })?;

    debug!("Wrote app bundle to {:?}", path);
    Ok(())
}

fn info_plist(shortcut: &Shortcut, with_icon: bool) -> Dictionary {
    let mut dict = Dictionary::new();
    let mut set = |key: &str, value: &str| {
        dict.insert(key.to_string(), Value::String(value.to_string()));
    };

    set("CFBundleName", shortcut.name);
    set("CFBundleDisplayName", shortcut.name);
    set("CFBundleExecutable", shortcut.name);
    set(
        "CFBundleIdentifier",
        &format!("org.moleditpy.{}", shortcut.name.to_lowercase()),
    );
    set("CFBundlePackageType", "APPL");
    set("CFBundleInfoDictionaryVersion", "6.0");
    set("CFBundleGetInfoString", &shortcut.comment);
    if with_icon {
        set("CFBundleIconFile", BUNDLE_ICON);
    }

    dict
}

fn launcher_script(shortcut: &Shortcut) -> String {
    let command = std::iter::once(shortcut.target.program.display().to_string())
        .chain(shortcut.target.args.iter().cloned())
        .map(|arg| sh_quote(&arg))
        .collect::<Vec<_>>()
        .join(" ");
    format!("#!/bin/sh\nexec {} \"$@\"\n", command)
}

fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn validate_icns_path(path: &Path) -> bool {
    path.metadata().is_ok_and(|m| m.len() > 0)
        && File::open(path)
            .ok()
            .and_then(|f| IconFamily::read(BufReader::new(f)).ok())
            .is_some()
}
