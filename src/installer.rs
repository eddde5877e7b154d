//! Install and remove the MoleditPy shortcut and file associations.

use crate::associations::Associations;
use crate::config::InstallerConfig;
use crate::error::{InstallerError, Result};
use crate::icon::resolve_icon;
use crate::launch::LaunchTarget;
use crate::locate::{describe_miss, find_executable};
use crate::shell::{self, Shortcut};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Outcome of a registry update that does not fail the install.
#[derive(Debug, PartialEq, Eq)]
pub enum AssociationOutcome {
    Registered,
    /// No association store is managed on this OS.
    Skipped,
    Failed(String),
}

#[derive(Debug)]
pub struct InstallReport {
    pub executable: PathBuf,
    pub shortcut: PathBuf,
    pub icon: Option<PathBuf>,
    pub associations: AssociationOutcome,
}

#[derive(Debug, Default)]
pub struct RemoveReport {
    /// `None` when no shortcut was found.
    pub shortcut: Option<PathBuf>,
    pub associations_removed: bool,
}

/// Create (or refresh) the menu shortcut and, on Windows, the file associations.
///
/// Nothing is written when the companion executable cannot be found.
pub fn install(config: &InstallerConfig) -> Result<InstallReport> {
    let icon = resolve_icon(&config.icon_dirs, &config.command_name);
    if icon.is_none() {
        warn!("Could not find a suitable icon file. A default icon will be used.");
    }

    println!("Searching for the executable '{}'...", config.command_name);
    let executable = find_executable(
        &config.command_name,
        &config.search_dirs,
        config.path_var.as_deref(),
    )
    .ok_or_else(|| {
        info!("{}", describe_miss(&config.command_name, &config.search_dirs));
        InstallerError::NotFound {
            command: config.command_name.clone(),
        }
    })?;

    if let Some(env) = &config.conda {
        println!("Conda environment detected: {}", env.name);
    }
    let target = LaunchTarget::for_executable(&executable, config.conda.as_ref());

    println!("Creating '{}' shortcut...", config.app_name);
    println!("Targeting: {}", target);
    let shortcut = shell::create_shortcut(
        &config.menu_dir,
        &Shortcut {
            name: &config.app_name,
            comment: format!("Launch {}", config.app_name),
            target: &target,
            icon: icon.as_deref(),
        },
    )?;
    println!(
        "Successfully created '{}' at {}",
        config.app_name,
        shortcut.display()
    );

    // Associations always open files with the application itself, never through conda.
    let associations = Associations::from_config(config);
    let associations = match shell::register_associations(&associations, &executable, icon.as_deref())
    {
        Ok(true) => {
            println!("File associations registered successfully.");
            AssociationOutcome::Registered
        }
        Ok(false) => AssociationOutcome::Skipped,
        Err(e) => {
            error!("Failed to register file associations: {}", e);
            AssociationOutcome::Failed(e.to_string())
        }
    };

    info!(
        "Installed {} shortcut for {}",
        config.app_name,
        executable.display()
    );

    Ok(InstallReport {
        executable,
        shortcut,
        icon,
        associations,
    })
}

/// Delete whatever `install` created. Missing entries are not an error and
/// other failures are only logged.
pub fn remove(config: &InstallerConfig) -> RemoveReport {
    let mut report = RemoveReport::default();

    match shell::unregister_associations(&Associations::from_config(config)) {
        Ok(removed) => report.associations_removed = removed,
        Err(e) => warn!("Error during file association removal: {}", e),
    }

    match shell::remove_shortcut(&config.menu_dir, &config.app_name) {
        Ok(Some(path)) => {
            println!("Removed shortcut: {}", path.display());
            report.shortcut = Some(path);
        }
        Ok(None) => println!(
            "Shortcut not found at expected location: {}",
            shell::shortcut_path(&config.menu_dir, &config.app_name).display()
        ),
        Err(e) => warn!("Failed to remove shortcut: {}", e),
    }

    report
}
