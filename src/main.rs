use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

#[cfg_attr(not(windows), allow(dead_code))]
mod associations;
mod config;
#[cfg(target_os = "linux")]
mod desktop_entry;
mod error;
mod icon;
mod installer;
mod launch;
mod locate;
mod logs;
mod shell;

use config::InstallerConfig;
use error::InstallerError;
use installer::AssociationOutcome;

#[derive(Parser)]
#[command(
    name = "moleditpy-installer",
    about = "Installer for MoleditPy shortcut and file associations."
)]
struct Cli {
    /// Remove the shortcut and unregister file associations.
    #[arg(long)]
    remove: bool,

    /// Show debug output on the console
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // --help and usage errors exit inside parse(), before anything is touched
    let cli = Cli::parse();
    logs::init_logger(cli.verbose);

    let config = match InstallerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return if cli.remove {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    if cli.remove {
        info!("Removing {} shortcut", config.app_name);
        let report = installer::remove(&config);
        if report.associations_removed {
            println!("File associations unregistered.");
        }
        if report.shortcut.is_none() && !report.associations_removed {
            info!("Nothing to remove");
        }
        return ExitCode::SUCCESS;
    }

    match installer::install(&config) {
        Ok(report) => {
            info!(
                "{} -> {} (icon: {})",
                report.shortcut.display(),
                report.executable.display(),
                report
                    .icon
                    .as_deref()
                    .map_or("default".into(), |icon| icon.display().to_string())
            );
            if let AssociationOutcome::Failed(reason) = &report.associations {
                println!("Failed to register file associations: {}", reason);
            }
            if report.associations != AssociationOutcome::Skipped {
                println!("\nYou can remove the shortcut and file associations by running:");
                println!("  moleditpy-installer --remove");
            }
            ExitCode::SUCCESS
        }
        Err(InstallerError::NotFound { command }) => {
            eprintln!("Error: Command '{}' not found.", command);
            eprintln!("Please ensure 'moleditpy' (or 'moleditpy-linux') is installed correctly");
            eprintln!("and that its location is available.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Failed to create shortcut: {}", e);
            ExitCode::FAILURE
        }
    }
}
