#![cfg(target_os = "linux")]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

struct Home {
    dir: tempfile::TempDir,
}

impl Home {
    fn new() -> Self {
        let home = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fs::create_dir_all(home.bin_dir()).unwrap();
        fs::create_dir_all(home.applications()).unwrap();
        home
    }

    fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    fn applications(&self) -> PathBuf {
        self.dir.path().join(".local/share/applications")
    }

    fn install_companion(&self) -> PathBuf {
        let exe = self.bin_dir().join("moleditpy");
        fs::write(&exe, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
        exe
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_moleditpy-installer"))
            .args(args)
            .env("HOME", self.dir.path())
            .env("PATH", self.bin_dir())
            .env_remove("XDG_DATA_HOME")
            .env_remove("CONDA_DEFAULT_ENV")
            .env_remove("CONDA_EXE")
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    fn applications_listing(&self) -> Vec<PathBuf> {
        listing(&self.applications())
    }
}

fn listing(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    entries.sort();
    entries
}

#[test]
fn help_prints_usage_without_side_effects() {
    let home = Home::new();
    let before = listing(home.dir.path());

    let output = home.run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--remove"));
    assert_eq!(listing(home.dir.path()), before);
    assert!(home.applications_listing().is_empty());
}

#[test]
fn missing_companion_exits_non_zero_and_creates_nothing() {
    let home = Home::new();

    let output = home.run(&[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Command 'moleditpy' not found"), "{}", stderr);
    assert!(home.applications_listing().is_empty());
}

#[test]
fn install_twice_then_remove_twice_round_trips() {
    let home = Home::new();
    let exe = home.install_companion();
    let before = home.applications_listing();

    assert!(home.run(&[]).status.success());
    assert!(home.run(&[]).status.success());

    let entry = home.applications().join("MoleditPy.desktop");
    assert_eq!(home.applications_listing(), vec![entry.clone()]);
    let content = fs::read_to_string(&entry).unwrap();
    assert!(content.contains("Name=MoleditPy\n"));
    assert!(content.contains(&format!("Exec={}\n", exe.display())));

    assert!(home.run(&["--remove"]).status.success());
    assert!(home.run(&["--remove"]).status.success());
    assert_eq!(home.applications_listing(), before);
}

#[test]
fn remove_without_install_succeeds() {
    let home = Home::new();

    let output = home.run(&["--remove"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Shortcut not found"));
}
