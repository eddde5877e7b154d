//! Desktop entry (.desktop file) generation.
//!
//! Implements the subset of the XDG Desktop Entry Specification a menu
//! launcher needs.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::error::{InstallerError, Result};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DesktopEntry {
    /// Entry name (shown in menus).
    pub name: String,
    pub comment: Option<String>,
    /// Already-quoted `Exec` value.
    pub exec: String,
    /// Icon name or absolute path.
    pub icon: Option<String>,
    pub terminal: bool,
    pub categories: Vec<String>,
    pub keywords: Vec<String>,
}

impl Default for DesktopEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            comment: None,
            exec: String::new(),
            icon: None,
            terminal: false,
            categories: vec!["Science".to_string(), "Chemistry".to_string()],
            keywords: Vec::new(),
        }
    }
}

impl DesktopEntry {
    pub fn builder() -> DesktopEntryBuilder {
        DesktopEntryBuilder::new()
    }

    /// Generate the .desktop file content.
    pub fn render(&self) -> String {
        let mut content = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(content, "[Desktop Entry]");
        let _ = writeln!(content, "Type=Application");
        let _ = writeln!(content, "Name={}", self.name);

        if let Some(ref comment) = self.comment {
            let _ = writeln!(content, "Comment={}", comment);
        }

        let _ = writeln!(content, "Exec={}", self.exec);

        if let Some(ref icon) = self.icon {
            let _ = writeln!(content, "Icon={}", icon);
        }

        let _ = writeln!(content, "Terminal={}", self.terminal);

        if !self.categories.is_empty() {
            let _ = writeln!(content, "Categories={};", self.categories.join(";"));
        }

        if !self.keywords.is_empty() {
            let _ = writeln!(content, "Keywords={};", self.keywords.join(";"));
        }

        content
    }

    /// Write the entry, replacing any existing file at `path`.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| InstallerError::io("create directory", parent, e))?;
        }

        fs::write(path, self.render())
            .map_err(|e| InstallerError::io("write desktop file", path, e))?;

        // Some desktops only trust executable launchers.
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .map_err(|e| InstallerError::io("set permissions", path, e))?;

        debug!("Wrote desktop entry to {:?}", path);

        Ok(())
    }
}

pub struct DesktopEntryBuilder {
    entry: DesktopEntry,
}

impl DesktopEntryBuilder {
    pub fn new() -> Self {
        Self {
            entry: DesktopEntry::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entry.name = name.into();
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.entry.comment = Some(comment.into());
        self
    }

    pub fn exec(mut self, exec: impl Into<String>) -> Self {
        self.entry.exec = exec.into();
        self
    }

    pub fn icon(mut self, icon: Option<impl Into<String>>) -> Self {
        self.entry.icon = icon.map(Into::into);
        self
    }

    pub fn terminal(mut self, terminal: bool) -> Self {
        self.entry.terminal = terminal;
        self
    }

    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.entry.keywords = keywords;
        self
    }

    pub fn build(self) -> DesktopEntry {
        self.entry
    }
}

impl Default for DesktopEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
