//! Registry layout for the `.pmeprj`/`.pmeraw` file associations.
//!
//! Everything lives under `HKEY_CURRENT_USER\Software\Classes` so no elevation
//! is needed:
//!
//! ```text
//! Software\Classes\MoleditPy.File                     = "MoleditPy File"
//! Software\Classes\MoleditPy.File\DefaultIcon         = "<icon>"
//! Software\Classes\MoleditPy.File\shell\open\command  = "\"<exe>\" \"%1\""
//! Software\Classes\.pmeprj                            = "MoleditPy.File"
//! Software\Classes\.pmeraw                            = "MoleditPy.File"
//! ```

use crate::config::InstallerConfig;
use std::path::Path;

pub const CLASSES_ROOT: &str = "Software\\Classes";

/// A key whose default (unnamed) value is set to `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValue {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Associations {
    pub prog_id: String,
    pub description: String,
    pub extensions: Vec<String>,
}

impl Associations {
    pub fn from_config(config: &InstallerConfig) -> Self {
        Self {
            prog_id: config.prog_id.clone(),
            description: format!("{} File", config.app_name),
            extensions: config.extensions.clone(),
        }
    }

    pub fn prog_id_key(&self) -> String {
        format!("{}\\{}", CLASSES_ROOT, self.prog_id)
    }

    pub fn extension_key(&self, extension: &str) -> String {
        format!("{}\\{}", CLASSES_ROOT, extension)
    }

    /// Values to write, parents first.
    pub fn writes(&self, exe: &Path, icon: Option<&Path>) -> Vec<DefaultValue> {
        let prog_id_key = self.prog_id_key();

        let mut writes = vec![DefaultValue {
            key: prog_id_key.clone(),
            value: self.description.clone(),
        }];

        if let Some(icon) = icon {
            writes.push(DefaultValue {
                key: format!("{}\\DefaultIcon", prog_id_key),
                value: icon.display().to_string(),
            });
        }

        writes.push(DefaultValue {
            key: format!("{}\\shell\\open\\command", prog_id_key),
            value: open_command(exe),
        });

        writes.extend(self.extensions.iter().map(|ext| DefaultValue {
            key: self.extension_key(ext),
            value: self.prog_id.clone(),
        }));

        writes
    }

    /// Every key `writes` creates, as the roots that remove deletes.
    pub fn removal_keys(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| self.extension_key(ext))
            .chain(std::iter::once(self.prog_id_key()))
            .collect()
    }
}

/// Quoted so paths with spaces survive.
pub fn open_command(exe: &Path) -> String {
    format!("\"{}\" \"%1\"", exe.display())
}
