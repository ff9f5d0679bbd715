//! `launchSettings.json` editing.
//!
//! Visual Studio launches a packaged MAUI app through the `MsixPackage`
//! command. Unpackaged apps are started directly, so every such profile is
//! switched to `Project`:
//!
//! ```json
//! {
//!   "profiles": {
//!     "Windows Machine": {
//!       "commandName": "Project",
//!       "nativeDebugging": false
//!     }
//!   }
//! }
//! ```
//!
//! The document is kept as an insertion-ordered JSON map, so keys this tool
//! does not know about survive the rewrite in their original order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{
    error::{Document, Error, Result},
    project::project_dir,
};

/// Directory holding the launch settings, relative to the project file.
pub const PROPERTIES_DIR: &str = "Properties";

/// File name of the launch settings.
pub const LAUNCH_SETTINGS_FILE: &str = "launchSettings.json";

/// Command used to launch packaged (MSIX) apps.
pub const MSIX_COMMAND: &str = "MsixPackage";

/// Command used to launch the project output directly.
pub const PROJECT_COMMAND: &str = "Project";

const PROFILES_KEY: &str = "profiles";
const COMMAND_NAME_KEY: &str = "commandName";
const BOM: char = '\u{feff}';

/// Location of `launchSettings.json` for the given project file.
pub fn launch_settings_path(project: &Path) -> PathBuf {
    project_dir(project)
        .join(PROPERTIES_DIR)
        .join(LAUNCH_SETTINGS_FILE)
}

/// A parsed `launchSettings.json`.
#[derive(Debug, Clone)]
pub struct LaunchSettings {
    path: PathBuf,
    root: Map<String, Value>,
}

impl LaunchSettings {
    /// Loads and parses the launch settings at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(path, &content)
    }

    /// Parses launch settings content that was read from `path`.
    ///
    /// A leading UTF-8 byte order mark is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for invalid JSON and a format error when the
    /// top-level value is not an object.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let content = content.strip_prefix(BOM).unwrap_or(content);
        match serde_json::from_str(content)? {
            Value::Object(root) => Ok(Self {
                path: path.into(),
                root,
            }),
            _ => Err(Error::Format(Document::LaunchSettings)),
        }
    }

    /// Path the settings were loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The profile map.
    pub fn profiles(&self) -> Result<&Map<String, Value>> {
        self.root
            .get(PROFILES_KEY)
            .and_then(Value::as_object)
            .ok_or(Error::Format(Document::LaunchSettings))
    }

    fn profiles_mut(&mut self) -> Result<&mut Map<String, Value>> {
        self.root
            .get_mut(PROFILES_KEY)
            .and_then(Value::as_object_mut)
            .ok_or(Error::Format(Document::LaunchSettings))
    }

    /// The `commandName` of a profile, when it is a string.
    pub fn command_name(&self, profile: &str) -> Option<&str> {
        self.profiles()
            .ok()?
            .get(profile)?
            .get(COMMAND_NAME_KEY)?
            .as_str()
    }

    /// Switches every `MsixPackage` profile to `Project`.
    ///
    /// Returns how many profiles were changed.
    ///
    /// # Errors
    ///
    /// Returns a format error when `profiles` is missing or not an object.
    pub fn unpackage(&mut self) -> Result<usize> {
        let mut changed = 0;
        for (name, profile) in self.profiles_mut()?.iter_mut() {
            let Some(profile) = profile.as_object_mut() else {
                debug!("profile `{name}` is not an object, skipped");
                continue;
            };
            if let Some(command) = profile.get_mut(COMMAND_NAME_KEY)
                && command.as_str() == Some(MSIX_COMMAND)
            {
                *command = Value::String(PROJECT_COMMAND.to_string());
                debug!("profile `{name}`: {MSIX_COMMAND} -> {PROJECT_COMMAND}");
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Pretty-printed document.
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Overwrites the settings file with the current document.
    pub fn save(&self) -> Result<()> {
        let json = self.to_pretty_string()?;
        fs::write(&self.path, json).map_err(|e| Error::io(&self.path, e))?;
        info!("saved {}", self.path.display());
        Ok(())
    }
}
