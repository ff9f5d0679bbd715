//! Publish script generation.
//!
//! The script publishes a self-contained, unpackaged Windows build:
//!
//! ```bat
//! @echo off
//! dotnet publish -f net8.0-windows10.0.19041.0 -c Release -p:RuntimeIdentifierOverride=win10-x64 -p:WindowsPackageType=None -p:WindowsAppSDKSelfContained=true
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    project::{ProjectFile, UNPACKAGED, WINDOWS_PACKAGE_TYPE},
};

/// File name of the generated script.
pub const PUBLISH_SCRIPT_NAME: &str = "unpackaged_app_publish.bat";

/// Build configuration passed to `dotnet publish`.
pub const CONFIGURATION: &str = "Release";

/// Runtime identifier the app is published for.
pub const RUNTIME_IDENTIFIER: &str = "win10-x64";

const LINE_ENDING: &str = "\r\n";

/// A `dotnet publish` script for one target framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishScript {
    target_framework: String,
}

impl PublishScript {
    /// Creates a script for `target_framework`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTargetFramework`] for an empty framework.
    pub fn new(target_framework: impl Into<String>) -> Result<Self> {
        let target_framework = target_framework.into();
        if target_framework.is_empty() {
            return Err(Error::MissingTargetFramework);
        }
        Ok(Self { target_framework })
    }

    /// Creates a script for the Windows target framework of `project`.
    pub fn from_project(project: &ProjectFile) -> Result<Self> {
        let target_framework = project
            .windows_target_framework()
            .ok_or(Error::MissingTargetFramework)?;
        Self::new(target_framework)
    }

    /// The framework passed to `dotnet publish -f`.
    pub fn target_framework(&self) -> &str {
        &self.target_framework
    }

    /// The `dotnet publish` command line.
    pub fn command(&self) -> String {
        format!(
            "dotnet publish -f {} -c {CONFIGURATION} -p:RuntimeIdentifierOverride={RUNTIME_IDENTIFIER} -p:{WINDOWS_PACKAGE_TYPE}={UNPACKAGED} -p:WindowsAppSDKSelfContained=true",
            self.target_framework
        )
    }

    /// Script lines, without line endings.
    pub fn lines(&self) -> [String; 2] {
        ["@echo off".to_string(), self.command()]
    }

    /// Script content with CRLF line endings.
    pub fn contents(&self) -> String {
        self.lines()
            .iter()
            .map(|line| format!("{line}{LINE_ENDING}"))
            .collect()
    }

    /// Writes the script into `dir`, replacing any previous one.
    ///
    /// Returns the path of the written script.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(PUBLISH_SCRIPT_NAME);
        fs::write(&path, self.contents()).map_err(|e| Error::io(&path, e))?;
        info!("wrote {} for {}", path.display(), self.target_framework);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let script = PublishScript::new("net8.0-windows10.0.19041.0").unwrap();
        assert_eq!(script.target_framework(), "net8.0-windows10.0.19041.0");
        assert_eq!(
            script.lines(),
            [
                "@echo off".to_string(),
                "dotnet publish -f net8.0-windows10.0.19041.0 -c Release -p:RuntimeIdentifierOverride=win10-x64 -p:WindowsPackageType=None -p:WindowsAppSDKSelfContained=true".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_framework() {
        assert!(matches!(
            PublishScript::new(""),
            Err(Error::MissingTargetFramework)
        ));
    }

    #[test]
    fn test_from_project() {
        let project = ProjectFile::parse(
            "App.csproj",
            r#"<Project><PropertyGroup><TargetFrameworks Condition="$([MSBuild]::IsOSPlatform('windows'))">net8.0-android;net8.0-windows10.0.19041.0</TargetFrameworks></PropertyGroup></Project>"#,
        )
        .unwrap();
        let script = PublishScript::from_project(&project).unwrap();
        assert_eq!(script.target_framework(), "net8.0-windows10.0.19041.0");
    }

    #[test]
    fn test_from_project_without_windows() {
        let project = ProjectFile::parse(
            "App.csproj",
            "<Project><PropertyGroup><TargetFrameworks>net8.0-windows10.0.19041.0</TargetFrameworks></PropertyGroup></Project>",
        )
        .unwrap();
        assert!(matches!(
            PublishScript::from_project(&project),
            Err(Error::MissingTargetFramework)
        ));
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join(PUBLISH_SCRIPT_NAME);
        fs::write(&existing, "echo stale\r\necho stale\r\necho stale\r\n").unwrap();

        let script = PublishScript::new("net9.0-windows10.0.19041.0").unwrap();
        let path = script.write_to(dir.path()).unwrap();
        assert_eq!(path, existing);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, script.contents());
        assert!(written.starts_with("@echo off\r\ndotnet publish -f net9.0-windows10.0.19041.0 "));
        assert!(written.ends_with("-p:WindowsAppSDKSelfContained=true\r\n"));
        assert_eq!(written.lines().count(), 2);
    }
}
