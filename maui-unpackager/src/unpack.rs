//! The unpackaging pipeline.
//!
//! [`Unpackager::run`] edits the project file, then the launch settings, then
//! writes the publish script. Each step returns a `Result`; whether the next
//! step still runs is decided here:
//!
//! - a failed project edit stops the run, the later steps need the document;
//! - missing or broken launch settings never stop the run;
//! - the publish script is the last step.
//!
//! A project edit that succeeded is kept even when no script can be written.

use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    launch::{LaunchSettings, launch_settings_path},
    project::ProjectFile,
    publish::PublishScript,
    report::Reporter,
};

/// Outcome of one pipeline step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepStatus {
    /// The step did not run because an earlier step failed.
    #[default]
    NotRun,
    /// The step completed.
    Done,
    /// The step had nothing to work on.
    Skipped,
    /// The step failed.
    Failed,
}

impl StepStatus {
    /// Whether the step completed.
    pub fn is_done(&self) -> bool {
        matches!(self, StepStatus::Done)
    }
}

/// Per-step results of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// The `.csproj` edit.
    pub project: StepStatus,
    /// The `launchSettings.json` edit.
    pub launch_settings: StepStatus,
    /// The publish script.
    pub publish_script: StepStatus,
    /// Path of the written publish script.
    pub script_path: Option<PathBuf>,
}

/// Runs the unpackaging steps for one project file.
#[derive(Debug, Clone)]
pub struct Unpackager {
    project_path: PathBuf,
}

impl Unpackager {
    /// Creates a pipeline for the `.csproj` at `project_path`.
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
        }
    }

    /// The project file being converted.
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Location of the launch settings for this project.
    pub fn launch_settings_path(&self) -> PathBuf {
        launch_settings_path(&self.project_path)
    }

    /// Runs every step, reporting one line per step outcome.
    ///
    /// Failures are reported, never returned.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Summary {
        let mut summary = Summary::default();

        let project = match self.update_project() {
            Ok(project) => {
                summary.project = StepStatus::Done;
                reporter.success("csproj file updated successfully.");
                project
            }
            Err(e) => {
                summary.project = StepStatus::Failed;
                reporter.error(&format!("Error: {e}"));
                return summary;
            }
        };

        summary.launch_settings = match self.update_launch_settings() {
            Ok(Some(changed)) => {
                debug!("{changed} launch profile(s) switched");
                reporter.success("launchSettings.json updated successfully.");
                StepStatus::Done
            }
            Ok(None) => {
                reporter.warning("Warning: launchSettings.json not found.");
                StepStatus::Skipped
            }
            Err(e @ Error::Format(_)) => {
                reporter.error(&format!("Error: {e}"));
                StepStatus::Failed
            }
            Err(e) => {
                reporter.error(&format!("Error updating launchSettings.json: {e}"));
                StepStatus::Failed
            }
        };

        match write_publish_script(&project) {
            Ok(path) => {
                summary.publish_script = StepStatus::Done;
                summary.script_path = Some(path);
                reporter.success("unpackaged_app_publish.bat file created successfully.");
            }
            Err(e) => {
                summary.publish_script = StepStatus::Failed;
                reporter.error(&format!("Error: {e}"));
            }
        }

        summary
    }

    /// Sets `WindowsPackageType` to `None` and saves the project.
    pub fn update_project(&self) -> Result<ProjectFile> {
        let mut project = ProjectFile::load(&self.project_path)?;
        project.make_unpackaged();
        project.save()?;
        Ok(project)
    }

    /// Rewrites `MsixPackage` launch profiles.
    ///
    /// Returns `Ok(None)` when the project has no launch settings, otherwise
    /// the number of changed profiles.
    pub fn update_launch_settings(&self) -> Result<Option<usize>> {
        let path = self.launch_settings_path();
        if !path.is_file() {
            debug!("{} not found", path.display());
            return Ok(None);
        }
        let mut settings = LaunchSettings::load(&path)?;
        let changed = settings.unpackage()?;
        settings.save()?;
        Ok(Some(changed))
    }
}

/// Writes the publish script next to the project file.
pub fn write_publish_script(project: &ProjectFile) -> Result<PathBuf> {
    let script = PublishScript::from_project(project)?;
    script.write_to(project.dir())
}
