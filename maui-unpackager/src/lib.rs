//! # maui-unpackager
//!
//! Converts a packaged (MSIX) .NET MAUI project into an unpackaged one.
//!
//! Three steps run in order against the project directory:
//!
//! 1. The `.csproj` gets `<WindowsPackageType>None</WindowsPackageType>`.
//! 2. `Properties/launchSettings.json` profiles launched as `MsixPackage`
//!    are switched to `Project`.
//! 3. `unpackaged_app_publish.bat` is written next to the project file with
//!    a `dotnet publish` command for the Windows target framework.
//!
//! ## Modules
//!
//! - [`project`] - `.csproj` loading, editing and target framework lookup
//! - [`launch`] - `launchSettings.json` editing
//! - [`publish`] - Publish script generation
//! - [`report`] - Step outcome reporting
//! - [`unpack`] - The pipeline tying the steps together
//! - [`error`] - Error types and result definitions
//!
//! ## Example
//!
//! ```rust,no_run
//! use maui_unpackager::{Unpackager, report::ConsoleReporter};
//!
//! let summary = Unpackager::new("MyApp/MyApp.csproj").run(&mut ConsoleReporter);
//! assert!(summary.project.is_done());
//! ```

#[macro_use]
extern crate log;

/// Error types and result definitions.
pub mod error;

/// `launchSettings.json` editing.
pub mod launch;

/// `.csproj` editing and target framework lookup.
pub mod project;

/// Publish script generation.
pub mod publish;

/// Step outcome reporting.
pub mod report;

/// The unpackaging pipeline.
pub mod unpack;

pub use error::{Document, Error, Result};
pub use unpack::{StepStatus, Summary, Unpackager};

/// Printed when the tool is not given exactly one project path.
pub const USAGE: &str = "Usage: MauiUnpackager <path_to_csproj>";
