use std::{fs, path::Path};

use maui_unpackager::{
    StepStatus, Unpackager,
    launch::LaunchSettings,
    project::ProjectFile,
    publish::PUBLISH_SCRIPT_NAME,
    report::{MemoryReporter, Status},
};
use tempfile::TempDir;

const PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <MauiIcon Include="Resources\AppIcon\appicon.svg" />
  </ItemGroup>
  <PropertyGroup>
    <TargetFrameworks Condition="$([MSBuild]::IsOSPlatform('windows'))">net8.0-windows10.0.19041.0;net8.0</TargetFrameworks>
  </PropertyGroup>
</Project>
"#;

const PROJECT_WITHOUT_GROUP: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <TargetFrameworks Condition="$([MSBuild]::IsOSPlatform('windows'))">net8.0-windows10.0.19041.0;net8.0</TargetFrameworks>
  </ItemGroup>
</Project>
"#;

const LAUNCH_SETTINGS: &str = r#"{
  "profiles": {
    "Windows Machine": {
      "commandName": "MsixPackage",
      "nativeDebugging": false
    },
    "Android": {
      "commandName": "Project"
    },
    "Tablet": {
      "commandName": "MsixPackage"
    }
  }
}"#;

fn setup(project: &str, launch_settings: Option<&str>) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let csproj = dir.path().join("App.csproj");
    fs::write(&csproj, project).unwrap();

    if let Some(content) = launch_settings {
        let properties = dir.path().join("Properties");
        fs::create_dir_all(&properties).unwrap();
        fs::write(properties.join("launchSettings.json"), content).unwrap();
    }

    (dir, csproj)
}

fn script(dir: &Path) -> String {
    fs::read_to_string(dir.join(PUBLISH_SCRIPT_NAME)).unwrap()
}

#[test]
fn test_end_to_end_without_launch_settings() {
    let (dir, csproj) = setup(PROJECT_WITHOUT_GROUP, None);

    let mut reporter = MemoryReporter::new();
    let summary = Unpackager::new(&csproj).run(&mut reporter);

    assert_eq!(summary.project, StepStatus::Done);
    assert_eq!(summary.launch_settings, StepStatus::Skipped);
    assert_eq!(summary.publish_script, StepStatus::Done);
    assert_eq!(summary.script_path, Some(dir.path().join(PUBLISH_SCRIPT_NAME)));

    assert_eq!(
        reporter.entries,
        [
            (Status::Success, "csproj file updated successfully.".to_string()),
            (Status::Warning, "Warning: launchSettings.json not found.".to_string()),
            (
                Status::Success,
                "unpackaged_app_publish.bat file created successfully.".to_string()
            ),
        ]
    );

    let project = ProjectFile::load(&csproj).unwrap();
    assert_eq!(project.property_group_count(), 1);
    assert_eq!(project.property("WindowsPackageType").as_deref(), Some("None"));

    assert_eq!(
        script(dir.path()),
        "@echo off\r\ndotnet publish -f net8.0-windows10.0.19041.0 -c Release -p:RuntimeIdentifierOverride=win10-x64 -p:WindowsPackageType=None -p:WindowsAppSDKSelfContained=true\r\n"
    );
}

#[test]
fn test_launch_profiles_rewritten() {
    let (dir, csproj) = setup(PROJECT, Some(LAUNCH_SETTINGS));

    let mut reporter = MemoryReporter::new();
    let summary = Unpackager::new(&csproj).run(&mut reporter);

    assert_eq!(summary.launch_settings, StepStatus::Done);
    assert!(
        reporter
            .messages(Status::Success)
            .contains(&"launchSettings.json updated successfully.")
    );

    let settings =
        LaunchSettings::load(dir.path().join("Properties").join("launchSettings.json")).unwrap();
    let profiles = settings.profiles().unwrap();
    assert_eq!(profiles.len(), 3);
    for name in ["Windows Machine", "Android", "Tablet"] {
        assert_eq!(settings.command_name(name), Some("Project"));
    }
    assert_eq!(profiles["Windows Machine"]["nativeDebugging"], false);
}

#[test]
fn test_invalid_launch_settings_does_not_stop_script() {
    let content = r#"{ "profiles": "none" }"#;
    let (dir, csproj) = setup(PROJECT, Some(content));

    let mut reporter = MemoryReporter::new();
    let summary = Unpackager::new(&csproj).run(&mut reporter);

    assert_eq!(summary.launch_settings, StepStatus::Failed);
    assert_eq!(summary.publish_script, StepStatus::Done);
    assert_eq!(
        reporter.messages(Status::Error),
        ["Error: Invalid launchSettings.json format."]
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("Properties").join("launchSettings.json")).unwrap(),
        content
    );
    assert!(script(dir.path()).contains("-f net8.0-windows10.0.19041.0 "));
}

#[test]
fn test_broken_launch_settings_json() {
    let (_dir, csproj) = setup(PROJECT, Some("{ \"profiles\": "));

    let mut reporter = MemoryReporter::new();
    let summary = Unpackager::new(&csproj).run(&mut reporter);

    assert_eq!(summary.launch_settings, StepStatus::Failed);
    let errors = reporter.messages(Status::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error updating launchSettings.json: "));
    assert_eq!(summary.publish_script, StepStatus::Done);
}

#[test]
fn test_rerun_is_idempotent() {
    let (dir, csproj) = setup(PROJECT, Some(LAUNCH_SETTINGS));
    let launch = dir.path().join("Properties").join("launchSettings.json");

    Unpackager::new(&csproj).run(&mut MemoryReporter::new());
    let project_once = fs::read_to_string(&csproj).unwrap();
    let launch_once = fs::read_to_string(&launch).unwrap();
    let script_once = script(dir.path());

    let summary = Unpackager::new(&csproj).run(&mut MemoryReporter::new());
    assert!(summary.project.is_done());
    assert!(summary.launch_settings.is_done());
    assert!(summary.publish_script.is_done());

    assert_eq!(fs::read_to_string(&csproj).unwrap(), project_once);
    assert_eq!(fs::read_to_string(&launch).unwrap(), launch_once);
    assert_eq!(script(dir.path()), script_once);
}
