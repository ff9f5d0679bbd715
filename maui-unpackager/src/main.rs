use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};
use log::LevelFilter;
use maui_unpackager::{USAGE, Unpackager, report::ConsoleReporter};

/// Convert a packaged .NET MAUI project into an unpackaged one.
#[derive(Parser, Debug)]
#[command(name = "MauiUnpackager", version, about)]
struct Cli {
    /// Path to the project's .csproj file.
    #[arg(value_name = "path_to_csproj", allow_hyphen_values = true)]
    csproj: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            log::debug!("{e}");
            println!("{USAGE}");
            return Ok(());
        }
    };

    let [csproj] = cli.csproj.as_slice() else {
        println!("{USAGE}");
        return Ok(());
    };

    let summary = Unpackager::new(csproj).run(&mut ConsoleReporter);
    log::debug!("{summary:?}");

    Ok(())
}
