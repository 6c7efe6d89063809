use std::path::PathBuf;

use clap::{Parser, Subcommand};
use relkit::{BumpKind, Config, Error, VersionChange, VersionUpdater};

/// Update the marketing version and build number of an Xcode project.
#[derive(Parser, Debug)]
#[command(name = "update-version", author, version, about, long_about = None)]
pub struct UpdateVersionArgs {
    /// Project root directory
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (defaults to relkit.toml under the project root, if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path of project.pbxproj, overriding the config
    #[arg(long, global = true)]
    pub project_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: VersionCommand,
}

/// Supported subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum VersionCommand {
    /// Show the current version and build number.
    Current,
    /// Only increment the build number.
    Build,
    /// Increment the major version (1.2.3 -> 2.0.0).
    Major,
    /// Increment the minor version (1.2.3 -> 1.3.0).
    Minor,
    /// Increment the patch version (1.2.3 -> 1.2.4).
    Patch,
    /// Set a specific version.
    Set {
        /// The version to store, e.g. 1.2.3
        version: String,
    },
}

impl UpdateVersionArgs {
    fn project_file(&self) -> Result<PathBuf, Error> {
        if let Some(path) = &self.project_file {
            return Ok(self.root.join(path));
        }
        // Only the [version] section concerns this tool.
        let config = Config::discover(&self.root, self.config.as_deref())?;
        config.version.validate()?;
        Ok(config.project_file(&self.root))
    }
}

pub fn run_update_version(args: UpdateVersionArgs) -> Result<(), Error> {
    let project_file = args.project_file()?;
    tracing::debug!(path = %project_file.display(), command = ?args.command, "updating version");
    let updater = VersionUpdater::new(project_file)?;
    let current = updater.read_version()?;

    println!(
        "🔍 Current version: {} (build: {})",
        current.marketing_version, current.build_number
    );

    match args.command {
        VersionCommand::Current => {
            println!("✅ App version: {}", current.marketing_version);
            println!("✅ Build version: {}", current.build_number);
        }
        VersionCommand::Build => {
            let change = updater.increment_build()?;
            print_change(&change, None);
        }
        VersionCommand::Major => bump(&updater, BumpKind::Major)?,
        VersionCommand::Minor => bump(&updater, BumpKind::Minor)?,
        VersionCommand::Patch => bump(&updater, BumpKind::Patch)?,
        VersionCommand::Set { version } => {
            let change = updater.set_version(&version)?;
            print_change(&change, Some("🎯 Version set"));
        }
    }

    Ok(())
}

fn bump(updater: &VersionUpdater, kind: BumpKind) -> Result<(), Error> {
    let change = updater.bump_version(kind)?;
    print_change(&change, Some("🚀 Version updated"));
    Ok(())
}

fn print_change(change: &VersionChange, version_label: Option<&str>) {
    for line in describe_change(change, version_label) {
        println!("{}", line);
    }
}

fn describe_change(change: &VersionChange, version_label: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(label) = version_label {
        lines.push(format!(
            "{}: {} -> {}",
            label, change.previous.marketing_version, change.current.marketing_version
        ));
    }
    lines.push(format!(
        "🔨 Build number updated: {} -> {}",
        change.previous.build_number, change.current.build_number
    ));
    lines.push(format!(
        "✅ New version: {} (build: {})",
        change.current.marketing_version, change.current.build_number
    ));
    lines
}
