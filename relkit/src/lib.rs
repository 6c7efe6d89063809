#![forbid(unsafe_code)]
//! Release maintenance toolkit for Xcode projects.
//!
//! Two independent tools share this crate:
//!
//! - the version updater, which bumps `MARKETING_VERSION` and
//!   `CURRENT_PROJECT_VERSION` inside a `project.pbxproj` without touching any
//!   other byte of the file;
//! - the localization validator, which checks every language's `.strings`
//!   table against a base language.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use relkit::{BumpKind, Config, LocalizationValidator, VersionUpdater};
//!
//! let root = Path::new(".");
//! let config = Config::discover(root, None)?;
//!
//! let updater = VersionUpdater::new(config.project_file(root))?;
//! let change = updater.bump_version(BumpKind::Minor)?;
//! println!("{} -> {}", change.previous.marketing_version, change.current.marketing_version);
//!
//! let report = LocalizationValidator::from_config(&config, root).validate()?;
//! assert!(report.is_valid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod formats;
pub mod traits;
pub mod updater;
pub mod validator;
pub mod version;

// Re-export most used types for easy consumption
pub use crate::{
    config::Config,
    error::Error,
    formats::{ProjectFile, Setting, StringsFile},
    updater::{VersionChange, VersionInfo, VersionUpdater},
    validator::{
        KeyDiff, LanguageReport, LocalizationValidator, ValidationReport, compare, find_empty,
    },
    version::{BumpKind, Version},
};
