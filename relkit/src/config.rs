//! Project configuration for both tools.
//!
//! Read from a `relkit.toml` at the project root. Every field is optional and
//! falls back to the layout of the app project these tools were written for.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// File name looked up at the project root when no config path is given.
pub const CONFIG_FILE_NAME: &str = "relkit.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub version: VersionConfig,
    pub localization: LocalizationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionConfig {
    /// Path of the `project.pbxproj`, relative to the project root.
    pub project_file: PathBuf,
}

impl VersionConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.project_file.as_os_str().is_empty() {
            return Err(Error::config_error("project file path cannot be empty"));
        }
        Ok(())
    }
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            project_file: PathBuf::from("Promptly.xcodeproj/project.pbxproj"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalizationConfig {
    /// Directory holding the `<lang>.lproj` folders, relative to the project root.
    pub resources_dir: PathBuf,
    /// Every language to validate, base language included.
    pub languages: Vec<String>,
    /// The reference language every other language is compared against.
    pub base_language: String,
    /// Table name, i.e. the `.strings` file stem inside each `.lproj`.
    pub table: String,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        LocalizationConfig {
            resources_dir: PathBuf::from("PromptPal/Resources"),
            languages: vec!["en".to_string(), "zh-Hans".to_string()],
            base_language: "en".to_string(),
            table: "Localizable".to_string(),
        }
    }
}

impl LocalizationConfig {
    /// Path of the `.strings` table for `language` under `resources_dir`.
    pub fn strings_path(&self, resources_dir: &Path, language: &str) -> PathBuf {
        resources_dir
            .join(format!("{}.lproj", language))
            .join(format!("{}.strings", self.table))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.languages.is_empty() {
            return Err(Error::config_error("no languages configured"));
        }

        let mut seen = HashSet::new();
        for lang in &self.languages {
            validate_language_code(lang)?;
            if !seen.insert(lang.as_str()) {
                return Err(Error::config_error(format!(
                    "language `{}` is listed more than once",
                    lang
                )));
            }
        }

        if !seen.contains(self.base_language.as_str()) {
            return Err(Error::config_error(format!(
                "base language `{}` is not in the language list",
                self.base_language
            )));
        }

        if self.table.trim().is_empty() {
            return Err(Error::config_error("table name cannot be empty"));
        }

        Ok(())
    }
}

impl Config {
    /// Parses a config. Each section is validated by the tool that uses it,
    /// see [`VersionConfig::validate`] and [`LocalizationConfig::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the config file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)?;
        Config::from_toml_str(&content)
    }

    /// Resolves the configuration for a project rooted at `root`.
    ///
    /// An explicit path must exist. Otherwise `relkit.toml` under `root` is
    /// used when present, and the defaults when it is not.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Config::load(path);
        }

        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Config::load(candidate)
        } else {
            tracing::debug!(root = %root.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn project_file(&self, root: &Path) -> PathBuf {
        root.join(&self.version.project_file)
    }

    pub fn resources_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.localization.resources_dir)
    }
}

/// Validate a language id as a BCP 47 identifier.
pub fn validate_language_code(lang: &str) -> Result<(), Error> {
    if lang.trim().is_empty() {
        return Err(Error::config_error("language code cannot be empty"));
    }

    lang.parse::<LanguageIdentifier>().map(|_| ()).map_err(|_| {
        Error::config_error(format!(
            "invalid language code `{}`, expected a BCP 47 language identifier",
            lang
        ))
    })
}
