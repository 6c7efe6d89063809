//! Checks that every language's `.strings` table matches the base language.
//!
//! A set of tables is valid when no language misses a key of the base
//! language and no language (base included) has an empty value. Keys a
//! translation has but the base lacks are reported as extra, and only warned
//! about.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use indoc::formatdoc;
use serde::Serialize;

use crate::{
    config::{Config, LocalizationConfig},
    error::Error,
    formats::StringsFile,
    traits::Parser,
};

/// Keys one table has that the other lacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyDiff {
    /// In base, absent from the other table.
    pub missing: BTreeSet<String>,
    /// In the other table, absent from base.
    pub extra: BTreeSet<String>,
}

impl KeyDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compares the key sets of `base` and `other`.
pub fn compare(base: &StringsFile, other: &StringsFile) -> KeyDiff {
    let base_keys = base.keys();
    let other_keys = other.keys();

    KeyDiff {
        missing: base_keys
            .difference(&other_keys)
            .map(|key| key.to_string())
            .collect(),
        extra: other_keys
            .difference(&base_keys)
            .map(|key| key.to_string())
            .collect(),
    }
}

/// Keys whose value is empty once surrounding whitespace is trimmed.
pub fn find_empty(file: &StringsFile) -> BTreeSet<String> {
    file.empty_keys()
}

/// Parses the `.strings` file at `path`.
///
/// A missing file is not an error: it is logged and yields no entries.
pub fn parse_strings_file(path: &Path) -> Result<StringsFile, Error> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "strings file does not exist");
        return Ok(StringsFile::default());
    }

    let file = StringsFile::read_from(path)?;
    tracing::debug!(path = %path.display(), keys = file.len(), "parsed strings file");
    Ok(file)
}

/// Result of checking one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageReport {
    pub language: String,
    pub path: PathBuf,
    pub is_base: bool,
    /// Whether the table exists on disk. A missing table counts as empty.
    pub found: bool,
    pub key_count: usize,
    pub missing: BTreeSet<String>,
    pub extra: BTreeSet<String>,
    pub empty: BTreeSet<String>,
}

impl LanguageReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty() && self.empty.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub base_language: String,
    pub valid: bool,
    pub languages: Vec<LanguageReport>,
    #[serde(skip)]
    base_entries: StringsFile,
}

impl ValidationReport {
    fn new(
        base_language: String,
        base_entries: StringsFile,
        languages: Vec<LanguageReport>,
    ) -> Self {
        let valid = languages.iter().all(LanguageReport::is_valid);
        ValidationReport {
            base_language,
            valid,
            languages,
            base_entries,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn base(&self) -> Option<&LanguageReport> {
        self.languages.iter().find(|lang| lang.is_base)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The keys `language` is missing, carrying the base values as
    /// placeholders. Returns `None` when nothing is missing.
    pub fn missing_keys_table(&self, language: &str) -> Option<StringsFile> {
        let report = self
            .languages
            .iter()
            .find(|lang| lang.language == language && !lang.is_base)?;
        if report.missing.is_empty() {
            return None;
        }

        let entries = report
            .missing
            .iter()
            .map(|key| {
                let value = self.base_entries.get(key).unwrap_or_default();
                (key.clone(), value.to_string())
            })
            .collect();
        Some(StringsFile { entries })
    }

    /// Renders [`missing_keys_table`](Self::missing_keys_table) as a
    /// `.strings` snippet ready to paste into the language's table.
    pub fn missing_keys_template(&self, language: &str) -> Result<Option<String>, Error> {
        let Some(table) = self.missing_keys_table(language) else {
            return Ok(None);
        };

        let mut out = formatdoc! {"
            // Missing keys for {language}.
            // Values are copied from {base} and still need translating.

            ",
            base = self.base_language,
        }
        .into_bytes();
        table.to_writer(&mut out)?;

        Ok(Some(String::from_utf8_lossy(&out).into_owned()))
    }
}

/// Validates the `.strings` tables of a fixed set of languages.
#[derive(Debug, Clone)]
pub struct LocalizationValidator {
    resources_dir: PathBuf,
    config: LocalizationConfig,
}

impl LocalizationValidator {
    pub fn new<P: Into<PathBuf>>(resources_dir: P, config: LocalizationConfig) -> Self {
        LocalizationValidator {
            resources_dir: resources_dir.into(),
            config,
        }
    }

    /// Builds a validator for the project rooted at `root`.
    pub fn from_config(config: &Config, root: &Path) -> Self {
        LocalizationValidator::new(config.resources_dir(root), config.localization.clone())
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    pub fn strings_path(&self, language: &str) -> PathBuf {
        self.config.strings_path(&self.resources_dir, language)
    }

    pub fn validate(&self) -> Result<ValidationReport, Error> {
        self.config.validate()?;

        if !self.resources_dir.is_dir() {
            return Err(Error::config_error(format!(
                "resources directory does not exist: {}",
                self.resources_dir.display()
            )));
        }

        let base_language = &self.config.base_language;
        let base_path = self.strings_path(base_language);
        if !base_path.is_file() {
            return Err(Error::config_error(format!(
                "base language `{}` file does not exist: {}",
                base_language,
                base_path.display()
            )));
        }
        let base = StringsFile::read_from(&base_path).map_err(|e| {
            Error::config_error(format!(
                "base language `{}` file cannot be read: {}: {}",
                base_language,
                base_path.display(),
                e
            ))
        })?;

        let mut languages = Vec::with_capacity(self.config.languages.len());
        for language in &self.config.languages {
            if language == base_language {
                languages.push(LanguageReport {
                    language: language.clone(),
                    path: base_path.clone(),
                    is_base: true,
                    found: true,
                    key_count: base.len(),
                    missing: BTreeSet::new(),
                    extra: BTreeSet::new(),
                    empty: find_empty(&base),
                });
                continue;
            }

            let path = self.strings_path(language);
            let found = path.is_file();
            let table = parse_strings_file(&path)?;
            let KeyDiff { missing, extra } = compare(&base, &table);

            languages.push(LanguageReport {
                language: language.clone(),
                path,
                is_base: false,
                found,
                key_count: table.len(),
                missing,
                extra,
                empty: find_empty(&table),
            });
        }

        Ok(ValidationReport::new(base_language.clone(), base, languages))
    }
}
