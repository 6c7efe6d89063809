//! Reading and bumping the marketing version and build number of a project.

use std::path::{Path, PathBuf};

use crate::{
    error::Error,
    formats::{ProjectFile, Setting},
    traits::Parser,
    version::{BumpKind, Version},
};

/// Marketing version reported when the project file has none.
pub const DEFAULT_MARKETING_VERSION: &str = "1.0.0";
/// Build number reported when the project file has none.
pub const DEFAULT_BUILD_NUMBER: &str = "1";

/// The version fields as stored in the project file.
///
/// The marketing version is kept as raw text since `set` accepts any string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub marketing_version: String,
    pub build_number: String,
}

impl VersionInfo {
    fn from_project(project: &ProjectFile) -> Self {
        VersionInfo {
            marketing_version: project
                .get(Setting::MarketingVersion)
                .unwrap_or_else(|| DEFAULT_MARKETING_VERSION.to_string()),
            build_number: project
                .get(Setting::BuildNumber)
                .unwrap_or_else(|| DEFAULT_BUILD_NUMBER.to_string()),
        }
    }

    /// Parses the marketing version.
    pub fn version(&self) -> Result<Version, Error> {
        self.marketing_version.parse()
    }

    /// Parses the build number, ignoring surrounding quotes.
    pub fn build(&self) -> Result<u64, Error> {
        let raw = self
            .build_number
            .trim()
            .trim_matches(|c| c == '"' || c == '\'');
        raw.parse::<u64>()
            .map_err(|source| Error::InvalidBuildNumber {
                value: self.build_number.clone(),
                source,
            })
    }
}

/// The version fields before and after a mutating command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange {
    pub previous: VersionInfo,
    pub current: VersionInfo,
}

impl VersionChange {
    pub fn version_changed(&self) -> bool {
        self.previous.marketing_version != self.current.marketing_version
    }
}

/// Updates the version fields of one project file in place.
#[derive(Debug, Clone)]
pub struct VersionUpdater {
    project_file: PathBuf,
}

impl VersionUpdater {
    /// Fails when `project_file` does not exist.
    pub fn new<P: Into<PathBuf>>(project_file: P) -> Result<Self, Error> {
        let project_file = project_file.into();
        if !project_file.is_file() {
            return Err(Error::MissingFile(project_file));
        }
        Ok(VersionUpdater { project_file })
    }

    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    fn load(&self) -> Result<ProjectFile, Error> {
        tracing::debug!(path = %self.project_file.display(), "reading project file");
        ProjectFile::read_from(&self.project_file)
    }

    fn save(&self, project: &ProjectFile) -> Result<(), Error> {
        tracing::debug!(path = %self.project_file.display(), "writing project file");
        project.write_to(&self.project_file)
    }

    /// Reads the current marketing version and build number.
    pub fn read_version(&self) -> Result<VersionInfo, Error> {
        Ok(VersionInfo::from_project(&self.load()?))
    }

    /// Increments the build number and leaves the marketing version alone.
    pub fn increment_build(&self) -> Result<VersionChange, Error> {
        self.apply(None)
    }

    /// Bumps the marketing version and increments the build number.
    pub fn bump_version(&self, kind: BumpKind) -> Result<VersionChange, Error> {
        let project = self.load()?;
        let previous = VersionInfo::from_project(&project);
        let next = previous.version()?.bump(kind)?;
        self.apply_to(project, Some(next.to_string()))
    }

    /// Stores `version` verbatim and increments the build number.
    ///
    /// The text is not checked to be a `major.minor.patch` version.
    pub fn set_version(&self, version: &str) -> Result<VersionChange, Error> {
        self.apply(Some(version.to_string()))
    }

    fn apply(&self, marketing_version: Option<String>) -> Result<VersionChange, Error> {
        let project = self.load()?;
        self.apply_to(project, marketing_version)
    }

    // Every mutation goes through here: one read, one write, and the build
    // number always advances. A setting missing from the file is reported
    // unchanged, since there is nothing to rewrite.
    fn apply_to(
        &self,
        mut project: ProjectFile,
        marketing_version: Option<String>,
    ) -> Result<VersionChange, Error> {
        let previous = VersionInfo::from_project(&project);
        let build = previous
            .build()?
            .checked_add(1)
            .ok_or_else(|| Error::Overflow(previous.build_number.clone()))?;
        let mut current = previous.clone();

        let build = build.to_string();
        if self.rewrite(&mut project, Setting::BuildNumber, &build) {
            current.build_number = build;
        }

        if let Some(version) = marketing_version
            && self.rewrite(&mut project, Setting::MarketingVersion, &version)
        {
            current.marketing_version = version;
        }

        self.save(&project)?;
        Ok(VersionChange { previous, current })
    }

    fn rewrite(&self, project: &mut ProjectFile, setting: Setting, value: &str) -> bool {
        if project.set(setting, value) == 0 {
            tracing::warn!(
                setting = setting.key(),
                path = %self.project_file.display(),
                "setting not found in project file, left unchanged"
            );
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    const PROJECT: &str = indoc! {r#"
        // !$*UTF8*$!
        {
        	objects = {
        		A1 /* Debug */ = {
        			buildSettings = {
        				CURRENT_PROJECT_VERSION = 7;
        				MARKETING_VERSION = 1.2.3;
        			};
        		};
        		A2 /* Release */ = {
        			buildSettings = {
        				CURRENT_PROJECT_VERSION = 7;
        				MARKETING_VERSION = 1.2.3;
        				SWIFT_VERSION = 5.0;
        			};
        		};
        	};
        }
    "#};

    fn project_with(content: &str) -> (TempDir, VersionUpdater) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("project.pbxproj");
        fs::write(&path, content).unwrap();
        let updater = VersionUpdater::new(&path).unwrap();
        (dir, updater)
    }

    fn read(updater: &VersionUpdater) -> String {
        fs::read_to_string(updater.project_file()).unwrap()
    }

    #[test]
    fn test_new_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        let err = VersionUpdater::new(dir.path().join("missing.pbxproj")).unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }

    #[test]
    fn test_read_version() {
        let (_dir, updater) = project_with(PROJECT);
        let info = updater.read_version().unwrap();
        assert_eq!(info.marketing_version, "1.2.3");
        assert_eq!(info.build_number, "7");
    }

    #[test]
    fn test_read_version_defaults() {
        let (_dir, updater) = project_with("{\n}\n");
        let info = updater.read_version().unwrap();
        assert_eq!(info.marketing_version, DEFAULT_MARKETING_VERSION);
        assert_eq!(info.build_number, DEFAULT_BUILD_NUMBER);
    }

    #[test]
    fn test_minor_bump_rewrites_only_version_fields() {
        let (_dir, updater) = project_with(PROJECT);
        let change = updater.bump_version(BumpKind::Minor).unwrap();

        assert_eq!(change.previous.marketing_version, "1.2.3");
        assert_eq!(change.current.marketing_version, "1.3.0");
        assert_eq!(change.previous.build_number, "7");
        assert_eq!(change.current.build_number, "8");
        assert!(change.version_changed());

        let expected = PROJECT
            .replace("MARKETING_VERSION = 1.2.3;", "MARKETING_VERSION = 1.3.0;")
            .replace("CURRENT_PROJECT_VERSION = 7;", "CURRENT_PROJECT_VERSION = 8;");
        assert_eq!(read(&updater), expected);
    }

    #[test]
    fn test_major_and_patch_bumps() {
        let (_dir, updater) = project_with(PROJECT);
        let change = updater.bump_version(BumpKind::Patch).unwrap();
        assert_eq!(change.current.marketing_version, "1.2.4");
        let change = updater.bump_version(BumpKind::Major).unwrap();
        assert_eq!(change.current.marketing_version, "2.0.0");
        assert_eq!(change.current.build_number, "9");
    }

    #[test]
    fn test_build_only_leaves_version_untouched() {
        let (_dir, updater) = project_with(PROJECT);
        let change = updater.increment_build().unwrap();
        assert!(!change.version_changed());
        assert_eq!(change.current.build_number, "8");
        assert_eq!(
            read(&updater),
            PROJECT.replace("CURRENT_PROJECT_VERSION = 7;", "CURRENT_PROJECT_VERSION = 8;")
        );
    }

    #[test]
    fn test_set_version_is_verbatim() {
        let (_dir, updater) = project_with(PROJECT);
        let change = updater.set_version("2.0-beta").unwrap();
        assert_eq!(change.current.marketing_version, "2.0-beta");
        assert_eq!(change.current.build_number, "8");
        assert!(read(&updater).contains("MARKETING_VERSION = 2.0-beta;"));
    }

    #[test]
    fn test_non_integer_build_number_fails_without_writing() {
        let content = "CURRENT_PROJECT_VERSION = abc;\nMARKETING_VERSION = 1.0.0;\n";
        let (_dir, updater) = project_with(content);
        let err = updater.bump_version(BumpKind::Patch).unwrap_err();
        assert!(matches!(err, Error::InvalidBuildNumber { .. }));
        assert_eq!(read(&updater), content);
    }

    #[test]
    fn test_quoted_build_number() {
        let (_dir, updater) = project_with("CURRENT_PROJECT_VERSION = \"41\";\n");
        let change = updater.increment_build().unwrap();
        assert_eq!(change.current.build_number, "42");
        assert_eq!(read(&updater), "CURRENT_PROJECT_VERSION = 42;\n");
    }

    #[test]
    fn test_bump_after_unparseable_set_fails() {
        let (_dir, updater) = project_with(PROJECT);
        updater.set_version("next").unwrap();
        let err = updater.bump_version(BumpKind::Patch).unwrap_err();
        assert!(matches!(err, Error::InvalidVersion(_)));
    }

    #[test]
    fn test_build_number_at_limit_is_an_error() {
        let content = "CURRENT_PROJECT_VERSION = 18446744073709551615;\n";
        let (_dir, updater) = project_with(content);
        let err = updater.increment_build().unwrap_err();
        assert!(matches!(err, Error::Overflow(ref v) if v == "18446744073709551615"));
        assert_eq!(read(&updater), content);
    }

    #[test]
    fn test_version_at_limit_is_an_error() {
        let content = indoc! {"
            CURRENT_PROJECT_VERSION = 3;
            MARKETING_VERSION = 1.18446744073709551615.0;
        "};
        let (_dir, updater) = project_with(content);
        let err = updater.bump_version(BumpKind::Minor).unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));
        assert_eq!(read(&updater), content);
    }

    #[test]
    fn test_absent_build_number_is_reported_unchanged() {
        let content = "MARKETING_VERSION = 1.0.0;\n";
        let (_dir, updater) = project_with(content);
        let change = updater.increment_build().unwrap();
        assert_eq!(change.previous.build_number, DEFAULT_BUILD_NUMBER);
        assert_eq!(change.current.build_number, DEFAULT_BUILD_NUMBER);
        assert_eq!(read(&updater), content);
    }

    #[test]
    fn test_absent_marketing_version_is_reported_unchanged() {
        let content = "CURRENT_PROJECT_VERSION = 4;\n";
        let (_dir, updater) = project_with(content);
        let change = updater.set_version("2.0.0").unwrap();
        assert!(!change.version_changed());
        assert_eq!(change.current.marketing_version, DEFAULT_MARKETING_VERSION);
        assert_eq!(change.current.build_number, "5");
        assert_eq!(read(&updater), "CURRENT_PROJECT_VERSION = 5;\n");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_build_only_increments_accumulate(start in 0u64..100_000, runs in 1usize..6) {
            let (_dir, updater) = project_with(&format!(
                "CURRENT_PROJECT_VERSION = {};\nMARKETING_VERSION = 4.5.6;\n",
                start
            ));
            for _ in 0..runs {
                updater.increment_build().unwrap();
            }
            let info = updater.read_version().unwrap();
            prop_assert_eq!(info.build().unwrap(), start + runs as u64);
            prop_assert_eq!(info.marketing_version, "4.5.6");
        }

        #[test]
        fn prop_build_increments_accumulate(start in 0u64..100_000, runs in 1usize..6) {
            let (_dir, updater) = project_with(&format!(
                "CURRENT_PROJECT_VERSION = {};\nMARKETING_VERSION = 1.0.0;\n",
                start
            ));
            for _ in 0..runs {
                updater.bump_version(BumpKind::Patch).unwrap();
            }
            let info = updater.read_version().unwrap();
            prop_assert_eq!(info.build().unwrap(), start + runs as u64);
            prop_assert_eq!(info.version().unwrap(), Version::new(1, 0, runs as u64));
        }
    }
}
