//! Targeted access to build settings inside an Xcode `project.pbxproj`.
//!
//! The project file is never parsed as a whole. Settings are located with a
//! regular expression and rewritten in place, so every byte outside the
//! matched `KEY = value;` spans is written back unchanged.

use std::{
    fmt::{Display, Formatter},
    io::{BufRead, Read, Write},
};

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

use crate::{error::Error, traits::Parser};

lazy_static! {
    static ref MARKETING_VERSION_REGEX: Regex =
        Regex::new(r"MARKETING_VERSION = ([^;]+);").unwrap();
    static ref CURRENT_PROJECT_VERSION_REGEX: Regex =
        Regex::new(r"CURRENT_PROJECT_VERSION = ([^;]+);").unwrap();
}

/// The build settings relkit reads and rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// `MARKETING_VERSION`, the user-facing version string.
    MarketingVersion,
    /// `CURRENT_PROJECT_VERSION`, the build number.
    BuildNumber,
}

impl Setting {
    /// The key as it appears in the project file.
    pub fn key(&self) -> &'static str {
        match self {
            Setting::MarketingVersion => "MARKETING_VERSION",
            Setting::BuildNumber => "CURRENT_PROJECT_VERSION",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            Setting::MarketingVersion => &MARKETING_VERSION_REGEX,
            Setting::BuildNumber => &CURRENT_PROJECT_VERSION_REGEX,
        }
    }
}

impl Display for Setting {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The raw text of a project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    content: String,
}

impl ProjectFile {
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the trimmed value of the first occurrence of `setting`.
    pub fn get(&self, setting: Setting) -> Option<String> {
        setting
            .regex()
            .captures(&self.content)
            .and_then(|caps| caps.get(1))
            .map(|value| value.as_str().trim().to_string())
    }

    /// Rewrites every occurrence of `setting` to `KEY = value;`.
    ///
    /// Xcode repeats build settings once per build configuration, so all
    /// occurrences are replaced. The value is inserted literally. Returns the
    /// number of occurrences rewritten.
    pub fn set(&mut self, setting: Setting, value: &str) -> usize {
        let regex = setting.regex();
        let count = regex.find_iter(&self.content).count();
        if count == 0 {
            return 0;
        }

        let replacement = format!("{} = {};", setting.key(), value);
        let updated = regex
            .replace_all(&self.content, NoExpand(&replacement))
            .into_owned();
        self.content = updated;

        tracing::debug!(setting = setting.key(), count, value, "rewrote build setting");
        count
    }
}

impl Parser for ProjectFile {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(ProjectFile { content })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writer.write_all(self.content.as_bytes()).map_err(Error::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const PROJECT: &str = indoc! {r#"
        /* Begin XCBuildConfiguration section */
        		A1 /* Debug */ = {
        			buildSettings = {
        				CURRENT_PROJECT_VERSION = 7;
        				MARKETING_VERSION = 1.2.3;
        				PRODUCT_NAME = "$(TARGET_NAME)";
        			};
        		};
        		A2 /* Release */ = {
        			buildSettings = {
        				CURRENT_PROJECT_VERSION = 7;
        				MARKETING_VERSION = 1.2.3;
        			};
        		};
        /* End XCBuildConfiguration section */
    "#};

    #[test]
    fn test_get_reads_first_occurrence() {
        let project = ProjectFile::from_str(PROJECT).unwrap();
        assert_eq!(
            project.get(Setting::MarketingVersion).as_deref(),
            Some("1.2.3")
        );
        assert_eq!(project.get(Setting::BuildNumber).as_deref(), Some("7"));
    }

    #[test]
    fn test_get_missing_setting() {
        let project = ProjectFile::from_str("// no settings here\n").unwrap();
        assert_eq!(project.get(Setting::MarketingVersion), None);
        assert_eq!(project.get(Setting::BuildNumber), None);
    }

    #[test]
    fn test_set_rewrites_every_occurrence_and_nothing_else() {
        let mut project = ProjectFile::from_str(PROJECT).unwrap();
        assert_eq!(project.set(Setting::MarketingVersion, "1.3.0"), 2);
        assert_eq!(project.set(Setting::BuildNumber, "8"), 2);

        let expected = PROJECT
            .replace("MARKETING_VERSION = 1.2.3;", "MARKETING_VERSION = 1.3.0;")
            .replace("CURRENT_PROJECT_VERSION = 7;", "CURRENT_PROJECT_VERSION = 8;");
        assert_eq!(project.content(), expected);
    }

    #[test]
    fn test_set_inserts_value_literally() {
        let mut project = ProjectFile::from_str("MARKETING_VERSION = 1.0;\n").unwrap();
        project.set(Setting::MarketingVersion, "$(VERSION)$1");
        assert_eq!(project.content(), "MARKETING_VERSION = $(VERSION)$1;\n");
    }

    #[test]
    fn test_set_without_match_leaves_content_untouched() {
        let mut project = ProjectFile::from_str("PRODUCT_NAME = App;\n").unwrap();
        assert_eq!(project.set(Setting::BuildNumber, "2"), 0);
        assert_eq!(project.content(), "PRODUCT_NAME = App;\n");
    }

    #[test]
    fn test_writer_preserves_bytes() {
        let source = "MARKETING_VERSION = 1.0.0;\r\nOTHER = x;\r\n\r\n";
        let project = ProjectFile::from_str(source).unwrap();
        let mut out = Vec::new();
        project.to_writer(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), source);
    }
}
