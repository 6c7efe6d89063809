//! Support for Apple `.strings` localization files.
//!
//! Only the flat `"key" = "value";` shape is understood. Anything else in the
//! file (comments, malformed lines, alternate quoting) is skipped without
//! error.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::{BufRead, Read, Write},
    path::Path,
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, traits::Parser};

lazy_static! {
    // "key" = "value";  (value may hold escapes such as \" and span lines)
    static ref PAIR_REGEX: Regex =
        Regex::new(r#"(?s)"([^"]+)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;"#).unwrap();
}

/// The key/value content of one `.strings` file.
///
/// Values are kept in their escaped source form and trimmed of surrounding
/// whitespace. When a key appears more than once, the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringsFile {
    pub entries: BTreeMap<String, String>,
}

impl StringsFile {
    /// Extracts every `"key" = "value";` pair from `content`.
    pub fn parse(content: &str) -> Self {
        let entries = PAIR_REGEX
            .captures_iter(content)
            .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
            .collect();
        StringsFile { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Keys whose value is empty or whitespace-only.
    pub fn empty_keys(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl Parser for StringsFile {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(StringsFile::parse(&content))
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();
        for (key, value) in &self.entries {
            let pair = Pair {
                key: key.clone(),
                value: value.clone(),
            };
            content.push_str(&pair.to_string());
            content.push('\n');
        }
        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }

    /// Override default file reading to support BOM-aware decoding (e.g., UTF-16 Apple .strings)
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Ok(StringsFile::parse(&decoded))
    }
}

/// A single key-value pair in a `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    /// Value in escaped source form.
    pub value: String,
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" = \"{}\";", self.key, self.value)
    }
}
