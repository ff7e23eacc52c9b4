use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Name of the config document at the repository root
pub const CONFIG_FILE: &str = "tdver.json";

/// CI manifest scaffolded by `start`
pub const CI_MANIFEST: &str = ".travis.yml";

/// Command the CI manifest runs to enforce the rules
pub const VALIDATE_COMMAND: &str = "tdver check";

fn default_version() -> String {
    "0.0.0".to_string()
}

fn default_tests() -> String {
    "tests/".to_string()
}

fn default_bug_tests() -> String {
    "bugs/".to_string()
}

/// The persisted `tdver.json` document.
///
/// Keys tdver does not know about are carried through untouched.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_tests")]
    pub tests: String,

    #[serde(default = "default_bug_tests")]
    pub bug_tests: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: default_version(),
            tests: default_tests(),
            bug_tests: default_bug_tests(),
            extra: Map::new(),
        }
    }
}

impl Config {
    /// Load the config document.
    ///
    /// # Returns
    /// * `Ok(Some(Config))` - The file exists and parsed
    /// * `Ok(None)` - No config file; the repository is not using tdver yet
    /// * `Err` - The file exists but cannot be read or parsed
    pub fn load(path: &Path) -> Result<Option<Config>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Write the document with sorted keys and four-space indentation.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Round-trip through Value so every key, known or passed through,
        // lands in one sorted map.
        let value = serde_json::to_value(self)?;

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        buf.push(b'\n');

        fs::write(path, buf)?;
        Ok(())
    }
}

/// Explicit settings the release workflow runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path prefix of test files
    pub tests: String,
    /// Path prefix of regression (bug) tests
    pub bug_tests: String,
    /// Config document, relative to the working tree
    pub config_file: String,
    /// CI manifest, relative to the working tree
    pub ci_manifest: String,
    pub validate_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tests: default_tests(),
            bug_tests: default_bug_tests(),
            config_file: CONFIG_FILE.to_string(),
            ci_manifest: CI_MANIFEST.to_string(),
            validate_command: VALIDATE_COMMAND.to_string(),
        }
    }
}

impl Settings {
    /// These settings with the test prefixes taken from a loaded config
    pub fn with_prefixes_from(self, config: &Config) -> Self {
        Settings {
            tests: config.tests.clone(),
            bug_tests: config.bug_tests.clone(),
            ..self
        }
    }
}
