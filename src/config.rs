//! Target configuration: which sources to scan and where to write.
//!
//! A `depgen.yaml` looks like:
//!
//! ```yaml
//! sources: ["../src/*.cxx"]
//! includes: ["../include", "../src"]
//! targets:
//!   - name: gtk4
//!     sources: ["../gtk4/*.cxx"]
//!     includes: ["../gtk4"]
//!     start_directory: "../gtk4/"
//!     output: "../gtk4/deps.mak"
//! ```
//!
//! Without a config file the built-in `gtk4` target above is used.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ports::FileSystem;

/// Comment written at the top of every generated fragment.
pub const DEFAULT_HEADER_COMMENT: &str = "# Created by DepGen.py. To recreate, run DepGen.py.";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "depgen.yaml";

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "DEPGEN_CONFIG";

/// Shared source and include lists plus the targets built from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepGenConfig {
    /// Source globs scanned for every target, after the target's own.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Include directories searched for every target, after the target's own.
    #[serde(default)]
    pub includes: Vec<String>,
    /// Output targets.
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

/// One generated dependency file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Name used to select the target on the command line.
    pub name: String,
    /// Target-specific source globs, scanned first.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Target-specific include directories, searched first.
    #[serde(default)]
    pub includes: Vec<String>,
    /// Appended to each source stem to name its object file.
    #[serde(default = "default_object_suffix")]
    pub object_suffix: String,
    /// Prefix removed from every path written to the output.
    #[serde(default)]
    pub start_directory: String,
    /// Path of the generated fragment.
    pub output: PathBuf,
    /// First line of the generated fragment.
    #[serde(default = "default_header_comment")]
    pub header_comment: String,
    /// Include names substituted before resolution.
    #[serde(default)]
    pub renames: BTreeMap<String, String>,
    /// Extra object names sharing another object's prerequisites.
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
}

/// An object compiled twice from the same source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonym {
    /// Existing object name.
    pub object: String,
    /// Additional object name inserted after it.
    pub alias: String,
}

fn default_object_suffix() -> String {
    ".o".to_string()
}

fn default_header_comment() -> String {
    DEFAULT_HEADER_COMMENT.to_string()
}

impl DepGenConfig {
    /// The GTK 4 layout: run from the `gtk4` directory, scanning it and
    /// `../src`, writing `../gtk4/deps.mak`.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            sources: vec!["../src/*.cxx".into()],
            includes: vec!["../include".into(), "../src".into()],
            targets: vec![TargetConfig {
                name: "gtk4".into(),
                sources: vec!["../gtk4/*.cxx".into()],
                includes: vec!["../gtk4".into()],
                object_suffix: default_object_suffix(),
                start_directory: "../gtk4/".into(),
                output: PathBuf::from("../gtk4/deps.mak"),
                header_comment: default_header_comment(),
                renames: BTreeMap::new(),
                synonyms: Vec::new(),
            }],
        }
    }

    /// Parses and validates YAML config text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or fails validation.
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| format!("failed to parse config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file through the filesystem port.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, String> {
        let text = fs
            .read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
        Self::from_yaml(&text).map_err(|e| format!("{}: {e}", path.display()))
    }

    /// Finds the config to use.
    ///
    /// Order: `explicit`, then `$DEPGEN_CONFIG`, then `./depgen.yaml` if it
    /// exists, then [`DepGenConfig::builtin`].
    ///
    /// # Errors
    ///
    /// Returns an error if a named or discovered file cannot be loaded.
    pub fn locate(fs: &dyn FileSystem, explicit: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = explicit {
            return Self::load(fs, path);
        }
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Self::load(fs, Path::new(&path));
            }
        }
        let local = Path::new(CONFIG_FILE_NAME);
        if fs.exists(local) {
            return Self::load(fs, local);
        }
        Ok(Self::builtin())
    }

    /// Checks that there is at least one target and that names are unique.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.targets.is_empty() {
            return Err("config defines no targets".to_string());
        }
        let mut seen = Vec::new();
        for target in &self.targets {
            if target.name.trim().is_empty() {
                return Err("target with an empty name".to_string());
            }
            if seen.contains(&target.name.as_str()) {
                return Err(format!("duplicate target name: {}", target.name));
            }
            seen.push(target.name.as_str());
        }
        Ok(())
    }

    /// Returns the named targets in the order given, or every target when
    /// `names` is empty.
    ///
    /// # Errors
    ///
    /// Returns an error listing the available names if one is unknown.
    pub fn select(&self, names: &[String]) -> Result<Vec<&TargetConfig>, String> {
        if names.is_empty() {
            return Ok(self.targets.iter().collect());
        }
        names
            .iter()
            .map(|name| {
                self.targets.iter().find(|t| &t.name == name).ok_or_else(|| {
                    let available: Vec<&str> =
                        self.targets.iter().map(|t| t.name.as_str()).collect();
                    format!("unknown target {name}; available: {}", available.join(", "))
                })
            })
            .collect()
    }

    /// The target's globs followed by the shared globs.
    #[must_use]
    pub fn source_globs(&self, target: &TargetConfig) -> Vec<String> {
        target.sources.iter().chain(&self.sources).cloned().collect()
    }

    /// The target's include directories followed by the shared ones.
    #[must_use]
    pub fn include_dirs(&self, target: &TargetConfig) -> Vec<String> {
        target.includes.iter().chain(&self.includes).cloned().collect()
    }
}
