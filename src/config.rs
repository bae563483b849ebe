// Wed Oct 14 2026 - Alex

use crate::ir::{IrError, TextFormat};
use crate::version_script::{parse_api_level, ApiLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for one link run. Every field can come from a JSON file and be
/// overridden on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arch: String,
    pub api: String,
    pub excluded_symbol_versions: BTreeSet<String>,
    pub excluded_symbol_tags: BTreeSet<String>,
    pub version_script: Option<PathBuf>,
    pub so_file: Option<PathBuf>,
    /// Entities declared outside these directories are dropped when linking.
    pub exported_header_dirs: Vec<PathBuf>,
    pub dump_files: Vec<PathBuf>,
    pub output: PathBuf,
    pub text_format: String,
    pub no_filter: bool,
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arch: String::new(),
            api: "current".to_string(),
            excluded_symbol_versions: BTreeSet::new(),
            excluded_symbol_tags: BTreeSet::new(),
            version_script: None,
            so_file: None,
            exported_header_dirs: Vec::new(),
            dump_files: Vec::new(),
            output: PathBuf::from("linked.lsdump.json"),
            text_format: "json".to_string(),
            no_filter: false,
            pretty: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        let config: Config = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn with_arch(mut self, arch: &str) -> Self {
        self.arch = arch.to_string();
        self
    }

    pub fn with_api(mut self, api: &str) -> Self {
        self.api = api.to_string();
        self
    }

    pub fn with_version_script(mut self, path: PathBuf) -> Self {
        self.version_script = Some(path);
        self
    }

    pub fn with_so_file(mut self, path: PathBuf) -> Self {
        self.so_file = Some(path);
        self
    }

    pub fn with_exported_header_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.exported_header_dirs = dirs;
        self
    }

    pub fn with_dump_files(mut self, files: Vec<PathBuf>) -> Self {
        self.dump_files = files;
        self
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }

    pub fn with_no_filter(mut self, no_filter: bool) -> Self {
        self.no_filter = no_filter;
        self
    }

    pub fn with_excluded_symbol_version(mut self, version: &str) -> Self {
        self.excluded_symbol_versions.insert(version.to_string());
        self
    }

    pub fn with_excluded_symbol_tag(mut self, tag: &str) -> Self {
        self.excluded_symbol_tags.insert(tag.to_string());
        self
    }

    pub fn api_level(&self) -> Option<ApiLevel> {
        parse_api_level(&self.api)
    }

    pub fn text_format(&self) -> Result<TextFormat, IrError> {
        self.text_format.parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.arch.is_empty() {
            return Err("arch must be set".to_string());
        }
        if self.api_level().is_none() {
            return Err(format!("api must be an integer, \"current\" or \"future\", got {:?}", self.api));
        }
        if let Err(e) = self.text_format() {
            return Err(e.to_string());
        }
        if self.dump_files.is_empty() {
            return Err("At least one input dump is required".to_string());
        }
        if self.version_script.is_some() && self.so_file.is_some() {
            return Err("version_script and so_file are mutually exclusive".to_string());
        }
        if !self.no_filter && self.version_script.is_none() && self.so_file.is_none() {
            return Err("Either version_script or so_file must be set unless no_filter is enabled".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version_script::FUTURE_API_LEVEL;

    fn linkable() -> Config {
        Config::new()
            .with_arch("arm64")
            .with_version_script(PathBuf::from("libfoo.map.txt"))
            .with_dump_files(vec![PathBuf::from("foo.sdump")])
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_level(), Some(FUTURE_API_LEVEL));
        assert_eq!(config.text_format().unwrap(), TextFormat::Json);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(linkable().validate().is_ok());
        assert!(linkable().with_api("Q").validate().is_err());
        assert!(linkable().with_arch("").validate().is_err());
        assert!(linkable().with_dump_files(Vec::new()).validate().is_err());

        let mut unfiltered = linkable();
        unfiltered.version_script = None;
        assert!(unfiltered.validate().is_err());
        assert!(unfiltered.with_no_filter(true).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_both_export_sources() {
        let both = linkable().with_so_file(PathBuf::from("libfoo.so"));
        assert!(both.validate().unwrap_err().contains("mutually exclusive"));
        assert!(both.clone().with_no_filter(true).validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let path = std::env::temp_dir().join(format!("header_abi_util_config_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "arch": "x86", "api": "28", "excluded_symbol_tags": ["llndk"], "exported_header_dirs": ["include"] }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.arch, "x86");
        assert_eq!(config.api_level(), Some(28));
        assert!(config.excluded_symbol_tags.contains("llndk"));
        assert_eq!(config.exported_header_dirs, vec![PathBuf::from("include")]);
        assert_eq!(config.text_format, "json");
        assert!(config.pretty);
    }
}
