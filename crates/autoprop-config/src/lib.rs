//! `autoprop.toml` loading.
//!
//! Every key is optional; a missing file section takes the defaults the
//! generator uses without any configuration.

use autoprop_build::GeneratorOptions;
use autoprop_schema::prelude::*;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Conventional file name looked up next to the input.
pub const CONFIG_FILE_NAME: &str = "autoprop.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config key '{0}' must not be empty")]
    EmptyValue(&'static str),
}

///
/// AutopropConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AutopropConfig {
    pub generator: GeneratorSection,
    pub serialization: SerializationSection,
}

impl AutopropConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Load `dir/autoprop.toml` if present, defaults otherwise.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.file_suffix.is_empty() {
            return Err(ConfigError::EmptyValue("generator.file_suffix"));
        }
        if self.serialization.metadata_suffix.is_empty() {
            return Err(ConfigError::EmptyValue("serialization.metadata_suffix"));
        }

        Ok(())
    }

    #[must_use]
    pub fn to_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            file_suffix: self.generator.file_suffix.clone(),
            header: self.generator.header.clone(),
            emit_scaffold: self.generator.emit_scaffold,
            default_capability: self.generator.default_capability,
            default_naming: self.serialization.default_naming,
            metadata_suffix: self.serialization.metadata_suffix.clone(),
        }
    }
}

impl From<AutopropConfig> for GeneratorOptions {
    fn from(config: AutopropConfig) -> Self {
        config.to_options()
    }
}

///
/// GeneratorSection
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSection {
    pub file_suffix: String,
    pub header: String,
    pub emit_scaffold: bool,
    pub default_capability: Capability,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        let options = GeneratorOptions::default();

        Self {
            file_suffix: options.file_suffix,
            header: options.header,
            emit_scaffold: options.emit_scaffold,
            default_capability: options.default_capability,
        }
    }
}

///
/// SerializationSection
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SerializationSection {
    pub default_naming: NamingConvention,
    pub metadata_suffix: String,
}

impl Default for SerializationSection {
    fn default() -> Self {
        let options = GeneratorOptions::default();

        Self {
            default_naming: options.default_naming,
            metadata_suffix: options.metadata_suffix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_matches_generator_defaults() {
        let config = AutopropConfig::from_toml_str("").unwrap();
        let options = config.to_options();
        let defaults = GeneratorOptions::default();

        assert_eq!(options.file_suffix, defaults.file_suffix);
        assert_eq!(options.header, defaults.header);
        assert!(options.emit_scaffold);
        assert_eq!(options.default_capability, Capability::PublicGet);
        assert_eq!(options.default_naming, NamingConvention::LowerCamel);
        assert_eq!(options.metadata_suffix, ".meta.json");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AutopropConfig::from_toml_str(
            r#"
            [generator]
            default_capability = "PublicGetPrivateSet"
            emit_scaffold = false

            [serialization]
            default_naming = "Snake"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.generator.default_capability,
            Capability::PublicGetPrivateSet
        );
        assert!(!config.generator.emit_scaffold);
        assert_eq!(config.generator.file_suffix, ".g.cs");
        assert_eq!(config.serialization.default_naming, NamingConvention::Snake);
    }

    #[test]
    fn unknown_keys_and_values_are_rejected() {
        assert!(matches!(
            AutopropConfig::from_toml_str("[generator]\nsuffix = \".cs\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AutopropConfig::from_toml_str("[generator]\ndefault_capability = \"Everything\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AutopropConfig::from_toml_str("[tooling]\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn empty_suffix_is_rejected() {
        assert!(matches!(
            AutopropConfig::from_toml_str("[generator]\nfile_suffix = \"\""),
            Err(ConfigError::EmptyValue("generator.file_suffix"))
        ));
    }

    #[test]
    fn loads_and_discovers_files() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            AutopropConfig::discover(dir.path()).unwrap(),
            AutopropConfig::default()
        );

        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[generator]\nheader = \"// generated\"").unwrap();

        let config = AutopropConfig::discover(dir.path()).unwrap();
        assert_eq!(config.generator.header, "// generated");

        let missing = AutopropConfig::load(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
