use std::fmt;
use std::str::FromStr;

use pipestate::{ShaderStage, VisibilityConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'; expected text or json")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Stage names to print, e.g. `["vs", "fs"]`. Empty prints every stage.
    #[serde(default)]
    pub stages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InspectorConfig {
    pub version: u32,
    #[serde(default)]
    pub visibility: VisibilityConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            visibility: VisibilityConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl InspectorConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: InspectorConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        for stage in &self.output.stages {
            if stage.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "output.stages may not contain an empty name".into(),
                ));
            }
            stage
                .parse::<ShaderStage>()
                .map_err(|err| ConfigError::Invalid(format!("output.stages: {err}")))?;
        }

        Ok(())
    }

    /// Parsed stage filter in pipeline order, without duplicates.
    pub fn stages(&self) -> Vec<ShaderStage> {
        let mut stages: Vec<ShaderStage> = self
            .output
            .stages
            .iter()
            .filter_map(|stage| stage.parse().ok())
            .collect();
        stages.sort();
        stages.dedup();
        stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version = 1

[visibility]
show_disabled = true

[output]
format = "json"
stages = ["fs", "vertex", "FS"]
"#;

    #[test]
    fn parses_sample_config() {
        let config = InspectorConfig::from_toml_str(SAMPLE).expect("parse config");
        assert!(config.visibility.show_disabled);
        assert!(!config.visibility.show_empty);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(
            config.stages(),
            vec![ShaderStage::Vertex, ShaderStage::Fragment]
        );
    }

    #[test]
    fn sections_are_optional() {
        let config = InspectorConfig::from_toml_str("version = 1").expect("parse config");
        assert_eq!(config, InspectorConfig::default());
        assert!(config.stages().is_empty());
    }

    #[test]
    fn rejects_unknown_version() {
        let err = InspectorConfig::from_toml_str("version = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("version 2"));
    }

    #[test]
    fn rejects_unknown_stage() {
        let input = r#"
version = 1
[output]
stages = ["vs", "mesh"]
"#;
        let err = InspectorConfig::from_toml_str(input).unwrap_err();
        assert!(err.to_string().contains("mesh"));
    }

    #[test]
    fn rejects_unknown_format() {
        let input = r#"
version = 1
[output]
format = "html"
"#;
        let err = InspectorConfig::from_toml_str(input).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
