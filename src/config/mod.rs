#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use toml_config::{LoadConfig, TomlConfig};

/// Fully resolved extractor settings (file values with flag overrides applied).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractSettings {
    pub workdir: String,
    pub input_path: String,
    pub load: LoadConfig,
}

impl ExtractSettings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        let input_path =
            validation::validate_required_field("extract.input_path", &config.extract.input_path)?;
        Ok(Self {
            workdir: config.extract.workdir.clone(),
            input_path: input_path.clone(),
            load: config.load.clone(),
        })
    }
}

impl ConfigProvider for ExtractSettings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn sheet_name(&self) -> &str {
        &self.load.sheet_name
    }

    fn highlight_threshold(&self) -> f64 {
        self.load.highlight_threshold
    }
}

impl Validate for ExtractSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("extract.workdir", &self.workdir)?;
        validation::validate_path("extract.input_path", &self.input_path)?;
        self.load.validate()
    }
}
