use crate::domain::model::DEFAULT_MONEY_THRESHOLD;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub extract: ExtractConfig,
    pub load: LoadConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// 相對路徑以 workdir 為基準
    pub workdir: String,
    pub input_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub sheet_name: String,
    pub highlight_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub spreadsheet_path: String,
    pub sheet_name: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub json_logs: bool,
    pub threshold: f64,
    pub sales_seed: u64,
    pub start_date: NaiveDate,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            workdir: ".".to_string(),
            input_path: None,
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: "dados_pessoas.xlsx".to_string(),
            sheet_name: "Dados".to_string(),
            highlight_threshold: DEFAULT_MONEY_THRESHOLD,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            spreadsheet_path: "dados_pessoas.xlsx".to_string(),
            sheet_name: "Dados".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8050,
            debug: true,
            json_logs: false,
            threshold: DEFAULT_MONEY_THRESHOLD,
            sales_seed: 42,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DADOS_PATH})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for LoadConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("load.output_path", &self.output_path)?;
        validation::validate_file_extensions(
            "load.output_path",
            std::slice::from_ref(&self.output_path),
            &["xlsx"],
        )?;
        validation::validate_non_empty_string("load.sheet_name", &self.sheet_name)?;
        // Excel 工作表名稱上限 31 字元
        validation::validate_range(
            "load.sheet_name",
            self.sheet_name.chars().count(),
            1,
            31,
        )?;
        validation::validate_threshold("load.highlight_threshold", self.highlight_threshold)
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("dashboard.spreadsheet_path", &self.spreadsheet_path)?;
        validation::validate_non_empty_string("dashboard.host", &self.host)?;
        validation::validate_positive_number("dashboard.port", self.port as usize, 1)?;
        validation::validate_threshold("dashboard.threshold", self.threshold)
    }
}

impl DashboardConfig {
    pub fn bind_address(&self) -> Result<std::net::SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|e: std::net::AddrParseError| EtlError::InvalidConfigValueError {
            field: "dashboard.host".to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        })
    }
}
