use super::toml_config::TomlConfig;
use super::ExtractSettings;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "pessoas-etl")]
#[command(about = "Extract people records from a document into a styled spreadsheet")]
pub struct CliConfig {
    /// Path to the source document (overrides extract.input_path)
    pub input: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base directory for relative input/output paths
    #[arg(long)]
    pub workdir: Option<String>,

    /// Spreadsheet file to write
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long)]
    pub sheet_name: Option<String>,

    /// Rows with money below this value are highlighted
    #[arg(long)]
    pub threshold: Option<f64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Parse and summarize without writing the spreadsheet
    #[arg(long)]
    pub dry_run: bool,
}

impl CliConfig {
    /// 合併 TOML 設定與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<ExtractSettings> {
        let mut base = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(input) = &self.input {
            base.extract.input_path = Some(input.clone());
        }
        if let Some(workdir) = &self.workdir {
            base.extract.workdir = workdir.clone();
        }
        if let Some(output) = &self.output {
            base.load.output_path = output.clone();
        }
        if let Some(sheet_name) = &self.sheet_name {
            base.load.sheet_name = sheet_name.clone();
        }
        if let Some(threshold) = self.threshold {
            base.load.highlight_threshold = threshold;
        }

        ExtractSettings::from_toml(&base)
    }
}
