pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{ExportStyle, ExtractStrategy};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

pub use settings::{default_sections, SplitSettings};

/// With no flags the run uses the built-in section list and file names.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "afs-split")]
#[command(about = "Split advanced-filter-search.js into size-limited theme modules")]
pub struct CliConfig {
    /// Source file to split
    #[arg(long)]
    pub input: Option<String>,

    /// Directory for the generated modules
    #[arg(long)]
    pub output_dir: Option<String>,

    /// TOML file overriding the built-in settings and sections
    #[arg(short, long)]
    pub config: Option<String>,

    /// Per-file size budget in KiB
    #[arg(long)]
    pub size_limit_kb: Option<f64>,

    /// How section bodies are located: balanced or pattern
    #[arg(long)]
    pub strategy: Option<ExtractStrategy>,

    /// How modules publish their exports: namespace or esm
    #[arg(long)]
    pub export_style: Option<ExportStyle>,

    /// Extract and report sizes without writing files
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併預設值、TOML 檔與命令列參數
    pub fn to_settings(&self) -> Result<SplitSettings> {
        let mut settings = SplitSettings::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            toml_config::TomlConfig::from_file(path)?.apply_to(&mut settings)?;
        }

        if let Some(input) = &self.input {
            settings.input_file = input.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir = output_dir.clone();
        }
        if let Some(limit) = self.size_limit_kb {
            settings.size_limit_kb = limit;
        }
        if let Some(strategy) = self.strategy {
            settings.strategy = strategy;
        }
        if let Some(style) = self.export_style {
            settings.export_style = style;
        }
        settings.dry_run = self.dry_run;

        Ok(settings)
    }
}
