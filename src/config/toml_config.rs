use crate::config::settings::SplitSettings;
use crate::domain::model::{
    default_start_pattern, ExportStyle, ExtractStrategy, SectionSpec, DEFAULT_END_PATTERN,
};
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::validate_required_field;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

/// Optional split configuration file.
///
/// ```toml
/// [split]
/// input = "advanced-filter-search.js"
/// output_dir = "assets"
/// size_limit_kb = 10.0
///
/// [[sections]]
/// name = "Utils"
/// file = "afs-utils.js"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub split: Option<SplitTable>,
    pub sections: Option<Vec<SectionTable>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SplitTable {
    pub input: Option<String>,
    pub output_dir: Option<String>,
    pub size_limit_kb: Option<f64>,
    pub namespace: Option<String>,
    pub title_prefix: Option<String>,
    pub strategy: Option<ExtractStrategy>,
    pub export_style: Option<ExportStyle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionTable {
    pub name: String,
    pub file: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub exports: Option<Vec<String>>,
    pub dependencies: Option<Vec<String>>,
}

impl SectionTable {
    fn to_spec(&self, index: usize) -> Result<SectionSpec> {
        let file = validate_required_field(&format!("sections[{}].file", index), &self.file)?;

        Ok(SectionSpec {
            name: self.name.clone(),
            start: self
                .start
                .clone()
                .unwrap_or_else(|| default_start_pattern(&self.name)),
            end: self
                .end
                .clone()
                .unwrap_or_else(|| DEFAULT_END_PATTERN.to_string()),
            file: file.clone(),
            exports: self
                .exports
                .clone()
                .unwrap_or_else(|| vec![self.name.clone()]),
            dependencies: self.dependencies.clone().unwrap_or_default(),
        })
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SplitError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SplitError::ConfigParseError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ASSET_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 覆蓋預設設定；有 `[[sections]]` 時整組取代預設區段
    pub fn apply_to(&self, settings: &mut SplitSettings) -> Result<()> {
        if let Some(split) = &self.split {
            if let Some(input) = &split.input {
                settings.input_file = input.clone();
            }
            if let Some(output_dir) = &split.output_dir {
                settings.output_dir = output_dir.clone();
            }
            if let Some(limit) = split.size_limit_kb {
                settings.size_limit_kb = limit;
            }
            if let Some(namespace) = &split.namespace {
                settings.namespace = namespace.clone();
            }
            if let Some(prefix) = &split.title_prefix {
                settings.title_prefix = prefix.clone();
            }
            if let Some(strategy) = split.strategy {
                settings.strategy = strategy;
            }
            if let Some(style) = split.export_style {
                settings.export_style = style;
            }
        }

        if let Some(sections) = &self.sections {
            settings.sections = sections
                .iter()
                .enumerate()
                .map(|(i, section)| section.to_spec(i))
                .collect::<Result<Vec<_>>>()?;
        }

        Ok(())
    }
}
