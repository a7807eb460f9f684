use crate::core::report::DEFAULT_SIZE_LIMIT_KB;
use crate::core::wrapper::{DEFAULT_NAMESPACE, DEFAULT_TITLE_PREFIX};
use crate::core::ConfigProvider;
use crate::domain::model::{ExportStyle, ExtractStrategy, SectionSpec};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_INPUT_FILE: &str = "advanced-filter-search.js";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// The sections split out of the filter-search bundle.
pub fn default_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec::new("Utils", "afs-utils.js"),
        SectionSpec::new("StateManager", "afs-state.js")
            .with_dependencies(&["CONSTANTS", "Logger"]),
        SectionSpec::new("URLManager", "afs-url.js")
            .with_dependencies(&["CONSTANTS", "Utils", "StateManager", "Logger"]),
    ]
}

/// Effective settings for one run, after TOML and command line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSettings {
    pub input_file: String,
    pub output_dir: String,
    pub sections: Vec<SectionSpec>,
    pub size_limit_kb: f64,
    pub strategy: ExtractStrategy,
    pub export_style: ExportStyle,
    pub namespace: String,
    pub title_prefix: String,
    pub dry_run: bool,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            input_file: DEFAULT_INPUT_FILE.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            sections: default_sections(),
            size_limit_kb: DEFAULT_SIZE_LIMIT_KB,
            strategy: ExtractStrategy::default(),
            export_style: ExportStyle::default(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
            dry_run: false,
        }
    }
}

impl Validate for SplitSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input_file)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        validation::validate_positive_number("size_limit_kb", self.size_limit_kb)?;
        validation::validate_identifier("namespace", &self.namespace)?;
        validation::validate_non_empty_string("title_prefix", &self.title_prefix)?;

        for (i, section) in self.sections.iter().enumerate() {
            validation::validate_non_empty_string(&format!("sections[{}].name", i), &section.name)?;
            validation::validate_non_empty_string(&format!("sections[{}].start", i), &section.start)?;
            validation::validate_file_name(&format!("sections[{}].file", i), &section.file)?;
            for export in &section.exports {
                validation::validate_identifier(&format!("sections[{}].exports", i), export)?;
            }
            for dep in &section.dependencies {
                validation::validate_identifier(&format!("sections[{}].dependencies", i), dep)?;
            }
            if self.strategy == ExtractStrategy::Pattern {
                validation::validate_non_empty_string(&format!("sections[{}].end", i), &section.end)?;
            }
        }

        validation::validate_unique("sections.file", self.sections.iter().map(|s| s.file.as_str()))?;
        crate::core::extractor::compile_all(&self.sections)?;

        Ok(())
    }
}

impl ConfigProvider for SplitSettings {
    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    fn size_limit_kb(&self) -> f64 {
        self.size_limit_kb
    }

    fn strategy(&self) -> ExtractStrategy {
        self.strategy
    }

    fn export_style(&self) -> ExportStyle {
        self.export_style
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn title_prefix(&self) -> &str {
        &self.title_prefix
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}
