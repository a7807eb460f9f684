use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// One top-level declaration to pull out of the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    pub name: String,
    pub start: String,
    pub end: String,
    pub file: String,
    pub exports: Vec<String>,
    pub dependencies: Vec<String>,
}

impl SectionSpec {
    pub fn new(name: &str, file: &str) -> Self {
        Self {
            name: name.to_string(),
            start: default_start_pattern(name),
            end: DEFAULT_END_PATTERN.to_string(),
            file: file.to_string(),
            exports: vec![name.to_string()],
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: &[&str]) -> Self {
        self.dependencies = dependencies.iter().map(|d| d.to_string()).collect();
        self
    }
}

pub const DEFAULT_END_PATTERN: &str = r"^\s*\};";

pub fn default_start_pattern(name: &str) -> String {
    format!(r"const {} = \{{", regex::escape(name))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractStrategy {
    /// Start rule plus brace matching.
    #[default]
    Balanced,
    /// Start rule, then the first end-rule match at or after it.
    Pattern,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStyle {
    #[default]
    Namespace,
    Esm,
}

impl FromStr for ExtractStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "balanced" => Ok(ExtractStrategy::Balanced),
            "pattern" => Ok(ExtractStrategy::Pattern),
            other => Err(format!("unknown strategy '{}' (balanced, pattern)", other)),
        }
    }
}

impl FromStr for ExportStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "namespace" => Ok(ExportStyle::Namespace),
            "esm" => Ok(ExportStyle::Esm),
            other => Err(format!("unknown export style '{}' (namespace, esm)", other)),
        }
    }
}

/// Full text of the input file.
#[derive(Debug, Clone)]
pub struct Source {
    pub path: String,
    pub text: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSection {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    StartNotFound,
    EndNotFound,
    EndBeforeStart,
    NoOpeningBrace,
    Unterminated,
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MissReason::StartNotFound => "start pattern did not match",
            MissReason::EndNotFound => "end pattern did not match",
            MissReason::EndBeforeStart => "end pattern matched before start pattern",
            MissReason::NoOpeningBrace => "no opening brace after start pattern",
            MissReason::Unterminated => "declaration body is never closed",
        };
        f.write_str(text)
    }
}

/// A section after wrapping, ready to be written.
#[derive(Debug, Clone)]
pub struct RenderedModule {
    pub file: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub enum TransformItem {
    Rendered(RenderedModule),
    Missing { file: String, reason: MissReason },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutcome {
    Written { file: String, bytes: u64 },
    NotFound { file: String, reason: MissReason },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub input_file: String,
    pub input_bytes: u64,
    pub size_limit_kb: f64,
    pub dry_run: bool,
    pub outcomes: Vec<SectionOutcome>,
}

impl RunReport {
    pub fn written_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SectionOutcome::Written { .. }))
            .count()
    }
}
