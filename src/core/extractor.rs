use crate::core::scanner::find_matching_brace;
use crate::domain::model::{ExtractStrategy, ExtractedSection, MissReason, SectionSpec};
use crate::utils::error::{Result, SplitError};
use regex::{Regex, RegexBuilder};

/// A section with its patterns compiled once per run.
#[derive(Debug, Clone)]
pub struct CompiledSection {
    pub spec: SectionSpec,
    start: Regex,
    end: Regex,
}

impl CompiledSection {
    pub fn compile(spec: &SectionSpec) -> Result<Self> {
        let start = Regex::new(&spec.start).map_err(|source| SplitError::PatternError {
            section: spec.name.clone(),
            source,
        })?;
        // `^` in end rules means "start of a line"
        let end = RegexBuilder::new(&spec.end)
            .multi_line(true)
            .build()
            .map_err(|source| SplitError::PatternError {
                section: spec.name.clone(),
                source,
            })?;

        Ok(Self {
            spec: spec.clone(),
            start,
            end,
        })
    }

    pub fn extract(
        &self,
        source: &str,
        strategy: ExtractStrategy,
    ) -> std::result::Result<ExtractedSection, MissReason> {
        match strategy {
            ExtractStrategy::Balanced => extract_balanced(source, &self.start),
            ExtractStrategy::Pattern => extract_between(source, &self.start, &self.end),
        }
    }
}

pub fn compile_all(specs: &[SectionSpec]) -> Result<Vec<CompiledSection>> {
    specs.iter().map(CompiledSection::compile).collect()
}

/// Start rule locates the declaration, brace matching finds where it ends.
pub fn extract_balanced(
    source: &str,
    start: &Regex,
) -> std::result::Result<ExtractedSection, MissReason> {
    let m = start.find(source).ok_or(MissReason::StartNotFound)?;

    let open = match m.as_str().rfind('{') {
        Some(offset) => m.start() + offset,
        None => {
            let rest = &source[m.end()..];
            let skipped = rest.len() - rest.trim_start().len();
            if !rest[skipped..].starts_with('{') {
                return Err(MissReason::NoOpeningBrace);
            }
            m.end() + skipped
        }
    };

    let close = find_matching_brace(source, open).ok_or(MissReason::Unterminated)?;
    let end = include_semicolon(source, close + 1);

    Ok(ExtractedSection {
        start: m.start(),
        end,
        text: source[m.start()..end].to_string(),
    })
}

/// The first end match at or after the start match closes the section.
/// End matches that only occur before the start are reported as such.
pub fn extract_between(
    source: &str,
    start: &Regex,
    end: &Regex,
) -> std::result::Result<ExtractedSection, MissReason> {
    let start_match = start.find(source).ok_or(MissReason::StartNotFound)?;
    let end_match = match end.find_at(source, start_match.start()) {
        Some(m) => m,
        None if end.is_match(source) => return Err(MissReason::EndBeforeStart),
        None => return Err(MissReason::EndNotFound),
    };

    Ok(ExtractedSection {
        start: start_match.start(),
        end: end_match.end(),
        text: source[start_match.start()..end_match.end()].to_string(),
    })
}

fn include_semicolon(source: &str, pos: usize) -> usize {
    let rest = &source[pos..];
    let trimmed = rest.trim_start_matches([' ', '\t']);
    if trimmed.starts_with(';') {
        pos + (rest.len() - trimmed.len()) + 1
    } else {
        pos
    }
}
