use crate::domain::model::{RunReport, SectionOutcome};

pub const DEFAULT_SIZE_LIMIT_KB: f64 = 10.0;

const TITLE: &str = "Module splitting tool";
const SEPARATOR_WIDTH: usize = 50;

pub fn size_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

pub fn status_symbol(bytes: u64, limit_kb: f64) -> &'static str {
    if size_kb(bytes) <= limit_kb {
        "✓"
    } else {
        "⚠"
    }
}

pub fn render_outcome(outcome: &SectionOutcome, limit_kb: f64) -> String {
    match outcome {
        SectionOutcome::Written { file, bytes } => format!(
            "{} {}: {:.2} KB",
            status_symbol(*bytes, limit_kb),
            file,
            size_kb(*bytes)
        ),
        SectionOutcome::NotFound { file, .. } => format!("✗ {}: Section not found", file),
    }
}

impl RunReport {
    /// Console report, one line per configured section after the header.
    pub fn render(&self) -> String {
        let mut lines = vec![
            TITLE.to_string(),
            "=".repeat(SEPARATOR_WIDTH),
            format!("Input file: {}", self.input_file),
            format!("File size: {:.2} KB", size_kb(self.input_bytes)),
            String::new(),
        ];
        lines.extend(
            self.outcomes
                .iter()
                .map(|outcome| render_outcome(outcome, self.size_limit_kb)),
        );
        if self.dry_run {
            lines.push(String::new());
            lines.push("Dry run: no files were written".to_string());
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
