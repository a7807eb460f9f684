use crate::core::Pipeline;
use crate::domain::model::RunReport;
use crate::utils::error::Result;

pub struct SplitEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SplitEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting module split...");

        let source = self.pipeline.extract()?;
        tracing::info!("Loaded {} ({} bytes)", source.path, source.size_bytes);

        let items = self.pipeline.transform(&source)?;
        tracing::info!("Prepared {} sections", items.len());

        let report = self.pipeline.load(&source, items)?;
        tracing::info!(
            "✅ Split finished: {}/{} modules produced",
            report.written_count(),
            report.outcomes.len()
        );

        Ok(report)
    }
}
