use crate::core::extractor::{compile_all, CompiledSection};
use crate::core::wrapper::{ModuleTemplate, ModuleWrapper};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    RenderedModule, RunReport, SectionOutcome, Source, TransformItem,
};
use crate::utils::error::{Result, SplitError};
use std::path::Path;

pub struct SplitPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    sections: Vec<CompiledSection>,
    wrapper: ModuleWrapper,
}

impl<S: Storage, C: ConfigProvider> SplitPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let sections = compile_all(config.sections())?;
        let wrapper =
            ModuleWrapper::new(config.namespace(), config.title_prefix(), config.export_style());

        Ok(Self {
            storage,
            config,
            sections,
            wrapper,
        })
    }

    fn output_path(&self, file: &str) -> String {
        Path::new(self.config.output_dir())
            .join(file)
            .to_string_lossy()
            .into_owned()
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for SplitPipeline<S, C> {
    fn extract(&self) -> Result<Source> {
        let path = self.config.input_file();
        if !self.storage.exists(path) {
            return Err(SplitError::InputNotFound {
                path: path.to_string(),
            });
        }

        let bytes = self.storage.read_file(path)?;
        let size_bytes = bytes.len() as u64;
        let text = String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        tracing::debug!("Read {} ({} bytes)", path, size_bytes);

        Ok(Source {
            path: path.to_string(),
            text,
            size_bytes,
        })
    }

    fn transform(&self, source: &Source) -> Result<Vec<TransformItem>> {
        let strategy = self.config.strategy();
        let extracted: Vec<_> = self
            .sections
            .iter()
            .map(|section| (section, section.extract(&source.text, strategy)))
            .collect();

        // 只有實際產出的模組才能被其他模組 import
        let mut wrapper = self.wrapper.clone();
        for (section, result) in &extracted {
            if result.is_ok() {
                for export in &section.spec.exports {
                    wrapper = wrapper.with_provider(export, &section.spec.file);
                }
            }
        }

        let mut items = Vec::with_capacity(extracted.len());
        for (section, result) in extracted {
            let spec = &section.spec;
            match result {
                Ok(section_text) => {
                    tracing::debug!(
                        "Section {} spans bytes {}..{}",
                        spec.name,
                        section_text.start,
                        section_text.end
                    );
                    let content = wrapper.render(&ModuleTemplate {
                        title: &spec.name,
                        body: &section_text.text,
                        dependencies: &spec.dependencies,
                        exports: &spec.exports,
                    });
                    items.push(TransformItem::Rendered(RenderedModule {
                        file: spec.file.clone(),
                        content,
                    }));
                }
                Err(reason) => {
                    tracing::warn!("⚠️ Section {} skipped: {}", spec.name, reason);
                    items.push(TransformItem::Missing {
                        file: spec.file.clone(),
                        reason,
                    });
                }
            }
        }

        Ok(items)
    }

    fn load(&self, source: &Source, items: Vec<TransformItem>) -> Result<RunReport> {
        let dry_run = self.config.dry_run();
        let mut outcomes = Vec::with_capacity(items.len());

        for item in items {
            let outcome = match item {
                TransformItem::Rendered(module) => {
                    let bytes = if dry_run {
                        module.content.len() as u64
                    } else {
                        let path = self.output_path(&module.file);
                        self.storage.write_file(&path, module.content.as_bytes())?;
                        tracing::info!("📁 Wrote {}", path);
                        self.storage.file_size(&path)?
                    };
                    SectionOutcome::Written {
                        file: module.file,
                        bytes,
                    }
                }
                TransformItem::Missing { file, reason } => SectionOutcome::NotFound { file, reason },
            };
            outcomes.push(outcome);
        }

        Ok(RunReport {
            input_file: source.path.clone(),
            input_bytes: source.size_bytes,
            size_limit_kb: self.config.size_limit_kb(),
            dry_run,
            outcomes,
        })
    }
}
