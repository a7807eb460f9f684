use crate::domain::model::{
    ExportStyle, ExtractStrategy, RunReport, SectionSpec, Source, TransformItem,
};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// Size of the stored file in bytes.
    fn file_size(&self, path: &str) -> Result<u64>;
    fn exists(&self, path: &str) -> bool;
}

pub trait ConfigProvider {
    fn input_file(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn sections(&self) -> &[SectionSpec];
    fn size_limit_kb(&self) -> f64;
    fn strategy(&self) -> ExtractStrategy;
    fn export_style(&self) -> ExportStyle;
    fn namespace(&self) -> &str;
    fn title_prefix(&self) -> &str;
    fn dry_run(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Source>;
    fn transform(&self, source: &Source) -> Result<Vec<TransformItem>>;
    fn load(&self, source: &Source, items: Vec<TransformItem>) -> Result<RunReport>;
}
