pub mod engine;
pub mod extractor;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod wrapper;

pub use crate::domain::model::{RunReport, SectionOutcome, SectionSpec};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
