pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, SplitSettings};

pub use core::{engine::SplitEngine, pipeline::SplitPipeline};
pub use domain::model::{RunReport, SectionOutcome, SectionSpec};
pub use utils::error::{Result, SplitError};
