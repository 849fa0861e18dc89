pub mod config;
pub mod core;
pub mod dashboard;
pub mod domain;
pub mod sheet;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::storage::LocalStorage;
pub use config::ExtractSettings;

pub use core::{etl::EtlEngine, pipeline::DocumentPipeline};
pub use utils::error::{EtlError, Result};
