pub mod etl;
pub mod parser;
pub mod pdf;
pub mod pipeline;
pub mod summary;

pub use crate::domain::model::{Record, SummaryRow, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
