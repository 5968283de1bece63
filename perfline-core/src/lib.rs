pub mod config;
pub mod error;
pub mod field;
pub mod line;
pub mod metric;

pub use config::{PublishConfig, SourceInfo};
pub use error::PerflineError;
pub use field::FieldValue;
pub use line::LineBuilder;
pub use metric::Metric;
